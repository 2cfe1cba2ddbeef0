//! Module for the cluster precheck run before a batch of test cases.
//!
//! The check is a single pass:
//! 1. connect to the coordinator.
//! 2. list all groups.
//! 3. list the data groups, and require exactly the expected number of them.
//! 4. check the business (health) of every node in every group.
//!
//! Success prints `Cluster is normal!`. Any failure prints
//! `Before detect cluster failed: <reason>` and is returned to the caller, which must treat it
//! as fatal for the whole test batch.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
