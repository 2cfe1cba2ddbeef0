//! Module for reading the replication groups of a cluster (`list groups`).
//!
//! A cluster has three kinds of groups:
//! - data groups (role 0): user-named groups holding the data.
//! - the coordinator group (role 1), named `SYSCoord`.
//! - the catalog group (role 2), named `SYSCatalogGroup`.
//!
//! Nodes that are added to the cluster but not yet assigned live in the spare group `SYSSpare`.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
