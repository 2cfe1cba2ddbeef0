//! Module for talking to the cluster coordinator.
//!
//! The coordinator exposes a REST service next to its database service. The REST port is
//! the service port + 4, so a coordinator listening on 11810 answers REST requests on 11814.
//! A request is a `POST /` with a form body `cmd=<command>`, and the reply is a stream of
//! concatenated JSON documents:
//! ```json
//! { "errno": 0 }{ "GroupName": "group1", ... }{ "GroupName": "group2", ... }
//! ```
//! The first document is the header; `errno` is 0 on success, otherwise it is accompanied by
//! `description` and `detail`.
//!
//! Two commands are used:
//! - `list groups`: the replication groups with their member nodes.
//! - `snapshot health`: one health document per reachable node, plus an `ErrNodes` document
//!   for the nodes the coordinator could not reach.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
