//! Module for the business check of the nodes (`snapshot health`).
//!
//! The coordinator answers `snapshot health` with one document per reachable data or catalog
//! node, and one `ErrNodes` document listing the nodes it could not reach. The check matches
//! these documents against the nodes in the group listing, and every node that is missing,
//! unreachable, out of service or not in `Normal` status becomes an `ErrorNode`.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
