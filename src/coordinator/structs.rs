//! The structs
//!
use crate::error::Result;
use crate::groups::Group;
use crate::health::HealthRecord;

/// The queries the precheck needs from a coordinator.
///
/// `Connection` implements this against a live coordinator; the precheck itself only
/// depends on this trait, so it can be driven by a stand-in in tests.
pub trait Coordinator {
    /// All groups known to the coordinator, unfiltered.
    fn list_groups(&self) -> Result<Vec<Group>>;
    /// One health snapshot of all nodes.
    fn snapshot_health(&self) -> Result<Vec<HealthRecord>>;
}

/// An open connection to the REST service of a coordinator.
///
/// The connection is released when it is dropped.
#[derive(Debug)]
pub struct Connection {
    pub hostname: String,
    pub svcname: String,
    pub rest_port: u16,
    pub(crate) client: reqwest::blocking::Client,
}
