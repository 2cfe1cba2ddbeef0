//! The structs
//!
use std::time::Duration;

pub const DEFAULT_EXPECTED_DATA_GROUPS: usize = 3;
/// The default request timeout of the http client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecheckSettings {
    pub coord_hostname: String,
    pub coord_svcname: String,
    /// `None` derives the REST port from `coord_svcname`.
    pub rest_port: Option<u16>,
    pub expected_data_groups: usize,
    /// Every node must be healthy, instead of every group keeping its majority.
    pub strict: bool,
    /// List the groups again right before the health check instead of reusing the first listing.
    pub refetch_groups: bool,
    /// Print the error nodes in colour; only for a terminal.
    pub colorize: bool,
    pub timeout: Duration,
}
