//! sdb_precheck: verify a SequoiaDB cluster before a batch of test cases runs.
//!
//! The check connects to a coordinator, requires the expected number of data groups, and
//! requires every node of every group to be healthy. See [`precheck::run`].
//!
#[macro_use]
extern crate serde_derive;

use clap::Parser;

pub mod error;
pub mod coordinator;
pub mod groups;
pub mod health;
pub mod precheck;
pub mod utility;

/// Options of the `sdb_precheck` binary.
///
/// Every option that is not set falls back to its `SDBPRECHECK_*` environment variable (which
/// can be set in `.env`), and then to its default.
#[derive(Debug, Parser, Default)]
#[command(author, version, about, long_about = None)]
pub struct Opts {
    /// coordinator hostname [env: SDBPRECHECK_COORD_HOST] [default: localhost]
    #[arg(short = 'H', long, value_name = "hostname")]
    pub coord_host: Option<String>,
    /// coordinator service name (port) [env: SDBPRECHECK_COORD_SVCNAME] [default: 11810]
    #[arg(short = 's', long, value_name = "svcname")]
    pub coord_svcname: Option<String>,
    /// REST port of the coordinator [env: SDBPRECHECK_REST_PORT] [default: svcname + 4]
    #[arg(long, value_name = "port")]
    pub rest_port: Option<String>,
    /// number of data groups the cluster must have [env: SDBPRECHECK_EXPECTED_GROUPS] [default: 3]
    #[arg(short, long, value_name = "count")]
    pub expected_groups: Option<String>,
    /// request timeout in seconds [env: SDBPRECHECK_TIMEOUT] [default: 30]
    #[arg(short, long, value_name = "seconds")]
    pub timeout: Option<String>,
    /// only fail on groups that lost the majority of their nodes
    #[arg(long)]
    pub non_strict: bool,
    /// list the groups again before the health check
    #[arg(long)]
    pub refetch_groups: bool,
    /// write the set options to .env
    #[arg(long)]
    pub write_dotenv: bool,
}
