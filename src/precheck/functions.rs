//! The impls and functions
//!
use std::{io::Write, time::Instant};
use log::*;
use crate::coordinator::{Connection, Coordinator};
use crate::error::{PrecheckError, Result};
use crate::groups::{list_groups, GroupFilter};
use crate::health::{check_business, print_nodes};
use crate::precheck::{PrecheckSettings, DEFAULT_EXPECTED_DATA_GROUPS, DEFAULT_TIMEOUT};

pub const SUCCESS_MESSAGE: &str = "Cluster is normal!";
pub const FAILURE_CONTEXT: &str = "Before detect cluster failed";

impl Default for PrecheckSettings {
    fn default() -> Self {
        PrecheckSettings {
            coord_hostname: "localhost".to_string(),
            coord_svcname: "11810".to_string(),
            rest_port: None,
            expected_data_groups: DEFAULT_EXPECTED_DATA_GROUPS,
            strict: true,
            refetch_groups: false,
            colorize: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// the output sink is for the test-runner log; a failing write must not change the verdict.
fn emit<W: Write>(
    out: &mut W,
    line: &str,
)
{
    if let Err(e) = writeln!(out, "{}", line) {
        warn!("cannot write to output: {}", e);
    }
}

/// Run the precheck against the coordinator in `settings`.
pub fn run<W: Write>(
    settings: &PrecheckSettings,
    out: &mut W,
) -> Result<()>
{
    run_with(
        || Connection::connect(&settings.coord_hostname, &settings.coord_svcname, settings.rest_port, settings.timeout),
        settings,
        out,
    )
}

/// Run the precheck on the coordinator returned by `connect`.
///
/// The coordinator lives until the check is done and is dropped on every path. An error is
/// written to `out` with its context and then returned.
pub fn run_with<C, F, W>(
    connect: F,
    settings: &PrecheckSettings,
    out: &mut W,
) -> Result<()>
where
    C: Coordinator,
    F: FnOnce() -> Result<C>,
    W: Write,
{
    info!("begin detect cluster");
    let timer = Instant::now();

    let result = connect().and_then(|coordinator| detect_cluster(&coordinator, settings, &mut *out));

    match &result {
        Ok(()) => info!("end detect cluster: {:?}", timer.elapsed()),
        Err(e) => {
            error!("detect cluster failed ({}): {}", e.kind(), e);
            emit(out, &format!("{}: {}", FAILURE_CONTEXT, e));
        }
    }
    result
}

/// The check itself, on an open coordinator connection.
pub fn detect_cluster<C, W>(
    coordinator: &C,
    settings: &PrecheckSettings,
    out: &mut W,
) -> Result<()>
where
    C: Coordinator + ?Sized,
    W: Write,
{
    let groups = list_groups(coordinator, &GroupFilter::all())?;
    let data_groups = list_groups(coordinator, &GroupFilter::data_groups())?;

    validate_topology(data_groups.len(), settings.expected_data_groups)?;

    let groups = if settings.refetch_groups {
        list_groups(coordinator, &GroupFilter::all())?
    } else {
        groups
    };
    let error_nodes = check_business(coordinator, &groups, settings.strict)?;

    if error_nodes.is_empty() {
        emit(out, SUCCESS_MESSAGE);
        Ok(())
    } else {
        emit(out, &format!("Has {} nodes in fault before all test-cases: ", error_nodes.len()));
        if let Err(e) = print_nodes(out, &error_nodes, settings.colorize) {
            warn!("cannot write to output: {}", e);
        }
        Err(PrecheckError::Health("exist error node!".to_string()))
    }
}

pub fn validate_topology(
    data_group_count: usize,
    expected_data_groups: usize,
) -> Result<()>
{
    if data_group_count == 0 {
        Err(PrecheckError::Topology("No group found".to_string()))
    } else if data_group_count != expected_data_groups {
        Err(PrecheckError::Topology(format!("groups not {}", expected_data_groups)))
    } else {
        Ok(())
    }
}
