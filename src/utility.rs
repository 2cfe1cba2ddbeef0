//! Utilities
//!
//! Every setting is taken from the command line if it is set there, otherwise from the
//! environment (a `.env` file is loaded into the environment at startup), otherwise from the
//! default. Settings that did not come from the default can be written back to `.env`.
//!
use log::*;
use std::{env, fs, collections::HashMap, io::Write, path::Path, time::Duration};
use anyhow::{Result, Context, bail};
use crate::Opts;
use crate::precheck::{PrecheckSettings, DEFAULT_EXPECTED_DATA_GROUPS, DEFAULT_TIMEOUT};

pub const DEFAULT_COORD_HOST: &str = "localhost";
pub const DEFAULT_COORD_SVCNAME: &str = "11810";

pub const ENV_COORD_HOST: &str = "SDBPRECHECK_COORD_HOST";
pub const ENV_COORD_SVCNAME: &str = "SDBPRECHECK_COORD_SVCNAME";
pub const ENV_REST_PORT: &str = "SDBPRECHECK_REST_PORT";
pub const ENV_EXPECTED_GROUPS: &str = "SDBPRECHECK_EXPECTED_GROUPS";
pub const ENV_TIMEOUT: &str = "SDBPRECHECK_TIMEOUT";

/// Pick the command line value, else the environment value, else the default.
///
/// The first two are recorded in `changed_options` under `key`.
pub fn resolve_option(
    option: &Option<String>,
    env_value: Option<String>,
    default: Option<&str>,
    key: &'static str,
    changed_options: &mut HashMap<&'static str, String>,
) -> Option<String>
{
    if let Some(value) = option {
        info!("{} argument set: using: {}", key, value);
        changed_options.insert(key, value.to_string());
        Some(value.to_string())
    } else if let Some(value) = env_value {
        info!("{} not set: set via .env: {}", key, value);
        changed_options.insert(key, value.to_string());
        Some(value)
    } else {
        match default {
            Some(default) => info!("{} not set: and not set via .env: using default: {}", key, default),
            None => info!("{} not set: and not set via .env: no default", key),
        }
        default.map(|default| default.to_string())
    }
}

fn set_option(
    option: &Option<String>,
    default: Option<&str>,
    key: &'static str,
    changed_options: &mut HashMap<&'static str, String>,
) -> Option<String>
{
    resolve_option(option, env::var(key).ok(), default, key, changed_options)
}

/// Build the precheck settings from the command line and the environment.
pub fn settings_from_options(
    options: &Opts,
    changed_options: &mut HashMap<&'static str, String>,
) -> Result<PrecheckSettings>
{
    let coord_hostname = set_option(&options.coord_host, Some(DEFAULT_COORD_HOST), ENV_COORD_HOST, changed_options)
        .unwrap_or_default();
    let coord_svcname = set_option(&options.coord_svcname, Some(DEFAULT_COORD_SVCNAME), ENV_COORD_SVCNAME, changed_options)
        .unwrap_or_default();
    let rest_port = set_option(&options.rest_port, None, ENV_REST_PORT, changed_options)
        .map(|rest_port| rest_port.parse::<u16>().with_context(|| format!("Invalid REST port: {}", rest_port)))
        .transpose()?;
    let default_expected_groups = DEFAULT_EXPECTED_DATA_GROUPS.to_string();
    let expected_data_groups = set_option(&options.expected_groups, Some(default_expected_groups.as_str()), ENV_EXPECTED_GROUPS, changed_options)
        .map(|expected| expected.parse::<usize>().with_context(|| format!("Invalid number of expected groups: {}", expected)))
        .transpose()?
        .unwrap_or(DEFAULT_EXPECTED_DATA_GROUPS);
    let default_timeout = DEFAULT_TIMEOUT.as_secs().to_string();
    let timeout = set_option(&options.timeout, Some(default_timeout.as_str()), ENV_TIMEOUT, changed_options)
        .map(|timeout| timeout.parse::<u64>().with_context(|| format!("Invalid timeout: {}", timeout)))
        .transpose()?
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);

    if coord_hostname.is_empty() {
        bail!("The coordinator hostname is empty");
    }
    if expected_data_groups == 0 {
        bail!("The number of expected groups must be at least 1");
    }

    Ok(PrecheckSettings {
        coord_hostname,
        coord_svcname,
        rest_port,
        expected_data_groups,
        strict: !options.non_strict,
        refetch_groups: options.refetch_groups,
        colorize: false,
        timeout,
    })
}

/// Write the set options to `path` as sorted `KEY=value` lines.
///
/// Nothing is written unless `write_dotenv` is set and there is at least one option.
pub fn dotenv_writer(
    write_dotenv: bool,
    changed_options: HashMap<&str, String>,
    path: &Path,
) -> Result<()>
{
    if !changed_options.is_empty() && write_dotenv {
        info!("Writing .env file: {}", path.display());
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Error writing .env file: {}", path.display()))?;

        let mut keys: Vec<&&str> = changed_options.keys().collect();
        keys.sort();
        for key in keys {
            file.write_all(format!("{}={}\n", key, changed_options[*key]).as_bytes())?;
            info!("{}={}", key, changed_options[*key]);
        }
    }
    Ok(())
}
