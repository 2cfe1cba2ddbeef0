use std::{collections::HashMap, io::{self, IsTerminal, Write}, path::Path, process};
use clap::Parser;
use dotenv::dotenv;
use log::*;
use anyhow::Result;

use sdb_precheck::{Opts, precheck, utility};

fn main() -> Result<()>
{
    env_logger::init();
    dotenv().ok();
    let options = Opts::parse();

    let mut changed_options = HashMap::new();
    let mut settings = utility::settings_from_options(&options, &mut changed_options)?;
    utility::dotenv_writer(options.write_dotenv, changed_options, Path::new(".env"))?;
    settings.colorize = io::stdout().is_terminal();
    info!("{:?}", settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = precheck::run(&settings, &mut out);
    out.flush()?;

    if let Err(e) = result {
        process::exit(e.exit_code());
    }
    Ok(())
}
