//! Derate command implementation.

use crate::cli::DerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::system::{load_system, save_system};
use relia_domain::{NodeId, NullObserver};
use relia_rollup::derate_hardware;

/// Execute the derate command.
pub fn execute_derate(args: DerateArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let mut tree = load_system(&args.file)?;
    let derated = derate_hardware(&mut tree, &mut NullObserver, NodeId::new(args.node), &config.rollup())?;
    if args.write {
        save_system(&args.file, &tree)?;
    }
    formatter.format_derating(&derated)
}
