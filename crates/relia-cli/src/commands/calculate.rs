//! Calculate command implementation.

use crate::cli::CalculateArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use crate::system::{load_system, save_system};
use relia_domain::{NodeId, NullObserver};
use relia_rollup::{calculate_hardware, TreeAggregator};
use tracing::info;

/// Execute the calculate command.
///
/// Without `--node` the whole system is rolled up from the root; node
/// failures are listed with the results. With `--node` one item is
/// calculated and any failure aborts the command.
pub fn execute_calculate(args: CalculateArgs, config: &Config, formatter: &Formatter) -> Result<String> {
    let mut tree = load_system(&args.file)?;

    let mut output = match args.node {
        None => {
            let mut aggregator = TreeAggregator::new(config.rollup());
            let report = aggregator.calculate_all(&mut tree);
            info!("{}", aggregator.metrics().summary());
            formatter.format_rollup(&tree, &report)?
        }
        Some(id) => {
            let result = calculate_hardware(&mut tree, &mut NullObserver, NodeId::new(id), &config.rollup())?;
            formatter.format_item(&result.attributes, &result.warnings)?
        }
    };

    if args.write {
        save_system(&args.file, &tree)?;
        if formatter.format() == OutputFormat::Table {
            output.push('\n');
            output.push_str(&formatter.success(&format!("Results written to {}", args.file.display())));
        }
    }
    Ok(output)
}
