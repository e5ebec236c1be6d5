//! Hazard Risk Index command implementation.

use crate::cli::HriArgs;
use crate::error::Result;
use crate::output::Formatter;
use relia_domain::hazard::hazard_risk_index;

/// Execute the hri command.
pub fn execute_hri(args: HriArgs, formatter: &Formatter) -> Result<String> {
    let hri = hazard_risk_index(&args.probability, &args.severity)?;
    formatter.format_hri(args.probability.trim(), args.severity.trim(), hri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;

    fn args(probability: &str, severity: &str) -> HriArgs {
        HriArgs {
            probability: probability.to_string(),
            severity: severity.to_string(),
        }
    }

    #[test]
    fn test_occasional_medium() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = execute_hri(args("Level C - Occasional", "Medium"), &formatter).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["hri"], 12);
    }

    #[test]
    fn test_unknown_severity() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let err = execute_hri(args("Level A - Frequent", "Catastrophic"), &formatter).unwrap_err();
        assert!(matches!(err, CliError::Hazard(_)));
    }
}
