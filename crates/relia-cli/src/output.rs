//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use relia_domain::{AllocationRecord, CalculationFailure, ComponentAttributes, HardwareTree};
use relia_rollup::RollupReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a whole-system rollup.
    pub fn format_rollup(&self, tree: &HardwareTree, report: &RollupReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let nodes: Vec<&ComponentAttributes> =
                    tree.iter().filter_map(|node| node.attributes.as_ref()).collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "totals": report.totals,
                    "nodes_calculated": report.nodes_calculated,
                    "failures": report.failures,
                    "nodes": nodes,
                }))?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record([
                    "ID", "Name", "Type", "λ active (/h)", "λ dormant (/h)", "MTBF mission (h)", "R mission", "Parts",
                    "Cost", "Overstress",
                ]);
                for node in tree.iter() {
                    let Some(attrs) = node.attributes.as_ref() else {
                        continue;
                    };
                    let depth = tree.depth(node.id).unwrap_or(0);
                    let name = format!("{}{}", "  ".repeat(depth), attrs.name);
                    let kind = if attrs.part { "part" } else { "assembly" };
                    builder.push_record([
                        node.id.to_string(),
                        name,
                        kind.to_string(),
                        format!("{:.4e}", attrs.hazard_rate_active),
                        format!("{:.4e}", attrs.hazard_rate_dormant),
                        format!("{:.1}", attrs.mtbf_mission),
                        format!("{:.6}", attrs.reliability_mission),
                        attrs.total_part_count.to_string(),
                        format!("{:.2}", attrs.total_cost),
                        if attrs.overstress { "yes" } else { "" }.to_string(),
                    ]);
                }
                let mut lines = vec![self.table(builder)];
                lines.push(self.info(&format!(
                    "{} node(s) calculated, system λ = {:.4e} failures/hour",
                    report.nodes_calculated, report.totals.hazard_rate_active
                )));
                if !report.failures.is_empty() {
                    lines.push(self.format_failures(&report.failures));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format one calculated item.
    pub fn format_item(&self, attrs: &ComponentAttributes, warnings: &[CalculationFailure]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "attributes": attrs,
                "warnings": warnings,
            }))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                let rows = [
                    ("Hazard rate, active (/h)", format!("{:.6e}", attrs.hazard_rate_active)),
                    ("Hazard rate, dormant (/h)", format!("{:.6e}", attrs.hazard_rate_dormant)),
                    ("Hazard rate, software (/h)", format!("{:.6e}", attrs.hazard_rate_software)),
                    ("Hazard rate, logistics (/h)", format!("{:.6e}", attrs.hazard_rate_logistics)),
                    ("Hazard rate, mission (/h)", format!("{:.6e}", attrs.hazard_rate_mission)),
                    ("MTBF, logistics (h)", format!("{:.2}", attrs.mtbf_logistics)),
                    ("MTBF, mission (h)", format!("{:.2}", attrs.mtbf_mission)),
                    ("Reliability, logistics", format!("{:.6}", attrs.reliability_logistics)),
                    ("Reliability, mission", format!("{:.6}", attrs.reliability_mission)),
                    ("Total cost", format!("{:.2}", attrs.total_cost)),
                    ("Cost per hour", format!("{:.6}", attrs.cost_hour)),
                    ("Part count", attrs.total_part_count.to_string()),
                    ("Power dissipation (W)", format!("{:.3}", attrs.total_power_dissipation)),
                ];
                for (metric, value) in rows {
                    builder.push_record([metric.to_string(), value]);
                }
                if !attrs.hazard_rate_model.is_empty() {
                    builder.push_record(["Model".to_string(), attrs.hazard_rate_model.clone()]);
                }
                for (factor, value) in &attrs.pi_factors {
                    builder.push_record([factor.clone(), format!("{:.4}", value)]);
                }

                let mut lines = vec![self.table(builder)];
                if !warnings.is_empty() {
                    lines.push(self.format_failures(warnings));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format allocated child targets.
    pub fn format_allocations(&self, records: &[AllocationRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => {
                if records.is_empty() {
                    return Ok(self.colorize("No children to allocate to.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Weight", "λ allocated (/h)", "MTBF allocated (h)", "R allocated"]);
                for record in records {
                    builder.push_record([
                        record.hardware_id.to_string(),
                        format!("{:.4}", record.weight_factor),
                        format!("{:.4e}", record.hazard_rate_alloc),
                        format!("{:.1}", record.mtbf_alloc),
                        format!("{:.6}", record.reliability_alloc),
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format a derating verdict.
    pub fn format_derating(&self, attrs: &ComponentAttributes) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "hardware_id": attrs.hardware_id,
                "current_ratio": attrs.current_ratio,
                "power_ratio": attrs.power_ratio,
                "voltage_ratio": attrs.voltage_ratio,
                "overstress": attrs.overstress,
                "reason": attrs.reason,
            }))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Ratio", "Value"]);
                builder.push_record(["Current".to_string(), format!("{:.3}", attrs.current_ratio)]);
                builder.push_record(["Power".to_string(), format!("{:.3}", attrs.power_ratio)]);
                builder.push_record(["Voltage".to_string(), format!("{:.3}", attrs.voltage_ratio)]);

                let mut lines = vec![self.table(builder)];
                if attrs.overstress {
                    lines.push(self.error(&format!("Hardware {} is overstressed", attrs.hardware_id)));
                    lines.extend(attrs.reason.iter().cloned());
                } else {
                    lines.push(self.success(&format!("Hardware {} is within derating limits", attrs.hardware_id)));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a Hazard Risk Index.
    pub fn format_hri(&self, probability: &str, severity: &str, hri: u32) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "probability": probability,
                "severity": severity,
                "hri": hri,
            }))?),
            OutputFormat::Table => Ok(format!("{} × {} → HRI {}", probability, severity, hri)),
        }
    }

    /// Format node-local failures, one line each.
    pub fn format_failures(&self, failures: &[CalculationFailure]) -> String {
        failures
            .iter()
            .map(|failure| self.warning(&failure.to_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
