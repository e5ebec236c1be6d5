//! Metrics collection for rollup runs

use relia_domain::FailureKind;
use std::collections::HashMap;

/// Counters collected across aggregator runs
#[derive(Debug, Clone, Default)]
pub struct RollupMetrics {
    /// Parts taken through the full pipeline
    pub parts_calculated: usize,

    /// Assemblies overwritten with their children's totals
    pub assemblies_calculated: usize,

    /// Failures per kind
    pub failures: HashMap<FailureKind, usize>,

    /// Completed runs
    pub run_count: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u128,
}

impl RollupMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a part calculation
    pub fn record_part(&mut self) {
        self.parts_calculated += 1;
    }

    /// Record an assembly calculation
    pub fn record_assembly(&mut self) {
        self.assemblies_calculated += 1;
    }

    /// Record a failure
    pub fn record_failure(&mut self, kind: FailureKind) {
        *self.failures.entry(kind).or_insert(0) += 1;
    }

    /// Record a completed run
    pub fn record_run(&mut self) {
        self.run_count += 1;
    }

    /// Nodes calculated, parts and assemblies together
    pub fn total_calculated(&self) -> usize {
        self.parts_calculated + self.assemblies_calculated
    }

    /// Failures of every kind
    pub fn total_failures(&self) -> usize {
        self.failures.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Rollup Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Runs: {}", self.run_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            format!("Parts calculated: {}", self.parts_calculated),
            format!("Assemblies calculated: {}", self.assemblies_calculated),
        ];

        if !self.failures.is_empty() {
            lines.push(String::new());
            lines.push("Failures by kind:".to_string());
            let mut kinds: Vec<_> = self.failures.iter().collect();
            kinds.sort_by_key(|(kind, _)| kind.to_string());
            for (kind, count) in kinds {
                lines.push(format!("  {}: {}", kind, count));
            }
            lines.push(format!("  Total: {}", self.total_failures()));
        }

        lines.join("\n")
    }
}
