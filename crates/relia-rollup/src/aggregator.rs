//! Bottom-up rollup of a hardware tree

use crate::pipeline::{calculate_assembly, calculate_part};
use crate::{RollupConfig, RollupMetrics, RollupTotals};
use relia_domain::{CalculationFailure, ComponentAttributes, FailureKind, HardwareTree, NodeId};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of one aggregation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RollupReport {
    /// Totals contributed by the starting node
    pub totals: RollupTotals,
    /// Node-local failures and warnings, in walk order
    pub failures: Vec<CalculationFailure>,
    /// Nodes whose attributes were rewritten
    pub nodes_calculated: usize,
}

impl RollupReport {
    /// Whether every node calculated without a failure or warning
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Tree aggregator: calculates every part and sums children into parents
///
/// Children are always processed before their parent. A failing node keeps
/// its stored values, contributes them upward, and the walk continues with
/// its siblings. Broken links (a child that does not exist, a cycle, a
/// child claimed by two parents) are reported against the parent and the
/// offending subtree contributes nothing.
///
/// # Examples
///
/// ```
/// use relia_domain::{ComponentAttributes, HardwareTree, NodeId};
/// use relia_rollup::{RollupConfig, TreeAggregator};
///
/// let mut tree = HardwareTree::new(NodeId::new(0));
/// tree.set_attributes(NodeId::new(0), ComponentAttributes::new_assembly(0, "System")).unwrap();
/// for (id, rate) in [(1, 0.001), (2, 0.002), (3, 0.003)] {
///     let mut part = ComponentAttributes::new_part(id, 9, 1);
///     part.hazard_rate_type_id = 2;
///     part.hazard_rate_specified = rate;
///     tree.insert(NodeId::new(id), NodeId::new(0), Some(part)).unwrap();
/// }
///
/// let mut aggregator = TreeAggregator::new(RollupConfig::rates_only());
/// let report = aggregator.calculate_all(&mut tree);
/// assert!(report.is_clean());
/// assert!((report.totals.hazard_rate_active - 0.006).abs() < 1e-12);
/// ```
pub struct TreeAggregator {
    config: RollupConfig,
    metrics: RollupMetrics,
}

impl TreeAggregator {
    /// Create a new aggregator with the given configuration
    pub fn new(config: RollupConfig) -> Self {
        Self {
            config,
            metrics: RollupMetrics::new(),
        }
    }

    /// Create an aggregator with default configuration
    pub fn default_config() -> Self {
        Self::new(RollupConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &RollupConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &RollupMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Recalculate the whole system from the root
    pub fn calculate_all(&mut self, tree: &mut HardwareTree) -> RollupReport {
        let root = tree.root();
        self.calculate_subtree(tree, root)
    }

    /// Recalculate `start` and everything below it
    ///
    /// An unknown `start` yields an empty report with one tree structure
    /// violation.
    pub fn calculate_subtree(&mut self, tree: &mut HardwareTree, start: NodeId) -> RollupReport {
        let timer = Instant::now();
        let mut report = RollupReport::default();

        if !tree.contains(start) {
            let failure = CalculationFailure::new(
                FailureKind::TreeStructureViolation,
                start.value(),
                "hierarchy",
                format!("node {} does not exist", start),
            );
            self.report_failure(&mut report, failure);
            return report;
        }

        let mut contributions: HashMap<NodeId, RollupTotals> = HashMap::new();
        for id in tree.post_order(start) {
            let children = self.collect_children(tree, id, &mut contributions, &mut report);
            let contribution = self.calculate_node(tree, id, children, &mut report);
            contributions.insert(id, contribution);
        }
        report.totals = contributions.remove(&start).unwrap_or_default();

        self.metrics.record_run();
        self.metrics.total_runtime_ms += timer.elapsed().as_millis();
        info!(
            start = %start,
            nodes = report.nodes_calculated,
            failures = report.failures.len(),
            hazard_rate_active = report.totals.hazard_rate_active,
            "rollup complete"
        );
        report
    }

    /// Sum the contributions of a node's children, consuming each one
    fn collect_children(
        &mut self,
        tree: &HardwareTree,
        id: NodeId,
        contributions: &mut HashMap<NodeId, RollupTotals>,
        report: &mut RollupReport,
    ) -> RollupTotals {
        let mut totals = RollupTotals::default();
        for child in tree.children(id) {
            let contribution = if tree.parent(*child) == Some(id) {
                contributions.remove(child)
            } else {
                None
            };
            match contribution {
                Some(contribution) => totals += contribution,
                None => {
                    let detail = if tree.contains(*child) {
                        format!(
                            "child {} of node {} is part of a cycle or belongs to another parent",
                            child, id
                        )
                    } else {
                        format!("child {} of node {} does not exist", child, id)
                    };
                    let failure = CalculationFailure::new(
                        FailureKind::TreeStructureViolation,
                        id.value(),
                        "hierarchy",
                        detail,
                    );
                    self.report_failure(report, failure);
                }
            }
        }
        totals
    }

    /// Calculate one node and return what it contributes to its parent
    fn calculate_node(
        &mut self,
        tree: &mut HardwareTree,
        id: NodeId,
        children: RollupTotals,
        report: &mut RollupReport,
    ) -> RollupTotals {
        let Some(stored) = tree.attributes(id).cloned() else {
            let failure = CalculationFailure::new(
                FailureKind::MissingCollaboratorData,
                id.value(),
                "attributes",
                format!("node {} has no attributes", id),
            );
            self.report_failure(report, failure);
            return children;
        };

        let outcome = if stored.part {
            calculate_part(&stored, &self.config)
        } else {
            calculate_assembly(&stored, &children, &self.config)
        };

        match outcome {
            Ok(result) => {
                for warning in result.warnings {
                    self.report_failure(report, warning);
                }
                let own = RollupTotals::from_attributes(&result.attributes);
                if tree.set_attributes(id, result.attributes).is_err() {
                    return self.fallback(&stored, children);
                }
                report.nodes_calculated += 1;
                if stored.part {
                    self.metrics.record_part();
                    children + own
                } else {
                    self.metrics.record_assembly();
                    own
                }
            }
            Err(failure) => {
                self.report_failure(report, failure);
                self.fallback(&stored, children)
            }
        }
    }

    /// Contribution of a node whose calculation did not complete
    fn fallback(&self, stored: &ComponentAttributes, children: RollupTotals) -> RollupTotals {
        let own = RollupTotals::from_attributes(stored);
        debug!(hardware_id = stored.hardware_id, "keeping stored values");
        if stored.part {
            children + own
        } else {
            own
        }
    }

    fn report_failure(&mut self, report: &mut RollupReport, failure: CalculationFailure) {
        warn!(
            hardware_id = failure.hardware_id,
            kind = %failure.kind,
            metric = %failure.metric,
            "{}",
            failure.message
        );
        self.metrics.record_failure(failure.kind);
        report.failures.push(failure);
    }
}
