//! Action prioritization: merges catalog actions for the top root causes
//! with anomaly-driven actions into one ranked, deduplicated list.
//!
//! RULE: an action's text is its identity. The first occurrence wins and
//! later duplicates are dropped along with their metadata. Priority is
//! insertion order, so higher-ranked root causes claim shared actions.

use crate::{
    anomaly_detection::{has_anomaly, Anomaly, AnomalyKind},
    catalog::Tier,
    config::InsightConfig,
    metrics::MetricsSnapshot,
    root_cause_analysis::AggregatedRootCause,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, sync::Arc};

/// Root causes considered, in rank order.
pub const TOP_ROOT_CAUSES: usize = 3;
/// Templates taken from each considered root cause.
pub const TEMPLATES_PER_ROOT_CAUSE: usize = 2;

const FCR_ACTION: &str = "Review resolution workflows and knowledge base coverage";
const FCR_SOURCE: &str = "FCR Gap";
const FCR_TARGET: f64 = 70.0;

const ESCALATION_ACTION: &str = "Review escalation criteria and agent authorization levels";
const ESCALATION_SOURCE: &str = "Escalation Rate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedAction {
    pub text: String,
    pub impact: Tier,
    pub effort: Tier,
    pub root_cause: String,
    pub estimated_impact: String,
    pub priority: usize,
}

pub struct ActionPrioritizer {
    config: Arc<InsightConfig>,
}

impl ActionPrioritizer {
    pub fn new(config: Arc<InsightConfig>) -> Self {
        Self { config }
    }

    /// `root_causes` must already be ranked by impact score.
    pub fn prioritize(
        &self,
        root_causes: &[AggregatedRootCause],
        anomalies: &[Anomaly],
        metrics: &MetricsSnapshot,
    ) -> Vec<PrioritizedAction> {
        let mut list = ActionList::default();

        for rc in root_causes.iter().take(TOP_ROOT_CAUSES) {
            let Some(category) = self.config.catalog.get(&rc.root_cause_label) else {
                log::warn!(
                    "action prioritizer: label '{}' not in catalog, skipped",
                    rc.root_cause_label
                );
                continue;
            };
            let estimated_impact = complaint_reduction_estimate(rc.percentage);
            for template in category.action_templates.iter().take(TEMPLATES_PER_ROOT_CAUSE) {
                list.push(
                    &template.text,
                    template.impact,
                    template.effort,
                    &rc.root_cause_label,
                    estimated_impact.clone(),
                );
            }
        }

        if has_anomaly(anomalies, AnomalyKind::LowFcr) {
            list.push(
                FCR_ACTION,
                Tier::High,
                Tier::Medium,
                FCR_SOURCE,
                format!("+{}% FCR improvement", ((FCR_TARGET - metrics.fcr_rate) * 0.5) as i64),
            );
        }

        if has_anomaly(anomalies, AnomalyKind::HighEscalation) {
            list.push(
                ESCALATION_ACTION,
                Tier::Medium,
                Tier::Low,
                ESCALATION_SOURCE,
                format!("-{}% escalations", (metrics.escalation_rate * 0.2) as i64),
            );
        }

        let mut actions = list.actions;
        actions.sort_by_key(|a| a.priority);
        actions.truncate(self.config.analysis.max_actions);
        actions
    }
}

/// Estimated complaint reduction for a root cause holding `percentage`
/// of all complaints. Bounds are truncated to whole percents.
pub fn complaint_reduction_estimate(percentage: f64) -> String {
    if percentage > 20.0 {
        format!("-{}-{}% complaints", (percentage * 0.3) as i64, (percentage * 0.5) as i64)
    } else if percentage > 10.0 {
        format!("-{}-{}% complaints", (percentage * 0.2) as i64, (percentage * 0.3) as i64)
    } else {
        "Incremental improvement".into()
    }
}

#[derive(Default)]
struct ActionList {
    seen: HashSet<String>,
    actions: Vec<PrioritizedAction>,
}

impl ActionList {
    fn push(
        &mut self,
        text: &str,
        impact: Tier,
        effort: Tier,
        root_cause: &str,
        estimated_impact: String,
    ) {
        if !self.seen.insert(text.to_string()) {
            return;
        }
        self.actions.push(PrioritizedAction {
            text: text.to_string(),
            impact,
            effort,
            root_cause: root_cause.to_string(),
            estimated_impact,
            priority: self.actions.len() + 1,
        });
    }
}
