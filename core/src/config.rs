use crate::{
    catalog::{RootCauseCatalog, DEFAULT_ROOT_CAUSE},
    error::{InsightError, InsightResult},
    types::RootCauseLabel,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ── Context fallback ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonMapping {
    pub call_reason: String,
    pub root_cause: RootCauseLabel,
}

/// Call reason → category lookup used when keyword scoring finds nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextFallback {
    pub mappings: Vec<ReasonMapping>,
    pub default_label: RootCauseLabel,
}

impl ContextFallback {
    pub fn label_for(&self, call_reason: Option<&str>) -> &str {
        call_reason
            .and_then(|reason| self.mappings.iter().find(|m| m.call_reason == reason))
            .map(|m| m.root_cause.as_str())
            .unwrap_or(self.default_label.as_str())
    }

    pub fn standard() -> Self {
        let pairs = [
            ("Digital Access", "Digital/App Experience"),
            ("Disputes & Issues", "Fraud & Disputes"),
            ("Payments & Transactions", "Processing Delays"),
            ("Account Maintenance", "Documentation / KYC Friction"),
            ("New Business", "Policy/Fees Confusion"),
            ("Existing Business", "Service Experience"),
            ("Information Request", "Incorrect Info / Agent Knowledge Gap"),
        ];
        Self {
            mappings: pairs
                .iter()
                .map(|(reason, label)| ReasonMapping {
                    call_reason: reason.to_string(),
                    root_cause: label.to_string(),
                })
                .collect(),
            default_label: DEFAULT_ROOT_CAUSE.into(),
        }
    }
}

// ── Thresholds ─────────────────────────────────────────────────────

/// Static anomaly thresholds. All comparisons against them are strict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyThresholds {
    /// Complaint rate (%) considered high.
    pub complaint_rate_high: f64,
    /// Week-over-week complaint rate change (percentage points) considered significant.
    pub complaint_rate_change: f64,
    /// FCR rate (%) considered low.
    pub fcr_rate_low: f64,
    /// Average handling time (minutes) considered high.
    pub aht_high: f64,
    /// Escalation rate (%) considered high.
    pub escalation_high: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            complaint_rate_high: 25.0,
            complaint_rate_change: 10.0,
            fcr_rate_low: 65.0,
            aht_high: 12.0,
            escalation_high: 15.0,
        }
    }
}

// ── Analysis limits ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Top-agent share at or above which a root cause is agent-concentrated.
    pub concentration_threshold: f64,
    pub top_agent_count: usize,
    pub example_count: usize,
    pub example_max_chars: usize,
    /// Records handed to root-cause analysis when a batch has no complaints.
    pub max_unfiltered_records: usize,
    pub max_actions: usize,
    pub max_rendered_details: usize,
    pub max_rendered_actions: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            concentration_threshold: 0.4,
            top_agent_count: 3,
            example_count: 3,
            example_max_chars: 150,
            max_unfiltered_records: 500,
            max_actions: 5,
            max_rendered_details: 3,
            max_rendered_actions: 3,
        }
    }
}

// ── Top level ──────────────────────────────────────────────────────

/// Everything the pipeline reads. Built once, wrapped in an `Arc`,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    pub catalog: RootCauseCatalog,
    pub context_fallback: ContextFallback,
    #[serde(default)]
    pub thresholds: AnomalyThresholds,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

impl InsightConfig {
    /// Built-in tables.
    pub fn standard() -> Self {
        Self {
            catalog: RootCauseCatalog::standard(),
            context_fallback: ContextFallback::standard(),
            thresholds: AnomalyThresholds::default(),
            analysis: AnalysisSettings::default(),
        }
    }

    /// Parse a JSON override. The caller owns file access.
    pub fn from_json(content: &str) -> InsightResult<Self> {
        let config: InsightConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> InsightResult<()> {
        if self.catalog.is_empty() {
            return Err(InsightError::InvalidConfig {
                reason: "catalog has no categories".into(),
            });
        }

        let mut seen = HashSet::new();
        for category in self.catalog.iter() {
            if !seen.insert(category.label.as_str()) {
                return Err(InsightError::DuplicateCategory {
                    label: category.label.clone(),
                });
            }
        }

        let fallback = &self.context_fallback;
        let targets = std::iter::once(&fallback.default_label)
            .chain(fallback.mappings.iter().map(|m| &m.root_cause));
        for label in targets {
            if !self.catalog.contains(label) {
                return Err(InsightError::UnknownFallbackLabel {
                    label: label.clone(),
                });
            }
        }

        let t = &self.thresholds;
        let all_finite = [
            t.complaint_rate_high,
            t.complaint_rate_change,
            t.fcr_rate_low,
            t.aht_high,
            t.escalation_high,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(InsightError::InvalidConfig {
                reason: "anomaly thresholds must be finite".into(),
            });
        }

        let share = self.analysis.concentration_threshold;
        if !(share > 0.0 && share <= 1.0) {
            return Err(InsightError::InvalidConfig {
                reason: format!("concentration_threshold {share} outside (0, 1]"),
            });
        }

        Ok(())
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self::standard()
    }
}
