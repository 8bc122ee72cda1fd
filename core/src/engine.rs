//! The insight engine: one entry point over every pipeline stage.
//!
//! EXECUTION ORDER for `summarize` (fixed, never reordered):
//!   1. Metrics snapshot over the whole batch
//!   2. Root-cause aggregation (`root_cause_report`)
//!   3. Anomaly detection over the snapshot
//!   4. Action prioritization     (inside the narrative stage)
//!   5. Narrative assembly
//!
//! RULES:
//!   - Every component shares one immutable `Arc<InsightConfig>`.
//!   - Records are read-only here except for the `classify_*` methods.
//!   - All wording randomness flows through the caller's `PhraseSource`.
//!   - Filter context is carried through verbatim, never interpreted.

use crate::{
    action_prioritizer::{ActionPrioritizer, PrioritizedAction},
    anomaly_detection::{Anomaly, AnomalyDetector},
    classifier::{ClassificationResult, InteractionClassifier},
    config::InsightConfig,
    deep_dive::{minimal_root_cause, DeepDiveAnalyzer, EnhancedRootCause},
    error::InsightResult,
    interaction::{AgentDirectory, Interaction},
    metrics::{MetricsSnapshot, PeriodComparison},
    narrative::{ExecutiveSummary, NarrativeAssembler},
    rng::PhraseSource,
    root_cause_analysis::{AggregatedRootCause, RootCauseAnalyzer, RootCauseReport},
    types::FilterContext,
};
use std::sync::Arc;

pub struct InsightEngine {
    config:      Arc<InsightConfig>,
    classifier:  InteractionClassifier,
    analyzer:    RootCauseAnalyzer,
    detector:    AnomalyDetector,
    prioritizer: ActionPrioritizer,
    narrative:   NarrativeAssembler,
    deep_dive:   DeepDiveAnalyzer,
}

impl InsightEngine {
    /// Validate `config` and wire every component to it.
    pub fn new(config: InsightConfig) -> InsightResult<Self> {
        config.validate()?;
        Ok(Self::with_shared(Arc::new(config)))
    }

    /// Wire components to an already-validated shared config.
    pub fn with_shared(config: Arc<InsightConfig>) -> Self {
        Self {
            classifier:  InteractionClassifier::new(config.clone()),
            analyzer:    RootCauseAnalyzer::new(config.clone()),
            detector:    AnomalyDetector::new(config.clone()),
            prioritizer: ActionPrioritizer::new(config.clone()),
            narrative:   NarrativeAssembler::new(config.clone()),
            deep_dive:   DeepDiveAnalyzer::new(config.clone()),
            config,
        }
    }

    /// Engine over the built-in catalog and thresholds.
    pub fn standard() -> Self {
        Self::with_shared(Arc::new(InsightConfig::standard()))
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    pub fn classify(
        &self,
        text: Option<&str>,
        call_reason: Option<&str>,
        product: Option<&str>,
        is_complaint: bool,
    ) -> ClassificationResult {
        self.classifier.classify(text, call_reason, product, is_complaint)
    }

    pub fn classify_interaction(&self, interaction: &mut Interaction) -> ClassificationResult {
        self.classifier.classify_interaction(interaction)
    }

    /// Fill the derived classification fields on every record.
    pub fn classify_all(&self, interactions: &mut [Interaction]) {
        for interaction in interactions.iter_mut() {
            self.classifier.classify_interaction(interaction);
        }
        log::debug!("classified {} interactions", interactions.len());
    }

    pub fn metrics(&self, interactions: &[Interaction]) -> MetricsSnapshot {
        MetricsSnapshot::from_interactions(interactions)
    }

    pub fn compare(&self, current: &[Interaction], previous: &[Interaction]) -> PeriodComparison {
        PeriodComparison::between(&self.metrics(current), &self.metrics(previous))
    }

    pub fn analyze<'a, I>(&self, interactions: I, agents: &AgentDirectory) -> RootCauseReport
    where
        I: IntoIterator<Item = &'a Interaction>,
    {
        self.analyzer.analyze(interactions, agents)
    }

    pub fn detect_anomalies(&self, metrics: &MetricsSnapshot) -> Vec<Anomaly> {
        self.detector.detect(metrics)
    }

    pub fn prioritize(
        &self,
        root_causes: &[AggregatedRootCause],
        anomalies: &[Anomaly],
        metrics: &MetricsSnapshot,
    ) -> Vec<PrioritizedAction> {
        self.prioritizer.prioritize(root_causes, anomalies, metrics)
    }

    /// Root-cause report over the batch's complaints. A batch without
    /// complaints is analyzed over its first `max_unfiltered_records`
    /// records instead.
    pub fn root_cause_report(
        &self,
        interactions: &[Interaction],
        agents: &AgentDirectory,
    ) -> RootCauseReport {
        if interactions.iter().any(|i| i.is_complaint) {
            self.analyzer
                .analyze(interactions.iter().filter(|i| i.is_complaint), agents)
        } else {
            let limit = self.config.analysis.max_unfiltered_records;
            self.analyzer.analyze(interactions.iter().take(limit), agents)
        }
    }

    /// Full executive summary for one batch.
    pub fn summarize(
        &self,
        interactions: &[Interaction],
        agents: &AgentDirectory,
        comparison: Option<&PeriodComparison>,
        filters: Option<&FilterContext>,
        rng: &mut dyn PhraseSource,
    ) -> ExecutiveSummary {
        if interactions.is_empty() {
            log::info!("summarize: empty batch, returning no-data summary");
            return ExecutiveSummary::no_data(filters);
        }

        let metrics = self.metrics(interactions);
        let report = self.root_cause_report(interactions, agents);
        let anomalies = self.detector.detect(&metrics);

        self.narrative.assemble(
            &metrics,
            &report.root_causes,
            &anomalies,
            comparison,
            filters,
            rng,
        )
    }

    /// Deep dive into one root cause over its complaint records. `None`
    /// when no complaint carries `label`.
    pub fn deep_dive(
        &self,
        label: &str,
        interactions: &[Interaction],
        agents: &AgentDirectory,
        rng: &mut dyn PhraseSource,
    ) -> Option<EnhancedRootCause> {
        let matching: Vec<&Interaction> = interactions
            .iter()
            .filter(|i| i.is_complaint && i.root_cause_label.as_deref() == Some(label))
            .collect();
        if matching.is_empty() {
            log::info!("deep dive: no complaints labelled '{label}'");
            return None;
        }

        let report = self.analyzer.analyze(matching.iter().copied(), agents);
        let base = report
            .root_causes
            .into_iter()
            .find(|rc| rc.root_cause_label == label)
            .unwrap_or_else(|| minimal_root_cause(label, matching.len() as u64));

        Some(self.deep_dive.enhance(&base, matching.iter().copied(), rng))
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::standard()
    }
}
