//! Interaction classifier: assigns a root-cause label and confidence to
//! a single record.
//!
//! Two paths:
//!   1. Keyword scoring over the complaint text, one point per distinct
//!      catalog keyword found as a substring. Highest score wins; ties go
//!      to the category that comes first in the catalog.
//!   2. Context fallback from the call reason, with a pseudo-confidence
//!      derived from a pinned string hash so the same inputs always score
//!      the same across processes.
//!
//! The classifier never fails. Missing inputs degrade to the fallback.

use crate::{
    catalog::{RecommendedAction, RootCauseCategory},
    config::InsightConfig,
    interaction::Interaction,
    types::{round_to, RootCauseLabel},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const KEYWORD_BASE_CONFIDENCE: f64 = 0.6;
pub const KEYWORD_STEP: f64 = 0.07;
pub const KEYWORD_MAX_CONFIDENCE: f64 = 0.95;
pub const MAX_RECOMMENDED_ACTIONS: usize = 3;

/// Number of hundredths the fallback confidence can rise above its base,
/// keeping it inside [0.60, 0.80).
const FALLBACK_SPREAD: u64 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub root_cause_label: RootCauseLabel,
    pub root_cause_confidence: f64,
    pub root_cause_description: String,
    pub recommended_actions: Vec<RecommendedAction>,
}

pub struct InteractionClassifier {
    config: Arc<InsightConfig>,
}

impl InteractionClassifier {
    pub fn new(config: Arc<InsightConfig>) -> Self {
        Self { config }
    }

    pub fn classify(
        &self,
        text: Option<&str>,
        call_reason: Option<&str>,
        product: Option<&str>,
        is_complaint: bool,
    ) -> ClassificationResult {
        let text = text.filter(|t| !t.is_empty());
        if text.is_none() && !is_complaint {
            return self.classify_by_context(call_reason, product);
        }

        let lowered = text.unwrap_or_default().to_lowercase();
        let mut best: Option<(&RootCauseCategory, usize)> = None;
        for category in self.config.catalog.iter() {
            let score = keyword_score(category, &lowered);
            // Strictly greater keeps the first maximal category.
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((category, score));
            }
        }

        match best {
            Some((category, score)) => {
                let confidence =
                    (KEYWORD_BASE_CONFIDENCE + score as f64 * KEYWORD_STEP).min(KEYWORD_MAX_CONFIDENCE);
                result_for(category, round_to(confidence, 2))
            }
            None => {
                log::debug!("classifier: no keyword hits, falling back to call reason {call_reason:?}");
                self.classify_by_context(call_reason, product)
            }
        }
    }

    /// Classify a record and write the derived fields back onto it.
    pub fn classify_interaction(&self, interaction: &mut Interaction) -> ClassificationResult {
        let result = self.classify(
            interaction.complaint_text.as_deref(),
            interaction.call_reason.as_deref(),
            interaction.product.as_deref(),
            interaction.is_complaint,
        );
        interaction.root_cause_label = Some(result.root_cause_label.clone());
        interaction.root_cause_confidence = Some(result.root_cause_confidence);
        interaction.recommended_actions = result.recommended_actions.clone();
        result
    }

    fn classify_by_context(
        &self,
        call_reason: Option<&str>,
        product: Option<&str>,
    ) -> ClassificationResult {
        let fallback = &self.config.context_fallback;
        let label = fallback.label_for(call_reason);
        let confidence = context_confidence(call_reason, product);

        match self.config.catalog.get(label) {
            Some(category) => result_for(category, confidence),
            // Unreachable with a validated config; degrade rather than fail.
            None => ClassificationResult {
                root_cause_label: label.to_string(),
                root_cause_confidence: confidence,
                root_cause_description: String::new(),
                recommended_actions: Vec::new(),
            },
        }
    }
}

fn keyword_score(category: &RootCauseCategory, lowered_text: &str) -> usize {
    category
        .keywords
        .iter()
        .filter(|kw| lowered_text.contains(kw.to_lowercase().as_str()))
        .count()
}

fn result_for(category: &RootCauseCategory, confidence: f64) -> ClassificationResult {
    ClassificationResult {
        root_cause_label: category.label.clone(),
        root_cause_confidence: confidence,
        root_cause_description: category.description.clone(),
        recommended_actions: category
            .recommended_actions
            .iter()
            .take(MAX_RECOMMENDED_ACTIONS)
            .cloned()
            .collect(),
    }
}

/// Pseudo-confidence in [0.60, 0.80) for the context path.
/// Missing fields hash as empty strings.
pub fn context_confidence(call_reason: Option<&str>, product: Option<&str>) -> f64 {
    let key = format!(
        "{}{}",
        call_reason.unwrap_or_default(),
        product.unwrap_or_default()
    );
    let bump = stable_hash(&key) % FALLBACK_SPREAD;
    round_to(KEYWORD_BASE_CONFIDENCE + bump as f64 / 100.0, 2)
}

/// 64-bit FNV-1a over the UTF-8 bytes of `s`. Pinned so results are
/// identical across processes, platforms and releases.
pub fn stable_hash(s: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    s.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}
