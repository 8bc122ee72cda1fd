//! Interchangeable wordings for the narrative.
//!
//! Each family renders the same values; only the sentence shape varies.
//! The caller decides which family applies, the `PhraseSource` only
//! picks a variant within it.

use crate::rng::PhraseSource;

fn pick(rng: &mut dyn PhraseSource, variants: usize) -> usize {
    rng.choose(variants).min(variants - 1)
}

pub fn opening(
    rng: &mut dyn PhraseSource,
    total: u64,
    complaints: u64,
    key_finding: &str,
) -> String {
    let total = with_thousands(total);
    let complaints = with_thousands(complaints);
    match pick(rng, 3) {
        0 => format!("Analysis of {total} interactions ({complaints} complaints) reveals {key_finding}."),
        1 => format!("Review of {total} call center interactions shows {key_finding}."),
        _ => format!("Current period data ({total} interactions) indicates {key_finding}."),
    }
}

pub fn complaint_trend_up(
    rng: &mut dyn PhraseSource,
    change: f64,
    current: f64,
    top_driver: &str,
) -> String {
    match pick(rng, 2) {
        0 => format!(
            "Complaint rate increased {change:.1}% week-over-week to {current:.1}%, driven primarily by {top_driver}."
        ),
        _ => format!(
            "Complaints rose {change:.1}% WoW, reaching {current:.1}%. Primary contributor: {top_driver}."
        ),
    }
}

pub fn complaint_trend_down(rng: &mut dyn PhraseSource, change: f64, current: f64) -> String {
    match pick(rng, 2) {
        0 => format!("Complaint rate improved by {change:.1}% week-over-week, now at {current:.1}%."),
        _ => format!("Positive trend: complaints decreased {change:.1}% WoW to {current:.1}%."),
    }
}

pub fn complaint_trend_stable(change: f64, current: f64) -> String {
    format!("Complaint rate remains stable at {current:.1}% (±{change:.1}% WoW).")
}

pub fn fcr_concern(rng: &mut dyn PhraseSource, fcr: f64) -> String {
    match pick(rng, 2) {
        0 => format!("First Contact Resolution at {fcr:.1}% is below target, contributing to repeat contacts."),
        _ => format!("FCR rate of {fcr:.1}% indicates resolution challenges requiring attention."),
    }
}

pub fn agent_concentration(rng: &mut dyn PhraseSource, count: usize) -> String {
    match pick(rng, 2) {
        0 => format!("{count} root cause categories show agent concentration - targeted coaching recommended."),
        _ => format!("Agent-specific patterns detected in {count} categories, suggesting training gaps."),
    }
}

pub fn action_intro(rng: &mut dyn PhraseSource) -> &'static str {
    match pick(rng, 2) {
        0 => "**Recommended Priority Actions:**",
        _ => "**Immediate Actions Required:**",
    }
}

/// `1234567` → `"1,234,567"`.
pub fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
