use contact_insight_core::{
    catalog::DEFAULT_ROOT_CAUSE,
    classifier::{context_confidence, KEYWORD_MAX_CONFIDENCE},
    engine::InsightEngine,
    interaction::Interaction,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

const CALL_REASONS: [&str; 7] = [
    "New Business",
    "Existing Business",
    "Account Maintenance",
    "Payments & Transactions",
    "Digital Access",
    "Disputes & Issues",
    "Information Request",
];

const PRODUCTS: [&str; 4] = ["Checking Account", "Credit Card", "Mortgage", "Auto Loan"];

// ── Keyword path ─────────────────────────────────────────────────────────────

#[test]
fn classification_is_pure() {
    let engine = InsightEngine::standard();
    let a = engine.classify(Some("App crashed on login"), Some("Digital Access"), Some("Checking Account"), true);
    let b = engine.classify(Some("App crashed on login"), Some("Digital Access"), Some("Checking Account"), true);
    assert_eq!(a, b, "Same inputs must classify identically");
}

#[test]
fn keyword_score_drives_confidence() {
    let engine = InsightEngine::standard();
    // app, crash, login
    let result = engine.classify(Some("App crashed on LOGIN"), None, None, true);
    assert_eq!(result.root_cause_label, "Digital/App Experience");
    assert_eq!(result.root_cause_confidence, 0.81);
    assert_eq!(result.recommended_actions.len(), 3);
    assert!(!result.root_cause_description.is_empty());
}

#[test]
fn keyword_confidence_is_capped() {
    let engine = InsightEngine::standard();
    let result = engine.classify(
        Some("app login error crash password otp mobile online"),
        None,
        None,
        true,
    );
    assert_eq!(result.root_cause_label, "Digital/App Experience");
    assert_eq!(result.root_cause_confidence, KEYWORD_MAX_CONFIDENCE);
}

#[test]
fn score_ties_go_to_first_catalog_category() {
    let engine = InsightEngine::standard();
    // One keyword each for Policy/Fees and Digital/App; Policy comes first.
    let result = engine.classify(Some("fee app"), Some("Digital Access"), None, true);
    assert_eq!(result.root_cause_label, "Policy/Fees Confusion");
    assert_eq!(result.root_cause_confidence, 0.67);
}

// ── Context fallback ─────────────────────────────────────────────────────────

#[test]
fn complaint_without_keyword_hits_uses_call_reason() {
    let engine = InsightEngine::standard();
    let result = engine.classify(Some("hello there"), Some("Digital Access"), Some("Credit Card"), true);
    assert_eq!(result.root_cause_label, "Digital/App Experience");
    assert_eq!(
        result.root_cause_confidence,
        context_confidence(Some("Digital Access"), Some("Credit Card"))
    );
}

#[test]
fn non_complaint_without_text_skips_keywords() {
    let engine = InsightEngine::standard();
    let result = engine.classify(None, Some("Disputes & Issues"), Some("Credit Card"), false);
    assert_eq!(result.root_cause_label, "Fraud & Disputes");
}

#[test]
fn empty_text_counts_as_absent() {
    let engine = InsightEngine::standard();
    let empty = engine.classify(Some(""), Some("New Business"), Some("Mortgage"), false);
    let absent = engine.classify(None, Some("New Business"), Some("Mortgage"), false);
    assert_eq!(empty, absent);
    assert_eq!(empty.root_cause_label, "Policy/Fees Confusion");
}

#[test]
fn unmapped_or_missing_reason_defaults() {
    let engine = InsightEngine::standard();
    let unmapped = engine.classify(None, Some("Something Else"), None, false);
    let missing = engine.classify(None, None, None, false);
    let complaint = engine.classify(None, None, None, true);
    assert_eq!(unmapped.root_cause_label, DEFAULT_ROOT_CAUSE);
    assert_eq!(missing.root_cause_label, DEFAULT_ROOT_CAUSE);
    assert_eq!(complaint.root_cause_label, DEFAULT_ROOT_CAUSE);
}

#[test]
fn fallback_confidence_stays_in_band() {
    let engine = InsightEngine::standard();
    for reason in CALL_REASONS {
        for product in PRODUCTS {
            let result = engine.classify(None, Some(reason), Some(product), false);
            let c = result.root_cause_confidence;
            assert!(
                (0.6..0.8).contains(&c),
                "fallback confidence {c} out of [0.6, 0.8) for {reason}/{product}"
            );
            assert_eq!(c, context_confidence(Some(reason), Some(product)));
        }
    }
}

#[test]
fn keyword_confidence_stays_in_band() {
    let engine = InsightEngine::standard();
    let texts = [
        "fee",
        "wrong answer, agent said otherwise and told me to wait",
        "fraud dispute unauthorized chargeback stolen identity theft",
        "pending approval for days",
    ];
    for text in texts {
        let c = engine.classify(Some(text), None, None, true).root_cause_confidence;
        assert!((0.6..=0.95).contains(&c), "keyword confidence {c} out of range for {text:?}");
    }
}

// ── Record write-back ────────────────────────────────────────────────────────

#[test]
fn classify_all_fills_derived_fields() {
    let engine = InsightEngine::standard();
    let mut records = vec![
        Interaction {
            is_complaint: true,
            complaint_text: Some("My card was stolen by someone".into()),
            ..Interaction::default()
        },
        Interaction {
            call_reason: Some("Account Maintenance".into()),
            ..Interaction::default()
        },
    ];

    engine.classify_all(&mut records);

    assert_eq!(records[0].root_cause_label.as_deref(), Some("Fraud & Disputes"));
    assert_eq!(records[0].root_cause_confidence, Some(0.67));
    assert_eq!(records[0].recommended_actions.len(), 3);
    assert_eq!(
        records[1].root_cause_label.as_deref(),
        Some("Documentation / KYC Friction")
    );
    assert!(records[1].root_cause_confidence.is_some());
}
