use contact_insight_core::{
    anomaly_detection::AnomalyKind,
    config::{AnalysisSettings, InsightConfig},
    engine::InsightEngine,
    interaction::{AgentDirectory, AgentProfile, Interaction},
    narrative::{NO_DATA_MESSAGE, SUMMARY_CONFIDENCE},
    rng::{FirstPhrase, SeededPhrases},
};
use serde_json::json;

// ── Helpers ──────────────────────────────────────────────────────────────────

const TEXTS: [&str; 5] = [
    "App crashed during login",
    "Charged an overdraft fee without warning",
    "Transfer still pending after days",
    "Unauthorized charge on my card",
    "Agent was rude and put me on hold",
];

fn week(n: usize) -> Vec<Interaction> {
    (0..n)
        .map(|i| {
            let is_complaint = i % 3 == 0;
            Interaction {
                interaction_id: format!("int-{i}"),
                is_complaint,
                complaint_text: is_complaint.then(|| TEXTS[i % TEXTS.len()].to_string()),
                call_reason: Some("Existing Business".into()),
                agent_id: Some(format!("AGT{:04}", i % 8 + 1)),
                handling_time_seconds: 240 + (i as u32 % 7) * 60,
                resolved_on_first_contact: i % 4 != 0,
                escalated: i % 9 == 0,
                ..Interaction::default()
            }
        })
        .collect()
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn roster() -> AgentDirectory {
    (1..=8)
        .map(|n| AgentProfile {
            agent_id: format!("AGT{n:04}"),
            agent_name: format!("Agent {n}"),
            ..AgentProfile::default()
        })
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_summary() {
    init_logging();
    let engine = InsightEngine::standard();
    let mut current = week(120);
    let mut previous = week(90);
    engine.classify_all(&mut current);
    engine.classify_all(&mut previous);
    let comparison = engine.compare(&current, &previous);

    let a = engine.summarize(&current, &roster(), Some(&comparison), None, &mut SeededPhrases::new(7));
    let b = engine.summarize(&current, &roster(), Some(&comparison), None, &mut SeededPhrases::new(7));

    assert_eq!(a, b, "identical inputs and seed must give identical summaries");
    assert_eq!(a.confidence, SUMMARY_CONFIDENCE);
    assert!(!a.actions.is_empty());
    assert!(a.actions.len() <= 5);
}

#[test]
fn summary_carries_detected_anomalies() {
    init_logging();
    let engine = InsightEngine::standard();
    let mut records = week(60);
    engine.classify_all(&mut records);

    let summary = engine.summarize(&records, &roster(), None, None, &mut FirstPhrase);

    let expected = engine.detect_anomalies(&engine.metrics(&records));
    assert_eq!(summary.anomalies, expected);
    // Every third record is a complaint: 33.3% clears the 25% threshold.
    assert_eq!(summary.anomalies.len(), 1, "{:?}", summary.anomalies);
    assert_eq!(summary.anomalies[0].kind, AnomalyKind::HighComplaintRate);
}

#[test]
fn empty_batch_short_circuits() {
    let engine = InsightEngine::standard();
    let filters = json!({ "segment": "Affluent" });

    let summary = engine.summarize(&[], &roster(), None, Some(&filters), &mut FirstPhrase);

    assert_eq!(summary.key_finding, NO_DATA_MESSAGE);
    assert_eq!(summary.confidence, 0.0);
    assert_eq!(summary.filter_context, Some(filters));
}

#[test]
fn batch_without_complaints_analyzes_a_bounded_prefix() {
    init_logging();
    let config = InsightConfig {
        analysis: AnalysisSettings {
            max_unfiltered_records: 2,
            ..AnalysisSettings::default()
        },
        ..InsightConfig::standard()
    };
    let engine = InsightEngine::new(config).unwrap();

    let labelled = |label: &str| Interaction {
        root_cause_label: Some(label.into()),
        resolved_on_first_contact: true,
        handling_time_seconds: 300,
        ..Interaction::default()
    };
    let mut records = vec![labelled("Processing Delays"), labelled("Processing Delays")];
    records.extend((0..5).map(|_| labelled("Fraud & Disputes")));

    let summary = engine.summarize(&records, &AgentDirectory::new(), None, None, &mut FirstPhrase);

    assert_eq!(
        summary.key_finding,
        "stable operations with Processing Delays as top focus area"
    );
    assert!(summary.actions.iter().all(|a| a.root_cause != "Fraud & Disputes"));
}

#[test]
fn report_without_complaints_matches_summary() {
    let config = InsightConfig {
        analysis: AnalysisSettings {
            max_unfiltered_records: 3,
            ..AnalysisSettings::default()
        },
        ..InsightConfig::standard()
    };
    let engine = InsightEngine::new(config).unwrap();
    let labels = [
        "Processing Delays",
        "Processing Delays",
        "Fraud & Disputes",
        "Fraud & Disputes",
        "Fraud & Disputes",
    ];
    let records: Vec<Interaction> = labels
        .into_iter()
        .map(|label| Interaction {
            root_cause_label: Some(label.into()),
            resolved_on_first_contact: true,
            handling_time_seconds: 300,
            ..Interaction::default()
        })
        .collect();

    let report = engine.root_cause_report(&records, &AgentDirectory::new());
    let summary = engine.summarize(&records, &AgentDirectory::new(), None, None, &mut FirstPhrase);

    assert_eq!(report.total_analyzed, 3, "bounded to the first three records");
    assert_eq!(report.total_complaints, 0);
    let ranked: Vec<&str> = report.root_causes.iter().map(|rc| rc.root_cause_label.as_str()).collect();
    assert_eq!(ranked, vec!["Processing Delays", "Fraud & Disputes"]);
    assert_eq!(
        summary.key_finding,
        format!("stable operations with {} as top focus area", ranked[0])
    );
}

#[test]
fn report_with_complaints_ignores_other_contacts() {
    let engine = InsightEngine::standard();
    let mut records = week(30);
    engine.classify_all(&mut records);

    let report = engine.root_cause_report(&records, &roster());

    assert_eq!(report.total_analyzed, 10);
    assert_eq!(report.total_complaints, 10);
}

#[test]
fn filters_pass_through_untouched() {
    let engine = InsightEngine::standard();
    let mut records = week(30);
    engine.classify_all(&mut records);
    let filters = json!({ "region": ["East", "West"], "from": "2025-03-03" });

    let summary = engine.summarize(&records, &roster(), None, Some(&filters), &mut FirstPhrase);

    assert_eq!(summary.filter_context, Some(filters));
    let rendered = serde_json::to_value(&summary).unwrap();
    assert_eq!(rendered["filter_context"]["region"][1], "West");
}

#[test]
fn classify_all_fills_every_record() {
    let engine = InsightEngine::standard();
    let mut records = week(30);

    engine.classify_all(&mut records);

    for record in &records {
        assert!(record.root_cause_label.is_some(), "{} unlabelled", record.interaction_id);
        let confidence = record.root_cause_confidence.unwrap_or_default();
        assert!((0.6..=0.95).contains(&confidence), "{confidence}");
    }
}
