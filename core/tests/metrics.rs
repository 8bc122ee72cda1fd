use contact_insight_core::{
    engine::InsightEngine,
    interaction::{ComplaintSeverity, Interaction},
    metrics::{MetricDelta, MetricsSnapshot, PeriodComparison, Trend},
};

fn batch() -> Vec<Interaction> {
    vec![
        Interaction {
            is_complaint: true,
            complaint_severity: Some(ComplaintSeverity::High),
            resolved_on_first_contact: true,
            handling_time_seconds: 300,
            estimated_cost_dollars: 5.0,
            digital_eligible: true,
            deflection_attempted: true,
            deflection_success: true,
            ..Interaction::default()
        },
        Interaction {
            is_complaint: true,
            complaint_severity: Some(ComplaintSeverity::Low),
            escalated: true,
            transfer_count: 2,
            handling_time_seconds: 600,
            estimated_cost_dollars: 7.5,
            digital_eligible: true,
            deflection_attempted: true,
            ..Interaction::default()
        },
        Interaction {
            resolved_on_first_contact: true,
            handling_time_seconds: 180,
            estimated_cost_dollars: 2.5,
            ..Interaction::default()
        },
        // High severity on a non-complaint does not count.
        Interaction {
            complaint_severity: Some(ComplaintSeverity::High),
            handling_time_seconds: 120,
            ..Interaction::default()
        },
    ]
}

#[test]
fn snapshot_rates_over_small_batch() {
    let m = MetricsSnapshot::from_interactions(&batch());

    assert_eq!(m.total_interactions, 4);
    assert_eq!(m.total_complaints, 2);
    assert_eq!(m.complaint_rate, 50.0);
    assert_eq!(m.fcr_rate, 50.0);
    assert_eq!(m.escalation_rate, 25.0);
    assert_eq!(m.transfer_rate, 25.0);
    assert_eq!(m.avg_handling_time_minutes, 5.0);
    assert_eq!(m.digital_deflection_rate, 50.0, "one of two eligible deflected");
    assert_eq!(m.cost_per_call, 3.75);
    assert_eq!(m.total_cost, 15.0);
    assert_eq!(m.high_severity_count, 1);
}

#[test]
fn empty_batch_is_all_zero() {
    let m = MetricsSnapshot::from_interactions(&[]);
    assert_eq!(m, MetricsSnapshot::default());
}

#[test]
fn no_eligible_contacts_means_zero_deflection() {
    let records = vec![Interaction {
        deflection_success: true,
        ..Interaction::default()
    }];
    let m = MetricsSnapshot::from_interactions(&records);
    assert_eq!(m.digital_deflection_rate, 0.0);
}

#[test]
fn rates_round_to_one_decimal() {
    let records: Vec<Interaction> = (0..3)
        .map(|n| Interaction {
            is_complaint: n == 0,
            handling_time_seconds: 100,
            ..Interaction::default()
        })
        .collect();
    let m = MetricsSnapshot::from_interactions(&records);
    assert_eq!(m.complaint_rate, 33.3);
    assert_eq!(m.avg_handling_time_minutes, 1.67);
}

// ── Period comparison ────────────────────────────────────────────────────────

#[test]
fn delta_direction_depends_on_metric() {
    let complaints = MetricDelta::between("complaint_rate", 50.0, 40.0);
    assert_eq!(complaints.absolute, 10.0);
    assert_eq!(complaints.percentage, 25.0);
    assert_eq!(complaints.trend, Trend::Up);
    assert_eq!(complaints.is_positive, Some(false), "more complaints is bad");

    let fcr = MetricDelta::between("fcr_rate", 50.0, 60.0);
    assert_eq!(fcr.absolute, -10.0);
    assert_eq!(fcr.percentage, -16.7);
    assert_eq!(fcr.trend, Trend::Down);
    assert_eq!(fcr.is_positive, Some(false), "less FCR is bad");

    let aht = MetricDelta::between("avg_handling_time_minutes", 4.0, 6.0);
    assert_eq!(aht.is_positive, Some(true), "shorter handling is good");
}

#[test]
fn flat_delta_has_no_polarity() {
    let delta = MetricDelta::between("escalation_rate", 12.0, 12.0);
    assert_eq!(delta.trend, Trend::Flat);
    assert_eq!(delta.is_positive, None);
}

#[test]
fn zero_previous_value_gives_zero_percentage() {
    let delta = MetricDelta::between("total_interactions", 4.0, 0.0);
    assert_eq!(delta.absolute, 4.0);
    assert_eq!(delta.percentage, 0.0);
    assert_eq!(delta.trend, Trend::Up);
}

#[test]
fn compare_covers_every_metric() {
    let engine = InsightEngine::standard();
    let previous: Vec<Interaction> = (0..4)
        .map(|_| Interaction {
            resolved_on_first_contact: true,
            handling_time_seconds: 300,
            ..Interaction::default()
        })
        .collect();

    let comparison = engine.compare(&batch(), &previous);

    assert_eq!(comparison.deltas.len(), MetricsSnapshot::default().values().len());
    assert_eq!(comparison.absolute("complaint_rate"), 50.0);
    assert_eq!(comparison.absolute("fcr_rate"), -50.0);
    assert_eq!(comparison.deltas["avg_handling_time_minutes"].trend, Trend::Flat);
    assert_eq!(comparison.absolute("no_such_metric"), 0.0);
}

#[test]
fn comparison_round_trips_through_json() {
    let json = serde_json::json!({
        "deltas": {
            "complaint_rate": { "absolute": -2.5, "percentage": -12.0 }
        }
    });
    let comparison: PeriodComparison = serde_json::from_value(json).unwrap();
    let delta = &comparison.deltas["complaint_rate"];
    assert_eq!(delta.trend, Trend::Flat, "missing trend defaults to flat");
    assert_eq!(delta.is_positive, None);
    assert_eq!(comparison.absolute("complaint_rate"), -2.5);
}
