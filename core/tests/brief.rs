use contact_insight_core::{
    brief::brief,
    interaction::{ComplaintSeverity, Interaction},
};

fn base() -> Interaction {
    Interaction {
        customer_segment: Some("Affluent".into()),
        channel: Some("Chat".into()),
        call_reason: Some("Digital Access".into()),
        product: Some("Mobile Banking".into()),
        disposition: Some("Resolved".into()),
        ..Interaction::default()
    }
}

#[test]
fn resolved_plain_contact_gets_three_bullets() {
    let interaction = Interaction {
        resolved_on_first_contact: true,
        ..base()
    };

    assert_eq!(
        brief(&interaction),
        vec![
            "Affluent customer contacted via Chat channel.",
            "Inquiry related to Digital Access for Mobile Banking.",
            "Issue was resolved on first contact. Disposition: Resolved.",
        ]
    );
}

#[test]
fn complaint_with_failed_self_service_gets_five_bullets() {
    let interaction = Interaction {
        is_complaint: true,
        complaint_severity: Some(ComplaintSeverity::High),
        complaint_category: Some("Digital".into()),
        transfer_count: 2,
        disposition: Some("Escalated".into()),
        digital_eligible: true,
        deflection_attempted: true,
        digital_failure_reason: Some("OTP not received".into()),
        ..base()
    };

    let bullets = brief(&interaction);

    assert_eq!(bullets.len(), 5);
    assert_eq!(bullets[2], "Customer filed high severity complaint regarding Digital.");
    assert_eq!(bullets[3], "Required 2 transfer(s) before resolution. Disposition: Escalated.");
    assert_eq!(bullets[4], "Self-service attempted but failed: OTP not received.");
}

#[test]
fn missing_segment_and_channel_use_defaults() {
    let interaction = Interaction::default();

    let bullets = brief(&interaction);

    assert_eq!(bullets[0], "Mass customer contacted via Phone channel.");
    assert_eq!(bullets[2], "Issue not fully resolved on first contact. Disposition: .");
    assert_eq!(bullets.len(), 3);
}

#[test]
fn self_service_bullets() {
    let success = Interaction {
        digital_eligible: true,
        deflection_attempted: true,
        deflection_success: true,
        ..base()
    };
    assert_eq!(
        brief(&success).last().map(String::as_str),
        Some("Customer successfully used self-service option.")
    );

    let unknown_failure = Interaction {
        digital_eligible: true,
        deflection_attempted: true,
        ..base()
    };
    assert_eq!(
        brief(&unknown_failure).last().map(String::as_str),
        Some("Self-service attempted but failed: Unknown.")
    );

    let not_attempted = Interaction {
        digital_eligible: true,
        ..base()
    };
    assert_eq!(brief(&not_attempted).len(), 3);
}
