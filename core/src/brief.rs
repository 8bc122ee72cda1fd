//! Short bullet summary of a single interaction for detail views.

use crate::interaction::Interaction;

pub const MAX_BULLETS: usize = 5;

/// 3–5 bullets built only from the record's own fields.
pub fn brief(interaction: &Interaction) -> Vec<String> {
    let mut bullets = Vec::with_capacity(MAX_BULLETS);

    let segment = interaction.customer_segment.as_deref().unwrap_or("Mass");
    let channel = interaction.channel.as_deref().unwrap_or("Phone");
    bullets.push(format!("{segment} customer contacted via {channel} channel."));

    bullets.push(format!(
        "Inquiry related to {} for {}.",
        interaction.call_reason.as_deref().unwrap_or_default(),
        interaction.product.as_deref().unwrap_or_default(),
    ));

    if interaction.is_complaint {
        bullets.push(format!(
            "Customer filed {} severity complaint regarding {}.",
            interaction.severity().label().to_lowercase(),
            interaction.complaint_category.as_deref().unwrap_or_default(),
        ));
    }

    let disposition = interaction.disposition.as_deref().unwrap_or_default();
    if interaction.resolved_on_first_contact {
        bullets.push(format!(
            "Issue was resolved on first contact. Disposition: {disposition}."
        ));
    } else if interaction.transfer_count > 0 {
        bullets.push(format!(
            "Required {} transfer(s) before resolution. Disposition: {disposition}.",
            interaction.transfer_count
        ));
    } else {
        bullets.push(format!(
            "Issue not fully resolved on first contact. Disposition: {disposition}."
        ));
    }

    if interaction.digital_eligible {
        if interaction.deflection_success {
            bullets.push("Customer successfully used self-service option.".into());
        } else if interaction.deflection_attempted {
            bullets.push(format!(
                "Self-service attempted but failed: {}.",
                interaction.digital_failure_reason.as_deref().unwrap_or("Unknown")
            ));
        }
    }

    bullets.truncate(MAX_BULLETS);
    bullets
}
