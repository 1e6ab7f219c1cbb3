use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    Success,
    Warning,
    Danger,
    #[default]
    Neutral,
}

impl BadgeVariant {
    pub fn classes(&self) -> &'static str {
        match self {
            BadgeVariant::Success => "bg-status-success-bg text-status-success-text border-status-success-border",
            BadgeVariant::Warning => "bg-status-warning-bg text-status-warning-text border-status-warning-border",
            BadgeVariant::Danger => "bg-status-error-bg text-status-error-text border-status-error-border",
            BadgeVariant::Neutral => "bg-transparent text-fg-muted border-border-strong",
        }
    }
}

/// Pure mapping from a backend status string to a badge variant. Status
/// vocabularies are open; anything unrecognized gets the outline look.
pub fn badge_variant(status: &str) -> BadgeVariant {
    match status {
        "active" | "present" | "approved" | "paid" | "generated" => BadgeVariant::Success,
        "pending" | "late" | "half_day" | "draft" | "open" => BadgeVariant::Warning,
        "rejected" | "absent" | "suspended" | "terminated" | "overdue" => BadgeVariant::Danger,
        _ => BadgeVariant::Neutral,
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] status: MaybeSignal<String>) -> impl IntoView {
    let class_status = status.clone();
    view! {
        <span class=move || {
            format!(
                "inline-flex items-center rounded-full border px-2.5 py-0.5 text-xs font-medium {}",
                badge_variant(&class_status.get()).classes()
            )
        }>
            {move || status.get()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_statuses_map_to_expected_variants() {
        assert_eq!(badge_variant("present"), BadgeVariant::Success);
        assert_eq!(badge_variant("late"), BadgeVariant::Warning);
        assert_eq!(badge_variant("absent"), BadgeVariant::Danger);
        assert_eq!(badge_variant("half_day"), BadgeVariant::Warning);
    }

    #[test]
    fn leave_statuses_map_to_expected_variants() {
        assert_eq!(badge_variant("pending"), BadgeVariant::Warning);
        assert_eq!(badge_variant("approved"), BadgeVariant::Success);
        assert_eq!(badge_variant("rejected"), BadgeVariant::Danger);
        assert_eq!(badge_variant("cancelled"), BadgeVariant::Neutral);
    }

    #[test]
    fn unknown_statuses_get_the_outline_variant() {
        assert_eq!(badge_variant("escalated"), BadgeVariant::Neutral);
        assert_eq!(badge_variant(""), BadgeVariant::Neutral);
        assert_eq!(badge_variant("ANYTHING"), BadgeVariant::Neutral);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::render_to_string;

    #[test]
    fn badge_renders_status_text_and_variant_classes() {
        let html = render_to_string(move || view! { <StatusBadge status="rejected".to_string() /> });
        assert!(html.contains("rejected"));
        assert!(html.contains("bg-status-error-bg"));
    }
}
