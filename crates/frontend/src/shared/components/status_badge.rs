use contracts::domain::a002_profile::moderation::ModerationStatus;
use contracts::domain::a002_profile::photo::PhotoStatus;
use contracts::system::users::VerificationStatus;
use leptos::prelude::*;
use thaw::*;

fn badge(label: &'static str, color: BadgeColor) -> AnyView {
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {label}
        </Badge>
    }
    .into_any()
}

pub fn moderation_badge(status: ModerationStatus) -> AnyView {
    let color = match status {
        ModerationStatus::Pending => BadgeColor::Warning,
        ModerationStatus::Approved => BadgeColor::Success,
        ModerationStatus::Rejected => BadgeColor::Danger,
        ModerationStatus::Banned => BadgeColor::Severe,
    };
    badge(status.title(), color)
}

pub fn photo_badge(status: PhotoStatus) -> AnyView {
    let color = match status {
        PhotoStatus::Pending => BadgeColor::Warning,
        PhotoStatus::Approved => BadgeColor::Success,
        PhotoStatus::Rejected => BadgeColor::Danger,
    };
    badge(status.as_str(), color)
}

pub fn verification_badge(status: VerificationStatus) -> AnyView {
    let color = match status {
        VerificationStatus::Unverified => BadgeColor::Subtle,
        VerificationStatus::Pending => BadgeColor::Warning,
        VerificationStatus::Verified => BadgeColor::Success,
        VerificationStatus::Rejected => BadgeColor::Danger,
    };
    badge(status.as_str(), color)
}
