//! Built-in Tours
//!
//! Code-defined fallback tours that keep the guided flow usable when the
//! declarative source is missing or invalid. Tours loaded from the source
//! replace these by id (see [`crate::tour::loader::bootstrap_catalog`]).

use once_cell::sync::Lazy;

use super::model::{TourDefinition, TourStep};

/// Lazily-built list of the code-defined tours.
static BUILTIN_TOURS: Lazy<Vec<TourDefinition>> = Lazy::new(|| {
    vec![quick_tour(), appointment_booking_tour()]
});

/// Returns the built-in tours in registration order.
pub fn builtin_tours() -> &'static [TourDefinition] {
    &BUILTIN_TOURS
}

/// The default walkthrough of the patient portal shell.
fn quick_tour() -> TourDefinition {
    TourDefinition::new("quick_tour")
        .with_step(
            TourStep::new(
                "navbar",
                "Use the navigation bar to move between different sections of the \
                 application. You can access appointments, patient intake, your \
                 profile, and more.",
            )
            .with_anchor("nav#navbar")
            .with_audio("welcome/navigation-intro.mp3"),
        )
        .with_step(
            TourStep::new(
                "appointments",
                "Let's start with appointments. Our platform makes it easy to \
                 schedule, reschedule, or cancel appointments.",
            )
            .with_anchor("a[href='/appointments']")
            .with_audio("appointment/appointment_scheduling.mp3"),
        )
        .with_step(
            TourStep::new(
                "patient_intake",
                "To save time at the clinic, please complete your registration and \
                 medical history online before your appointment so we can streamline \
                 our services for you.",
            )
            .with_anchor("a[href*='/intake']")
            .with_audio("patient-intake/patient_intake_button.mp3"),
        )
        .with_step(
            TourStep::new(
                "my_profile",
                "View and update your personal information, contact details, and \
                 preferences in your profile section.",
            )
            .with_anchor("a[href*='/patient']")
            .with_audio("my-profile/my-profile-section.mp3"),
        )
        .with_step(
            TourStep::new(
                "referrals",
                "Track and manage your referrals to specialists. Stay informed at \
                 every step of the referral process.",
            )
            .with_anchor("a[href='/referrals']")
            .with_audio("welcome/referrals-intro.mp3"),
        )
        .with_step(
            TourStep::new(
                "billing",
                "Manage your insurance information, view statements, and make \
                 payments securely through our platform.",
            )
            .with_anchor("#billing-menu button")
            .with_audio("welcome/billing-intro.mp3"),
        )
        .with_step(
            TourStep::new(
                "help",
                "Click this button anytime you need assistance with the platform. \
                 Our assistant will guide you through any process.",
            )
            .with_anchor("a.need-help-button")
            .with_audio("welcome/help-intro.mp3"),
        )
}

/// Walkthrough of the appointment scheduler, step by step through booking.
fn appointment_booking_tour() -> TourDefinition {
    TourDefinition::new("appointment_booking_tour")
        .with_step(
            TourStep::new(
                "specialty_selection",
                "Welcome! Let's book your appointment. First, select a specialty \
                 that matches your needs and click Next.",
            )
            .with_audio("appointment-booking/specialty.mp3"),
        )
        .with_step(
            TourStep::new(
                "provider_selection",
                "Great! Now select the doctor you would like and click Next.",
            )
            .with_audio("appointment-booking/doctor.mp3"),
        )
        .with_step(
            TourStep::new(
                "date_time_selection",
                "Perfect! Now select the date and time that works best for you and \
                 click Next.",
            )
            .with_audio("appointment-booking/datetime.mp3"),
        )
        .with_step(
            TourStep::new(
                "visit_reason",
                "Almost done! Please write a brief reason for your visit and click \
                 Next.",
            )
            .with_audio("appointment-booking/reason.mp3"),
        )
        .with_step(
            TourStep::new(
                "appointment_confirmed",
                "Congratulations! Your appointment is booked. Check your email for \
                 a copy or print one for your records. See you soon!",
            )
            .with_audio("appointment-booking/complete.mp3"),
        )
}
