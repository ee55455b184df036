//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::api::Booking;

/// Which navigation set the sidebar shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PortalMode {
    #[default]
    Marketplace,
    Pharma,
}

impl PortalMode {
    pub fn toggled(self) -> Self {
        match self {
            PortalMode::Marketplace => PortalMode::Pharma,
            PortalMode::Pharma => PortalMode::Marketplace,
        }
    }

    /// Brand shown in the header
    pub fn brand(self) -> &'static str {
        match self {
            PortalMode::Marketplace => "MedSpace",
            PortalMode::Pharma => "PharmaSpace",
        }
    }

    pub fn portal_name(self) -> &'static str {
        match self {
            PortalMode::Marketplace => "MedSpace Marketplace",
            PortalMode::Pharma => "Pharma Sales",
        }
    }

    pub fn mode_description(self) -> &'static str {
        match self {
            PortalMode::Marketplace => "facility booking",
            PortalMode::Pharma => "healthcare professional engagement",
        }
    }

    /// (path, label) pairs for the navigation bar
    pub fn nav_items(self) -> &'static [(&'static str, &'static str)] {
        match self {
            PortalMode::Marketplace => &[
                ("/", "Dashboard"),
                ("/hospitals", "Hospitals"),
                ("/facilities", "Facilities"),
                ("/equipment", "Equipment"),
                ("/my-bookings", "My Bookings"),
                ("/settings", "Settings"),
            ],
            PortalMode::Pharma => &[
                ("/", "Dashboard"),
                ("/hcps", "Healthcare Professionals"),
                ("/visits", "Visits"),
                ("/tasks", "Tasks"),
                ("/products", "Products"),
                ("/hospitals", "Hospitals"),
                ("/settings", "Settings"),
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeVariant {
    Success,
    Destructive,
}

/// A toast: bold title plus one line of detail
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Bookings as last loaded from the API, oldest first
    pub bookings: RwSignal<Vec<Booking>>,
    /// Current navigation set
    pub portal_mode: RwSignal<PortalMode>,
    /// WebSocket connection status
    pub ws_connected: RwSignal<bool>,
    /// Last booking update time
    pub last_sync: RwSignal<Option<i64>>,
    /// Toast currently on screen
    pub notice: RwSignal<Option<Notice>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        bookings: create_rw_signal(Vec::new()),
        portal_mode: create_rw_signal(PortalMode::default()),
        ws_connected: create_rw_signal(false),
        last_sync: create_rw_signal(None),
        notice: create_rw_signal(None),
    };

    provide_context(state);
}

/// Insert a booking or replace the one with the same id
pub fn upsert_booking(bookings: &mut Vec<Booking>, booking: Booking) {
    match bookings.iter_mut().find(|b| b.id == booking.id) {
        Some(existing) => *existing = booking,
        None => bookings.push(booking),
    }
}

impl GlobalState {
    /// Apply a booking pushed by the server or returned by a call
    pub fn apply_booking(&self, booking: Booking) {
        self.bookings.update(|list| upsert_booking(list, booking));
        self.last_sync
            .set(Some(chrono::Utc::now().timestamp_millis()));
    }

    /// Flip the portal and announce it
    pub fn toggle_portal(&self) {
        let next = self.portal_mode.get_untracked().toggled();
        self.portal_mode.set(next);
        self.show_success(
            &format!("Switched to {} Portal", next.portal_name()),
            &format!("You are now in {} mode.", next.mode_description()),
        );
    }

    /// Show a success toast (auto-clears after timeout)
    pub fn show_success(&self, title: &str, description: &str) {
        self.show(title, description, NoticeVariant::Success, 3000);
    }

    /// Show a destructive toast (auto-clears after timeout)
    pub fn show_error(&self, title: &str, description: &str) {
        self.show(title, description, NoticeVariant::Destructive, 5000);
    }

    fn show(&self, title: &str, description: &str, variant: NoticeVariant, millis: u32) {
        let notice = Notice {
            title: title.to_string(),
            description: description.to_string(),
            variant,
        };
        self.notice.set(Some(notice.clone()));

        // Only clear if a newer toast has not replaced this one
        let signal = self.notice;
        gloo_timers::callback::Timeout::new(millis, move || {
            if signal.get_untracked().as_ref() == Some(&notice) {
                signal.set(None);
            }
        })
        .forget();
    }
}
