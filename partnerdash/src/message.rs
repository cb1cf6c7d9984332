use std::sync::Arc;

use partnerdash_common::{
    Activation, ChartKind, Collection, DateRange, OverallMetrics, Partner, Series, User,
};
use partnerdash_store::SeriesScope;

use crate::view::chart::MetricChoice;

/// Messages for the PartnerDash application.
///
/// Store results carry the error rendered as a string so messages stay
/// `Clone`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Partner list fetched.
    PartnersLoaded(Result<Vec<Partner>, String>),

    /// Overview totals fetched.
    MetricsLoaded(Result<OverallMetrics, String>),

    /// Metric series fetched for a scope.
    SeriesLoaded(SeriesScope, Result<Arc<Series>, String>),

    /// Reload everything currently on screen.
    Refresh,

    /// Hide the error banner.
    DismissError,

    // Overview
    /// Partner search text changed.
    SearchPartners(String),

    /// Expand or collapse the leaderboard.
    ToggleLeaderboard,

    /// Open a partner's details.
    SelectPartner(String),

    // Partner details
    /// Back from partner details to the overview.
    ClosePartner,

    /// Set a partner's active flag.
    TogglePartnerActive(String, bool),

    /// Partner write finished.
    PartnerUpdated(Result<Partner, String>),

    /// Users fetched for a partner.
    UsersLoaded(String, Result<Vec<User>, String>),

    /// User search text changed.
    SearchUsers(String),

    /// Set a user's active flag.
    ToggleUserActive(String, bool),

    /// User write finished.
    UserUpdated(Result<User, String>),

    /// Open a user's account page.
    SelectUser(String),

    /// Back from the account page to partner details.
    CloseUser,

    // Account page
    /// Switch between collections and activations.
    SelectAccountTab(AccountTab),

    /// Collections fetched for a user.
    CollectionsLoaded(String, Result<Vec<Collection>, String>),

    /// Activations fetched for a user.
    ActivationsLoaded(String, Result<Vec<Activation>, String>),

    DeleteCollection(String),
    CollectionDeleted(String, Result<(), String>),

    DeleteActivation(String),
    ActivationDeleted(String, Result<(), String>),

    /// Graph control changed.
    Chart(ChartTarget, ChartMessage),
}

/// Which graph a control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTarget {
    /// Platform-wide graph on the overview.
    Overview,
    /// Graph on the selected partner's page.
    Partner,
}

/// Graph control events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartMessage {
    SelectMetric(MetricChoice),
    SetKind(ChartKind),
    SetRange(DateRange),
}

/// Tabs on the account page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountTab {
    #[default]
    Collections,
    Activations,
}
