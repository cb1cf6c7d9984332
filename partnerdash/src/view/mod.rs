//! View components for the PartnerDash application.

pub mod account;
pub mod chart;
pub mod dashboard;
pub mod formatting;
pub mod partner;
pub mod theme;
