//! PartnerDash - Desktop dashboard for partner analytics.
//!
//! This library exposes the application and its views for testing.

pub mod app;
pub mod message;
pub mod view;

// Re-export commonly used types
pub use app::PartnerDash;
pub use message::{AccountTab, ChartMessage, ChartTarget, Message};
