//! Data models for Atelia

pub mod booking;
pub mod client;
pub mod offering;
pub mod provider;
pub mod schedule;

// Re-export commonly used types
pub use booking::{Booking, BookingConfirmation, BookingDetails, BookingStatus};
pub use client::Client;
pub use offering::Offering;
pub use provider::{Provider, ProviderSummary};
pub use schedule::WorkWindow;
