//! # SMS Relay Core
//!
//! This crate provides the foundational types and traits for SMS Relay.
//! It defines the message schema shared by the ingest and query paths
//! (`Sms`, `SmsPayload`), the filtered/paginated query model, the error
//! type, and the `MessageStore` trait that storage backends implement.

pub mod error;
pub mod query;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{RelayError, RelayResult};
pub use query::{MessageQuery, DATE_FILTER_FORMAT, DEFAULT_LIMIT, MESSAGE_TIME_FORMAT};
pub use traits::MessageStore;
pub use types::{Sms, SmsPayload};
