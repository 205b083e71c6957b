//! Core traits for SMS Relay.
//!
//! This module defines the interface storage backends implement so the
//! ingest and query paths never touch the message list directly.

use async_trait::async_trait;

use crate::error::RelayResult;
use crate::query::MessageQuery;
use crate::types::Sms;

/// Trait for message storage backends.
///
/// A backend owns its message list exclusively. Every operation must be
/// atomic with respect to every other: a query never observes a
/// half-appended message, and two queries with no append in between return
/// the same result.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Appends a message. No deduplication, no size bound.
    async fn append(&self, sms: Sms) -> RelayResult<()>;

    /// Returns one page of messages, newest first, matching the filters.
    ///
    /// The default ordering/filtering/pagination rules are those of
    /// [`MessageQuery::apply`].
    async fn query(&self, query: &MessageQuery) -> RelayResult<Vec<Sms>>;

    /// Returns the total number of stored messages, ignoring any filter.
    async fn count(&self) -> RelayResult<usize>;

    /// Returns one page of messages together with the unfiltered total.
    ///
    /// Backends that can should take both from a single snapshot. The
    /// default runs [`query`](Self::query) then [`count`](Self::count), so
    /// an append in between shows up in the total but not in the page.
    async fn query_with_count(&self, query: &MessageQuery) -> RelayResult<(Vec<Sms>, usize)> {
        let messages = self.query(query).await?;
        let total = self.count().await?;
        Ok((messages, total))
    }
}
