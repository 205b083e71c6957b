//! # SMS Relay Memory Store
//!
//! The in-memory message store. Messages live for the lifetime of the
//! process; there is no eviction and no persistence.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sms_relay_adapter_memory::MemoryMessageStore;
//! use sms_relay_core::{MessageQuery, MessageStore, Sms};
//!
//! let store = MemoryMessageStore::new();
//! store.append(Sms::new("2024-01-02 10:00:00", "Bank", "OTP 123456", "phone1")).await?;
//! let page = store.query(&MessageQuery::page(10, 0)).await?;
//! ```

use async_trait::async_trait;
use sms_relay_core::error::RelayResult;
use sms_relay_core::query::MessageQuery;
use sms_relay_core::traits::MessageStore;
use sms_relay_core::types::Sms;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory message store.
///
/// All operations, reads included, take the same lock for their whole
/// duration, so appends and queries are totally ordered. Cloning yields a
/// handle to the same list.
#[derive(Debug, Clone, Default)]
pub struct MemoryMessageStore {
    messages: Arc<Mutex<Vec<Sms>>>,
}

impl MemoryMessageStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn append(&self, sms: Sms) -> RelayResult<()> {
        let mut messages = self.messages.lock().await;
        messages.push(sms);
        tracing::debug!(total = messages.len(), "message appended");
        Ok(())
    }

    async fn query(&self, query: &MessageQuery) -> RelayResult<Vec<Sms>> {
        let messages = self.messages.lock().await;
        Ok(query.apply(messages.clone()))
    }

    async fn count(&self) -> RelayResult<usize> {
        Ok(self.messages.lock().await.len())
    }

    async fn query_with_count(&self, query: &MessageQuery) -> RelayResult<(Vec<Sms>, usize)> {
        let messages = self.messages.lock().await;
        Ok((query.apply(messages.clone()), messages.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sms(time: &str, from: &str) -> Sms {
        Sms::new(time, from, format!("hello from {from}"), "phone1")
    }

    async fn seeded(n: usize) -> MemoryMessageStore {
        let store = MemoryMessageStore::new();
        for i in 0..n {
            let time = format!("2024-01-01 10:{:02}:00", i);
            store.append(sms(&time, &format!("sender-{i}"))).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_append_then_newest_first() {
        let store = seeded(3).await;
        let latest = Sms::new("2024-02-01 00:00:00", "Bank", "OTP 123456", "phone1");
        store.append(latest.clone()).await.unwrap();

        let page = store.query(&MessageQuery::page(1, 0)).await.unwrap();
        assert_eq!(page, vec![latest]);
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryMessageStore::new();
        assert!(store.query(&MessageQuery::default()).await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_pagination_boundaries() {
        let store = seeded(7).await;

        for limit in [1, 3, 7, 50] {
            let past_end = store.query(&MessageQuery::page(limit, 7)).await.unwrap();
            assert!(past_end.is_empty(), "limit {limit} at offset N should be empty");

            let first = store.query(&MessageQuery::page(limit, 0)).await.unwrap();
            assert_eq!(first.len(), limit.min(7));
        }

        let tail = store.query(&MessageQuery::page(5, 5)).await.unwrap();
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].from, "sender-1");
        assert_eq!(tail[1].from, "sender-0");
    }

    #[tokio::test]
    async fn test_repeated_queries_are_identical() {
        let store = seeded(5).await;
        let query = MessageQuery::page(3, 1).with_from("sender");

        let first = store.query(&query).await.unwrap();
        let second = store.query(&query).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_from_filter() {
        let store = MemoryMessageStore::new();
        store.append(sms("2024-01-01 10:00:00", "Alice")).await.unwrap();
        store.append(sms("2024-01-01 11:00:00", "alice-bank")).await.unwrap();
        store.append(sms("2024-01-01 12:00:00", "Bob")).await.unwrap();

        let found = store
            .query(&MessageQuery::default().with_from("alice"))
            .await
            .unwrap();
        let senders: Vec<&str> = found.iter().map(|m| m.from.as_str()).collect();
        assert_eq!(senders, ["alice-bank", "Alice"]);
    }

    #[tokio::test]
    async fn test_date_filter_skips_unparseable_times() {
        let store = MemoryMessageStore::new();
        store.append(sms("2024-01-02 09:00:00", "Bank")).await.unwrap();
        store.append(sms("2024-01-03 09:00:00", "Bank")).await.unwrap();
        store.append(sms("not a time", "Bank")).await.unwrap();

        let all = store.query(&MessageQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let on_day = store
            .query(&MessageQuery::default().with_date("2024-01-02"))
            .await
            .unwrap();
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].time, "2024-01-02 09:00:00");
    }

    #[tokio::test]
    async fn test_instances_are_isolated() {
        let a = MemoryMessageStore::new();
        let b = MemoryMessageStore::new();
        a.append(sms("2024-01-01 10:00:00", "Bank")).await.unwrap();

        assert_eq!(a.count().await.unwrap(), 1);
        assert_eq!(b.count().await.unwrap(), 0);

        let handle = a.clone();
        handle.append(sms("2024-01-01 11:00:00", "Bank")).await.unwrap();
        assert_eq!(a.count().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_are_all_kept() {
        let store = MemoryMessageStore::new();

        let mut handles = Vec::new();
        for task in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..25 {
                    let time = format!("2024-01-01 {:02}:{:02}:00", task, i);
                    store.append(sms(&time, "Bank")).await.unwrap();
                    store.query(&MessageQuery::page(5, 0)).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.count().await.unwrap(), 200);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_page_and_total_come_from_one_snapshot() {
        let store = MemoryMessageStore::new();

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..300 {
                    let time = format!("2024-01-01 10:{:02}:{:02}", i / 60, i % 60);
                    store.append(sms(&time, "Bank")).await.unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };

        let everything = MessageQuery::page(1_000, 0);
        while !writer.is_finished() {
            let (page, total) = store.query_with_count(&everything).await.unwrap();
            assert_eq!(page.len(), total);
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();

        let (page, total) = store
            .query_with_count(&MessageQuery::page(2, 0).with_from("nobody"))
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 300);
    }
}
