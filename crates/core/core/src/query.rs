//! Filtered, paginated reads over stored messages.
//!
//! Store backends run the same three steps on a snapshot of their messages:
//! sort newest first, keep what [`MessageQuery::matches`], then cut the page
//! with [`MessageQuery::paginate`]. [`MessageQuery::apply`] does all three.

use chrono::{NaiveDate, NaiveDateTime};

use crate::types::Sms;

/// Format of `Sms::time` when a date filter is evaluated.
pub const MESSAGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the date filter.
pub const DATE_FILTER_FORMAT: &str = "%Y-%m-%d";

/// Default page size.
pub const DEFAULT_LIMIT: usize = 10;

/// Parameters of a filtered, paginated read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageQuery {
    /// Maximum number of messages returned.
    pub limit: usize,
    /// Number of matching messages skipped before the page starts.
    pub offset: usize,
    /// Case-insensitive substring of `Sms::from`. Empty matches everything.
    pub from: String,
    /// Calendar date (`YYYY-MM-DD`) the message time must fall on. Empty
    /// matches everything.
    pub date: String,
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            from: String::new(),
            date: String::new(),
        }
    }
}

impl MessageQuery {
    /// Creates a query for one page with no filters.
    pub fn page(limit: usize, offset: usize) -> Self {
        Self {
            limit,
            offset,
            ..Self::default()
        }
    }

    /// Sets the sender filter.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    /// Sets the date filter.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Returns true if the message passes both filters.
    ///
    /// With a date filter set, a message whose time does not parse as
    /// [`MESSAGE_TIME_FORMAT`] never matches, and neither does anything when
    /// the filter itself does not parse as [`DATE_FILTER_FORMAT`].
    pub fn matches(&self, sms: &Sms) -> bool {
        self.matches_from(sms) && self.matches_date(sms)
    }

    fn matches_from(&self, sms: &Sms) -> bool {
        self.from.is_empty() || sms.from.to_lowercase().contains(&self.from.to_lowercase())
    }

    fn matches_date(&self, sms: &Sms) -> bool {
        if self.date.is_empty() {
            return true;
        }

        let Ok(received) = NaiveDateTime::parse_from_str(&sms.time, MESSAGE_TIME_FORMAT) else {
            return false;
        };
        let Ok(wanted) = NaiveDate::parse_from_str(&self.date, DATE_FILTER_FORMAT) else {
            return false;
        };

        received.date() == wanted
    }

    /// Returns the `[offset, offset + limit)` window of `items`, clamped to
    /// its bounds.
    pub fn paginate<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }

    /// Sorts, filters, and paginates a snapshot of messages.
    ///
    /// Messages are ordered by `time` descending using plain string
    /// comparison, which is chronological only when every time shares the
    /// zero-padded `YYYY-MM-DD HH:MM:SS` layout. The sort is stable, so
    /// messages with equal times keep their insertion order.
    pub fn apply(&self, mut snapshot: Vec<Sms>) -> Vec<Sms> {
        snapshot.sort_by(|a, b| b.time.cmp(&a.time));

        let filtered: Vec<Sms> = snapshot.into_iter().filter(|sms| self.matches(sms)).collect();

        self.paginate(&filtered).to_vec()
    }
}
