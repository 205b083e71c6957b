//! HTML page for the `/sms` listing.

use html_escape::{encode_double_quoted_attribute, encode_text};
use sms_relay_core::query::MessageQuery;
use sms_relay_core::types::Sms;

use crate::routes::UI_PATH;

/// Everything the listing page shows.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// The page of messages returned by the store.
    pub messages: &'a [Sms],
    /// The query that produced the page.
    pub query: &'a MessageQuery,
    /// Total number of stored messages, unfiltered.
    pub total: usize,
}

impl PageView<'_> {
    /// Offset of the previous page, or `None` on the first page.
    pub fn prev_offset(&self) -> Option<usize> {
        (self.query.offset > 0).then(|| self.query.offset.saturating_sub(self.query.limit))
    }

    /// Offset of the next page, or `None` when this page came back short.
    pub fn next_offset(&self) -> Option<usize> {
        (self.messages.len() >= self.query.limit)
            .then(|| self.query.offset.saturating_add(self.query.limit))
    }

    fn page_href(&self, offset: usize) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("limit", &self.query.limit.to_string())
            .append_pair("offset", &offset.to_string())
            .append_pair("from", &self.query.from)
            .append_pair("time", &self.query.date)
            .finish();
        format!("{UI_PATH}?{query}")
    }
}

const STYLE: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; max-width: 1200px; margin: 0 auto; padding: 20px; color: #333; }
h1 { text-align: center; }
.stats { text-align: right; color: #666; }
.filter-form { background: #f4f4f4; padding: 16px; border-radius: 5px; margin-bottom: 20px; }
.message { border: 1px solid #ddd; border-radius: 5px; padding: 12px; margin-bottom: 12px; }
.message-header { display: flex; justify-content: space-between; font-weight: bold; border-bottom: 1px solid #eee; }
.message-content { white-space: pre-wrap; }
.pagination { display: flex; justify-content: center; gap: 10px; }
.pagination .disabled { color: #aaa; }
";

/// Renders the listing page.
///
/// Every user-supplied string, message fields and echoed filters alike, is
/// HTML-escaped.
pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("<title>SMS Inbox</title>\n");
    html.push_str(&format!("<style>\n{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n<h1>SMS Inbox</h1>\n");

    html.push_str(&format!(
        "<div class=\"stats\">{} messages stored | showing {}</div>\n",
        view.total,
        view.messages.len()
    ));

    html.push_str(&render_filter_form(view.query));

    if view.messages.is_empty() {
        html.push_str("<div class=\"message\"><p>No matching messages.</p></div>\n");
    }
    for sms in view.messages {
        html.push_str(&render_message(sms));
    }

    html.push_str("<div class=\"pagination\">\n");
    html.push_str(&page_control("Previous", view.prev_offset().map(|o| view.page_href(o))));
    html.push_str(&page_control("Next", view.next_offset().map(|o| view.page_href(o))));
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

fn render_filter_form(query: &MessageQuery) -> String {
    format!(
        concat!(
            "<div class=\"filter-form\">\n",
            "<form method=\"get\" action=\"{action}\">\n",
            "<label for=\"from\">Sender:</label> ",
            "<input type=\"text\" id=\"from\" name=\"from\" value=\"{from}\" placeholder=\"Filter by sender\">\n",
            "<label for=\"time\">Date:</label> ",
            "<input type=\"date\" id=\"time\" name=\"time\" value=\"{date}\">\n",
            "<label for=\"limit\">Per page:</label> ",
            "<input type=\"number\" id=\"limit\" name=\"limit\" min=\"1\" value=\"{limit}\">\n",
            "<button type=\"submit\">Filter</button>\n",
            "<a href=\"{action}\">Reset</a>\n",
            "</form>\n",
            "</div>\n",
        ),
        action = UI_PATH,
        from = encode_double_quoted_attribute(&query.from),
        date = encode_double_quoted_attribute(&query.date),
        limit = query.limit,
    )
}

fn render_message(sms: &Sms) -> String {
    format!(
        concat!(
            "<div class=\"message\">\n",
            "<div class=\"message-header\">",
            "<span>From: {from}</span><span>Time: {time}</span><span>Device: {device}</span>",
            "</div>\n",
            "<div class=\"message-content\">{content}</div>\n",
            "</div>\n",
        ),
        from = encode_text(&sms.from),
        time = encode_text(&sms.time),
        device = encode_text(&sms.device),
        content = encode_text(&sms.content),
    )
}

fn page_control(label: &str, href: Option<String>) -> String {
    match href {
        Some(href) => format!(
            "<a class=\"page\" href=\"{}\">{label}</a>\n",
            encode_double_quoted_attribute(&href)
        ),
        None => format!("<span class=\"page disabled\">{label}</span>\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(n: usize) -> Vec<Sms> {
        (0..n)
            .map(|i| Sms::new(format!("2024-01-01 10:{i:02}:00"), "Bank", "hi", "phone1"))
            .collect()
    }

    #[test]
    fn test_first_page_disables_previous() {
        let query = MessageQuery::page(2, 0);
        let msgs = messages(2);
        let view = PageView { messages: &msgs, query: &query, total: 5 };

        assert_eq!(view.prev_offset(), None);
        assert_eq!(view.next_offset(), Some(2));

        let html = render_page(&view);
        assert!(html.contains("<span class=\"page disabled\">Previous</span>"));
        assert!(html.contains("offset=2"));
        assert!(html.contains("5 messages stored | showing 2"));
    }

    #[test]
    fn test_short_page_disables_next() {
        let query = MessageQuery::page(10, 10);
        let msgs = messages(3);
        let view = PageView { messages: &msgs, query: &query, total: 13 };

        assert_eq!(view.prev_offset(), Some(0));
        assert_eq!(view.next_offset(), None);
        assert!(render_page(&view).contains("<span class=\"page disabled\">Next</span>"));
    }

    #[test]
    fn test_previous_offset_saturates() {
        let query = MessageQuery::page(10, 4);
        let view = PageView { messages: &[], query: &query, total: 4 };
        assert_eq!(view.prev_offset(), Some(0));
    }

    #[test]
    fn test_links_carry_filters() {
        let query = MessageQuery::page(1, 0).with_from("A&B").with_date("2024-01-01");
        let msgs = messages(1);
        let view = PageView { messages: &msgs, query: &query, total: 1 };

        let html = render_page(&view);
        assert!(html.contains("/sms?limit=1&amp;offset=1&amp;from=A%26B&amp;time=2024-01-01"));
    }

    #[test]
    fn test_escapes_message_fields() {
        let msgs = vec![Sms::new(
            "2024-01-01 10:00:00",
            "<b>Bank</b>",
            "<script>alert(1)</script>",
            "phone\"1",
        )];
        let query = MessageQuery::default().with_from("\"><script>");
        let view = PageView { messages: &msgs, query: &query, total: 1 };

        let html = render_page(&view);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&lt;b&gt;Bank&lt;/b&gt;"));
    }

    #[test]
    fn test_empty_state() {
        let query = MessageQuery::default();
        let view = PageView { messages: &[], query: &query, total: 0 };
        assert!(render_page(&view).contains("No matching messages."));
    }
}
