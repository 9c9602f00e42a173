//! Bounded parsing of the endpoint's JSON response
//!
//! Stateless: one body in, one feed or one error out. No allocation, no
//! partial results.

use heapless::Vec;
use serde::Deserialize;

use crate::feed::model::{PlanFeed, PlanItem, MAX_FEED_BYTES, MAX_FEED_ITEMS, MAX_TITLE_LEN};
use crate::traits::source::FetchError;

/// Wire shape of the endpoint response
///
/// Both fields are optional at the wire level. A response without `items`
/// is rejected as [`FetchError::MissingField`]; a response without
/// `num_items` falls back to the length of `items`.
#[derive(Deserialize)]
struct WireFeed {
    num_items: Option<u16>,
    items: Option<Vec<PlanItem, MAX_FEED_ITEMS>>,
}

/// Parse and validate one response body
///
/// String fields are unescaped, so a JSON `\"` in a title comes out as
/// the quote character. The body must fit [`MAX_FEED_BYTES`]; oversized
/// bodies, syntactically invalid JSON, and item fields beyond their
/// capacities are all [`FetchError::Malformed`]. Trailing whitespace
/// after the JSON value is tolerated.
pub fn parse_feed(body: &[u8]) -> Result<PlanFeed, FetchError> {
    if body.len() > MAX_FEED_BYTES {
        return Err(FetchError::Malformed);
    }

    // Escape decoding scratch. Titles are the longest string field, so
    // their capacity bounds any decoded string.
    let mut unescape = [0u8; MAX_TITLE_LEN];
    let (wire, _len) = serde_json_core::de::from_slice_escaped::<WireFeed>(body, &mut unescape)
        .map_err(|_| FetchError::Malformed)?;

    let items = wire.items.ok_or(FetchError::MissingField)?;
    let num_items = wire.num_items.unwrap_or(items.len() as u16);

    Ok(PlanFeed { num_items, items })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ITEMS: &[u8] = br#"{"status":"ok","num_items":2,"items":[{"title":"Standup","startTime":"2026-08-23T09:00:00","endTime":"2026-08-23T09:15:00","displayTime":"09:00 - 09:15"},{"title":"Design review","displayTime":"10:00 - 11:00"}]}"#;

    #[test]
    fn test_parse_keeps_title_and_time_and_skips_the_rest() {
        let feed = parse_feed(TWO_ITEMS).unwrap();
        assert_eq!(feed.num_items, 2);
        assert_eq!(feed.items.len(), 2);
        assert_eq!(feed.items[0].title.as_str(), "Standup");
        assert_eq!(feed.items[0].display_time.as_str(), "09:00 - 09:15");
        assert_eq!(feed.items[1].title.as_str(), "Design review");
    }

    #[test]
    fn test_missing_items_is_missing_field() {
        assert_eq!(
            parse_feed(br#"{"num_items":3}"#),
            Err(FetchError::MissingField)
        );
    }

    #[test]
    fn test_missing_count_defaults_to_item_count() {
        let feed = parse_feed(br#"{"items":[{"title":"a","displayTime":"b"}]}"#).unwrap();
        assert_eq!(feed.num_items, 1);
    }

    #[test]
    fn test_empty_items_array_is_valid() {
        let feed = parse_feed(br#"{"num_items":0,"items":[]}"#).unwrap();
        assert!(feed.items.is_empty());
    }

    #[test]
    fn test_html_error_page_is_malformed() {
        assert_eq!(
            parse_feed(b"<html>502 Bad Gateway</html>"),
            Err(FetchError::Malformed)
        );
    }

    #[test]
    fn test_truncated_json_is_malformed() {
        assert_eq!(
            parse_feed(br#"{"num_items":1,"items":[{"title":"x""#),
            Err(FetchError::Malformed)
        );
    }

    #[test]
    fn test_negative_count_is_malformed() {
        assert_eq!(
            parse_feed(br#"{"num_items":-1,"items":[]}"#),
            Err(FetchError::Malformed)
        );
    }

    #[test]
    fn test_oversized_body_is_malformed() {
        let body = [b' '; MAX_FEED_BYTES + 1];
        assert_eq!(parse_feed(&body), Err(FetchError::Malformed));
    }

    #[test]
    fn test_body_at_budget_is_accepted() {
        let mut body = heapless::Vec::<u8, MAX_FEED_BYTES>::new();
        body.extend_from_slice(br#"{"num_items":0,"items":[]}"#).unwrap();
        while body.len() < MAX_FEED_BYTES {
            body.push(b' ').unwrap();
        }
        assert!(parse_feed(&body).is_ok());
    }

    #[test]
    fn test_overlong_title_is_malformed() {
        let body = br#"{"num_items":1,"items":[{"title":"0123456789012345678901234567890123456789012345678901234567890123","displayTime":"t"}]}"#;
        assert_eq!(parse_feed(body), Err(FetchError::Malformed));
    }

    #[test]
    fn test_escaped_quote_in_title_is_decoded() {
        let feed = parse_feed(
            br#"{"num_items":1,"items":[{"title":"say \"hi\"","displayTime":"09:00"}]}"#,
        )
        .unwrap();
        assert_eq!(feed.items[0].title.as_str(), "say \"hi\"");
    }

    #[test]
    fn test_escaped_backslash_in_title_is_decoded() {
        let feed = parse_feed(
            br#"{"num_items":1,"items":[{"title":"C:\\plans","displayTime":"09:00"}]}"#,
        )
        .unwrap();
        assert_eq!(feed.items[0].title.as_str(), "C:\\plans");
    }

    #[test]
    fn test_raw_utf8_title_is_kept_verbatim() {
        let body = r#"{"num_items":1,"items":[{"title":"打ち合わせ","displayTime":"09:00"}]}"#;
        let feed = parse_feed(body.as_bytes()).unwrap();
        assert_eq!(feed.items[0].title.as_str(), "打ち合わせ");
    }

    #[test]
    fn test_escaped_title_capacity_counts_decoded_bytes() {
        // Thirty quotes occupy sixty wire bytes but decode to thirty
        let mut body = heapless::Vec::<u8, 256>::new();
        body.extend_from_slice(br#"{"num_items":1,"items":[{"title":""#).unwrap();
        for _ in 0..30 {
            body.extend_from_slice(br#"\""#).unwrap();
        }
        body.extend_from_slice(br#"","displayTime":"t"}]}"#).unwrap();

        let feed = parse_feed(&body).unwrap();
        assert_eq!(feed.items[0].title.len(), 30);
        assert!(feed.items[0].title.chars().all(|c| c == '"'));
    }
}
