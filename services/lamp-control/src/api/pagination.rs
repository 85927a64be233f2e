//! Offset-cursor pagination over the ordered lamp listing.
//!
//! # Protocol
//! A page request carries an optional opaque `cursor` and an optional
//! `pageSize`. The cursor decodes to a non-negative offset into the active set
//! ordered by `(created_at, id)`. The list handler fetches one row more than
//! the page size; a full lookahead means another page exists and the next
//! cursor is simply `offset + page_size`.
//!
//! # Fail-open cursors
//! A cursor that does not parse, or parses negative, behaves exactly like no
//! cursor at all (offset 0). This is a deliberate policy for a forgiving
//! listing API, not an error path, and it is pinned by tests.
use crate::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Decode an opaque cursor into an offset. Absent, unparseable, and negative
/// cursors all fall back to the first page.
pub fn decode_cursor(cursor: Option<&str>) -> u64 {
    cursor
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|offset| *offset >= 0)
        .map(|offset| offset as u64)
        .unwrap_or(0)
}

/// Normalize a client-supplied page size.
///
/// `None` and non-positive values fall back to the default; oversized values
/// clamp to the maximum. The store itself never enforces these bounds.
pub fn normalize_page_size(page_size: Option<i64>) -> i64 {
    match page_size {
        Some(value) if value > 0 => value.min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Turn a lookahead fetch (up to `page_size + 1` rows) into the final page.
///
/// Returns the truncated page, the next cursor, and the has-more flag.
pub fn finish_page<T>(mut rows: Vec<T>, offset: u64, page_size: i64) -> (Vec<T>, Option<String>, bool) {
    if rows.len() as i64 > page_size {
        rows.truncate(page_size as usize);
        let next_offset = offset + page_size as u64;
        (rows, Some(next_offset.to_string()), true)
    } else {
        (rows, None, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_cursor_starts_at_zero() {
        assert_eq!(decode_cursor(None), 0);
    }

    #[test]
    fn valid_cursor_decodes_to_offset() {
        assert_eq!(decode_cursor(Some("25")), 25);
        assert_eq!(decode_cursor(Some("0")), 0);
    }

    #[test]
    fn garbage_and_negative_cursors_fail_open() {
        assert_eq!(decode_cursor(Some("not-a-number")), 0);
        assert_eq!(decode_cursor(Some("")), 0);
        assert_eq!(decode_cursor(Some("-10")), 0);
        assert_eq!(decode_cursor(Some("12.5")), 0);
    }

    #[test]
    fn page_size_defaults_and_clamps() {
        assert_eq!(normalize_page_size(None), DEFAULT_PAGE_SIZE);
        assert_eq!(normalize_page_size(Some(0)), DEFAULT_PAGE_SIZE);
        assert_eq!(normalize_page_size(Some(-5)), DEFAULT_PAGE_SIZE);
        assert_eq!(normalize_page_size(Some(10)), 10);
        assert_eq!(normalize_page_size(Some(100)), 100);
        assert_eq!(normalize_page_size(Some(500)), MAX_PAGE_SIZE);
    }

    #[test]
    fn full_lookahead_truncates_and_advances_cursor() {
        let rows: Vec<u32> = (0..26).collect();
        let (page, next, has_more) = finish_page(rows, 0, 25);
        assert_eq!(page.len(), 25);
        assert_eq!(next.as_deref(), Some("25"));
        assert!(has_more);
    }

    #[test]
    fn short_page_ends_the_listing() {
        let rows: Vec<u32> = (0..5).collect();
        let (page, next, has_more) = finish_page(rows, 25, 25);
        assert_eq!(page.len(), 5);
        assert_eq!(next, None);
        assert!(!has_more);
    }

    #[test]
    fn exactly_full_page_without_lookahead_row_ends_the_listing() {
        let rows: Vec<u32> = (0..25).collect();
        let (page, next, has_more) = finish_page(rows, 0, 25);
        assert_eq!(page.len(), 25);
        assert_eq!(next, None);
        assert!(!has_more);
    }
}
