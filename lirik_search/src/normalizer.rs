//! Parsing and normalization of raw search input.

use lirik_core::language::LanguageFilter;


pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const MAXIMUM_SEARCH_LIMIT: u32 = 50;


/// A trimmed, non-empty search query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    /// Trims the raw query. Returns `None` if nothing remains,
    /// which callers must treat as "no results" without touching any store.
    pub fn new(raw_query: &str) -> Option<Self> {
        let trimmed_query = raw_query.trim();

        if trimmed_query.is_empty() {
            None
        } else {
            Some(Self(trimmed_query.to_string()))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the full-text match expression for this query.
    ///
    /// In free-text mode the query is passed through unchanged. In title-only mode
    /// every whitespace-separated token is quoted (doubling any inner `"`) and the
    /// tokens are required together in the `title` column: `title:("tok1" AND "tok2")`.
    pub fn match_expression(&self, title_only: bool) -> String {
        if !title_only {
            return self.0.clone();
        }

        let quoted_tokens = self
            .0
            .split_whitespace()
            .map(|token| format!("\"{}\"", token.replace('"', "\"\"")))
            .collect::<Vec<_>>();

        format!("title:({})", quoted_tokens.join(" AND "))
    }
}



/// Query string parameters of a search request, as received.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawSearchParameters<'a> {
    pub query: Option<&'a str>,
    pub limit: Option<&'a str>,
    pub offset: Option<&'a str>,
    pub language: Option<&'a str>,
    pub title_only: Option<&'a str>,
}


/// Fully validated search parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchParameters {
    /// `None` when the query was missing or blank.
    pub query: Option<NormalizedQuery>,

    /// Always in `1..=50`.
    pub limit: u32,

    pub offset: u32,

    pub language: LanguageFilter,

    pub title_only: bool,
}

impl SearchParameters {
    pub fn from_raw(raw: RawSearchParameters<'_>) -> Self {
        Self {
            query: raw.query.and_then(NormalizedQuery::new),
            limit: parse_limit(raw.limit),
            offset: parse_offset(raw.offset),
            language: LanguageFilter::from_query_parameter(raw.language),
            title_only: raw.title_only == Some("1"),
        }
    }

    /// Parameters used for pre-computing popular queries:
    /// free-text mode, all languages, default limit, first page.
    pub fn for_popular_query(query: NormalizedQuery) -> Self {
        Self {
            query: Some(query),
            limit: DEFAULT_SEARCH_LIMIT,
            offset: 0,
            language: LanguageFilter::All,
            title_only: false,
        }
    }
}


/// Parses the leading (optionally signed) integer of a string,
/// ignoring leading whitespace and any trailing garbage (`"20abc"` is `20`).
fn parse_leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();

    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };

    let digit_count = digits
        .bytes()
        .take_while(|byte| byte.is_ascii_digit())
        .count();

    if digit_count == 0 {
        return None;
    }

    // Absurdly long numbers saturate instead of failing.
    let magnitude = digits[..digit_count]
        .parse::<i64>()
        .unwrap_or(i64::MAX);

    Some(sign * magnitude)
}

/// Missing, non-numeric, zero and negative limits fall back to the default;
/// anything above the maximum is clamped.
pub fn parse_limit(raw_limit: Option<&str>) -> u32 {
    match raw_limit.and_then(parse_leading_integer) {
        Some(limit) if limit > 0 => limit.min(MAXIMUM_SEARCH_LIMIT as i64) as u32,
        _ => DEFAULT_SEARCH_LIMIT,
    }
}

/// Missing, non-numeric and negative offsets become zero.
pub fn parse_offset(raw_offset: Option<&str>) -> u32 {
    match raw_offset.and_then(parse_leading_integer) {
        Some(offset) if offset > 0 => offset.min(u32::MAX as i64) as u32,
        _ => 0,
    }
}



#[cfg(test)]
mod tests {
    use lirik_core::language::LanguageCode;

    use super::*;

    #[test]
    fn blank_queries_are_not_queries() {
        assert_eq!(NormalizedQuery::new(""), None);
        assert_eq!(NormalizedQuery::new("  \t\n "), None);
        assert_eq!(
            NormalizedQuery::new("  kasih  ").unwrap().as_str(),
            "kasih"
        );
    }

    #[test]
    fn free_text_expression_is_passed_through() {
        let query = NormalizedQuery::new(" kasih setia ").unwrap();

        assert_eq!(query.match_expression(false), "kasih setia");
    }

    #[test]
    fn title_only_expression_requires_every_token_in_title() {
        let query = NormalizedQuery::new("kasih setia").unwrap();

        assert_eq!(
            query.match_expression(true),
            "title:(\"kasih\" AND \"setia\")"
        );
    }

    #[test]
    fn title_only_expression_escapes_quotes() {
        let query = NormalizedQuery::new("say \"amen\"   now").unwrap();

        assert_eq!(
            query.match_expression(true),
            "title:(\"say\" AND \"\"\"amen\"\"\" AND \"now\")"
        );
    }

    #[test]
    fn symbol_only_queries_still_produce_an_expression() {
        let query = NormalizedQuery::new("?").unwrap();

        assert_eq!(query.match_expression(false), "?");
        assert_eq!(query.match_expression(true), "title:(\"?\")");
    }

    #[test]
    fn clamps_limit() {
        assert_eq!(parse_limit(None), 10);
        assert_eq!(parse_limit(Some("500")), 50);
        assert_eq!(parse_limit(Some("50")), 50);
        assert_eq!(parse_limit(Some("7")), 7);
        assert_eq!(parse_limit(Some("0")), 10);
        assert_eq!(parse_limit(Some("-3")), 10);
        assert_eq!(parse_limit(Some("abc")), 10);
        assert_eq!(parse_limit(Some("20abc")), 20);
        assert_eq!(parse_limit(Some("99999999999999999999999")), 50);
    }

    #[test]
    fn clamps_offset() {
        assert_eq!(parse_offset(None), 0);
        assert_eq!(parse_offset(Some("-5")), 0);
        assert_eq!(parse_offset(Some("x")), 0);
        assert_eq!(parse_offset(Some("20")), 20);
    }

    #[test]
    fn parses_full_parameter_set() {
        let parameters = SearchParameters::from_raw(RawSearchParameters {
            query: Some(" bapa "),
            limit: Some("5"),
            offset: Some("10"),
            language: Some("en"),
            title_only: Some("1"),
        });

        assert_eq!(parameters.query.unwrap().as_str(), "bapa");
        assert_eq!(parameters.limit, 5);
        assert_eq!(parameters.offset, 10);
        assert_eq!(
            parameters.language,
            LanguageFilter::Only(LanguageCode::English)
        );
        assert!(parameters.title_only);

        let defaults = SearchParameters::from_raw(RawSearchParameters {
            title_only: Some("true"),
            ..Default::default()
        });

        assert_eq!(defaults.query, None);
        assert_eq!(defaults.language, LanguageFilter::All);
        assert!(!defaults.title_only);
    }
}
