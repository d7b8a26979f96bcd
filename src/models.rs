use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, WidgetError};

pub const NO_TITLE: &str = "No title available";
pub const NO_LINK: &str = "#";

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

/// One hit as the backend sends it. Both fields are optional on the wire,
/// anything else the backend attaches is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub link: Option<String>,
}

impl SearchResult {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
        }
    }

    pub fn display_title(&self) -> &str {
        non_empty(&self.title).unwrap_or(NO_TITLE)
    }

    pub fn href(&self) -> &str {
        non_empty(&self.link).unwrap_or(NO_LINK)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// Scalars are shown in textual form; falsy ones (0, false) count as missing.
// Objects and arrays are treated as missing too.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => number_text(&n),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

// Integral floats print without a trailing `.0`, as a browser shows them.
fn number_text(n: &serde_json::Number) -> Option<String> {
    if n.is_f64() {
        n.as_f64().filter(|f| *f != 0.0).map(|f| f.to_string())
    } else if n.as_f64() == Some(0.0) {
        None
    } else {
        Some(n.to_string())
    }
}

/// A parsed success body: either the expected array of hits or some other
/// JSON value, which callers treat as an empty result set.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResponse {
    Hits(Vec<SearchResult>),
    Other(Value),
}

impl SearchResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    Value::Null => Err(WidgetError::MalformedResult(idx)),
                    Value::Object(_) => Ok(serde_json::from_value(item)?),
                    _ => Ok(SearchResult::default()),
                })
                .collect::<Result<Vec<_>>>()
                .map(SearchResponse::Hits),
            other => Ok(SearchResponse::Other(other)),
        }
    }

    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            SearchResponse::Hits(results) => results,
            SearchResponse::Other(_) => Vec::new(),
        }
    }
}

#[test]
fn test_request_body_keeps_query_verbatim() {
    let body = serde_json::to_string(&SearchRequest { query: "  rust  " }).unwrap();
    assert_eq!(body, r#"{"query":"  rust  "}"#);
}

#[test]
fn test_result_fallbacks() {
    let empty = SearchResult::default();
    assert_eq!(empty.display_title(), NO_TITLE);
    assert_eq!(empty.href(), NO_LINK);

    let blank: SearchResult = serde_json::from_str(r#"{"title":"","link":""}"#).unwrap();
    assert_eq!(blank.display_title(), NO_TITLE);
    assert_eq!(blank.href(), NO_LINK);

    let full = SearchResult::new("A", "http://x");
    assert_eq!(full.display_title(), "A");
    assert_eq!(full.href(), "http://x");
}

#[test]
fn test_result_lenient_fields() {
    let hit: SearchResult = serde_json::from_str(
        r#"{"title":42,"link":null,"total_words":310,"stopwords_percent_norm":0.4}"#,
    )
    .unwrap();
    assert_eq!(hit.title.as_deref(), Some("42"));
    assert_eq!(hit.link, None);

    let float: SearchResult =
        serde_json::from_str(r#"{"title":1.0,"link":{"a":1}}"#).unwrap();
    assert_eq!(float.title.as_deref(), Some("1"));
    assert_eq!(float.href(), NO_LINK);

    let fractional: SearchResult = serde_json::from_str(r#"{"title":2.5}"#).unwrap();
    assert_eq!(fractional.title.as_deref(), Some("2.5"));

    let falsy: SearchResult = serde_json::from_str(r#"{"title":0,"link":false}"#).unwrap();
    assert_eq!(falsy, SearchResult::default());
}

#[test]
fn test_response_shapes() {
    let hits = SearchResponse::from_slice(br#"[{"title":"A","link":"http://x"},{}]"#).unwrap();
    assert_eq!(
        hits,
        SearchResponse::Hits(vec![SearchResult::new("A", "http://x"), SearchResult::default()])
    );

    let other = SearchResponse::from_slice(br#"{"unexpected":true}"#).unwrap();
    assert!(matches!(other, SearchResponse::Other(_)));
    assert!(other.into_results().is_empty());

    let scalars = SearchResponse::from_slice(br#"[1,"two"]"#).unwrap();
    assert_eq!(scalars.into_results(), vec![SearchResult::default(); 2]);
}

#[test]
fn test_response_failures() {
    assert!(matches!(
        SearchResponse::from_slice(b"<html>oops</html>"),
        Err(WidgetError::Parse(_))
    ));
    assert!(matches!(
        SearchResponse::from_slice(br#"[{"title":"A"},null]"#),
        Err(WidgetError::MalformedResult(1))
    ));
}
