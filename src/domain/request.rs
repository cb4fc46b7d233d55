//! Grid request as posted by a DataTables-style table widget.
//!
//! Every field is parsed leniently: values of the wrong JSON type degrade to
//! their defaults instead of failing the whole request, so a client probing
//! with garbage only loses the garbage.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::GridResult;

/// Global free-text search term.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    /// Sent by the widget; regular expression search is not supported.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub regex: bool,
}

/// One client-declared table column.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ColumnRequest {
    /// Field name the column is bound to. Non-string bindings are `None`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub data: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub searchable: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub orderable: bool,
}

/// Sort instruction referencing a column by position.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct OrderRequest {
    #[serde(default, deserialize_with = "lenient_index")]
    pub column: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dir: Option<String>,
}

/// Paging, search and sort parameters of a single widget draw.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct GridRequest {
    /// Draw counter echoed back in [`crate::dto::response::GridResponse`].
    #[serde(default, deserialize_with = "lenient_draw")]
    pub draw: Option<u64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub start: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub length: i64,
    #[serde(default, deserialize_with = "lenient_search")]
    pub search: Option<SearchRequest>,
    #[serde(default, deserialize_with = "lenient_columns")]
    pub columns: Vec<ColumnRequest>,
    #[serde(default, deserialize_with = "lenient_order")]
    pub order: Vec<OrderRequest>,
}

impl SearchRequest {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            regex: false,
        }
    }
}

impl ColumnRequest {
    pub fn new(data: impl Into<String>, searchable: bool, orderable: bool) -> Self {
        Self {
            data: Some(data.into()),
            searchable,
            orderable,
        }
    }
}

impl OrderRequest {
    pub fn new(column: i64, dir: impl Into<String>) -> Self {
        Self {
            column: Some(column),
            dir: Some(dir.into()),
        }
    }
}

impl GridRequest {
    pub fn new(start: i64, length: i64) -> Self {
        Self {
            start,
            length,
            ..Self::default()
        }
    }

    /// Parses a JSON request body. Only syntactically broken JSON fails.
    pub fn from_json(payload: &str) -> GridResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn draw(mut self, draw: u64) -> Self {
        self.draw = Some(draw);
        self
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(SearchRequest::new(value));
        self
    }

    pub fn column(mut self, column: ColumnRequest) -> Self {
        self.columns.push(column);
        self
    }

    pub fn order(mut self, order: OrderRequest) -> Self {
        self.order.push(order);
        self
    }
}

/// Whole numbers only; `20.0` is accepted, `1.9` is not.
fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(int_from_value(&value).unwrap_or_default())
}

fn lenient_index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(int_from_value(&value))
}

fn lenient_draw<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(int_from_value(&value).and_then(|draw| u64::try_from(draw).ok()))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_search<'de, D>(deserializer: D) -> Result<Option<SearchRequest>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_columns<'de, D>(deserializer: D) -> Result<Vec<ColumnRequest>, D::Error>
where
    D: Deserializer<'de>,
{
    // Malformed columns keep their slot so order indices stay aligned.
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_order<'de, D>(deserializer: D) -> Result<Vec<OrderRequest>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
