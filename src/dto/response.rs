//! Response envelope expected back by the table widget.

use serde::Serialize;

use crate::domain::request::GridRequest;

/// One page of rows together with the counts the widget needs for paging.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse<T> {
    /// Draw counter of the request being answered.
    pub draw: u64,
    /// Number of rows before filtering.
    pub records_total: u64,
    /// Number of rows after the search was applied.
    pub records_filtered: u64,
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> GridResponse<T> {
    pub fn new(
        request: &GridRequest,
        records_total: u64,
        records_filtered: u64,
        data: Vec<T>,
    ) -> Self {
        Self {
            draw: request.draw.unwrap_or_default(),
            records_total,
            records_filtered,
            data,
            error: None,
        }
    }

    /// Empty response carrying a message the widget displays.
    pub fn error(request: &GridRequest, message: impl Into<String>) -> Self {
        Self {
            draw: request.draw.unwrap_or_default(),
            records_total: 0,
            records_filtered: 0,
            data: Vec::new(),
            error: Some(message.into()),
        }
    }
}
