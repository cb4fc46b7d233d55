//! Translation of DataTables-style grid requests into backend-agnostic query
//! options, guarded by per-type field maps.

pub mod domain;
pub mod dto;
pub mod errors;
pub mod fields;
#[cfg(feature = "cli")]
pub mod models;
pub mod services;

pub use domain::query::{OrderBy, QueryOptions, SortDirection};
pub use domain::request::{ColumnRequest, GridRequest, OrderRequest, SearchRequest};
pub use fields::{FieldMap, GridFields, field_map};
pub use services::{TranslateOptions, translate, translate_for, translate_with};
