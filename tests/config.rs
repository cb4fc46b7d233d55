#![cfg(feature = "cli")]

use std::io::Write;

use pushkind_grid::errors::GridError;
use pushkind_grid::models::config::{load_config, load_config_with_env};
use pushkind_grid::{ColumnRequest, GridRequest, OrderRequest, translate_with};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_config_builds_translation_settings() {
    let file = write_config(
        "max_take: 100\n\
         fields:\n\
         \x20 - name: name\n\
         \x20   maps_to: profile.full_name\n\
         \x20 - name: email\n",
    );

    let grid_config = load_config(file.path().to_str()).unwrap();
    let fields = grid_config.field_map().unwrap().unwrap();

    assert_eq!(grid_config.max_take, Some(100));
    assert_eq!(fields.len(), 2);

    let request = GridRequest::new(0, 1000)
        .search("ann")
        .column(ColumnRequest::new("Name", true, true))
        .column(ColumnRequest::new("phone", true, true))
        .order(OrderRequest::new(1, "asc"))
        .order(OrderRequest::new(0, "desc"));

    let options = translate_with(&request, Some(&fields), &grid_config.translate_options());

    assert_eq!(options.take, 100);
    assert_eq!(
        options.search_fields,
        Some(vec!["profile.full_name".to_string()])
    );
    assert_eq!(options.order_by.map(|order| order.len()), Some(1));
}

#[test]
fn test_environment_overrides_file_settings() {
    let file = write_config("max_take: 100\n");
    let vars = [("GRID_MAX_TAKE".to_string(), "7".to_string())]
        .into_iter()
        .collect();

    let grid_config = load_config_with_env(file.path().to_str(), Some(vars)).unwrap();

    assert_eq!(grid_config.max_take, Some(7));
}

#[test]
fn test_environment_override_is_validated() {
    let file = write_config("max_take: 100\n");
    let vars = [("GRID_MAX_TAKE".to_string(), "0".to_string())]
        .into_iter()
        .collect();

    let result = load_config_with_env(file.path().to_str(), Some(vars));

    assert!(matches!(result, Err(GridError::Validation(_))));
}

#[test]
fn test_load_config_rejects_zero_cap() {
    let file = write_config("max_take: 0\n");

    let result = load_config(file.path().to_str());

    assert!(matches!(result, Err(GridError::Validation(_))));
}

#[test]
fn test_missing_explicit_config_fails() {
    let result = load_config(Some("/nonexistent/grid-config.yaml"));

    assert!(matches!(result, Err(GridError::Config(_))));
}
