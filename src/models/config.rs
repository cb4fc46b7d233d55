//! Configuration model loaded from external sources.

use config::{Config, Environment, File, FileFormat, Map};
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{FieldName, FieldPath};
use crate::errors::GridResult;
use crate::fields::FieldMap;
use crate::services::TranslateOptions;

/// Configuration file read when no explicit path is given.
pub const DEFAULT_CONFIG: &str = "config/default";

/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "GRID";

/// One explicitly registered grid field.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct FieldConfig {
    /// Name the client may search and sort by.
    #[validate(length(min = 1))]
    pub name: String,
    /// Storage path; defaults to `name`.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub maps_to: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Translation settings for the command-line translator.
pub struct GridConfig {
    /// Largest page size a client may request.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub max_take: Option<u64>,
    /// Allowed fields. Empty means any field name passes through.
    #[serde(default)]
    #[validate(nested)]
    pub fields: Vec<FieldConfig>,
}

impl GridConfig {
    /// Field map of the registered fields, later entries winning, or `None`
    /// when no fields are registered.
    pub fn field_map(&self) -> GridResult<Option<FieldMap>> {
        if self.fields.is_empty() {
            return Ok(None);
        }

        let mut map = FieldMap::new();
        for field in &self.fields {
            let name = FieldName::new(field.name.as_str())?;
            let path = match &field.maps_to {
                Some(path) => FieldPath::new(path.as_str())?.into_inner(),
                None => name.as_str().to_string(),
            };
            map.insert(name.into_inner(), path);
        }
        Ok(Some(map))
    }

    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions {
            max_take: self.max_take,
        }
    }
}

/// Loads and validates the configuration.
///
/// Reads the YAML file at `path` (required) or `config/default.yaml`
/// (optional), then applies `GRID_*` environment overrides such as
/// `GRID_MAX_TAKE`.
pub fn load_config(path: Option<&str>) -> GridResult<GridConfig> {
    load_config_with_env(path, None)
}

/// Same as [`load_config`], taking overrides from `vars` instead of the
/// process environment when given.
pub fn load_config_with_env(
    path: Option<&str>,
    vars: Option<Map<String, String>>,
) -> GridResult<GridConfig> {
    let file = match path {
        Some(path) => File::new(path, FileFormat::Yaml),
        None => File::with_name(DEFAULT_CONFIG).required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        )
        .build()?;

    let grid_config = settings.try_deserialize::<GridConfig>()?;
    grid_config.validate()?;
    Ok(grid_config)
}
