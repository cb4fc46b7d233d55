//! Field metadata declarations and the case-insensitive field map built from
//! them.
//!
//! A type exposes its grid fields by implementing [`GridFields`], usually via
//! [`grid_fields!`](crate::grid_fields). Each declared field may carry a
//! serialization-name override (`as "name"`) and a maps-to override
//! (`=> "path"`):
//!
//! ```
//! use pushkind_grid::grid_fields;
//!
//! pub struct ClientRow {
//!     pub id: i32,
//!     pub full_name: String,
//!     pub email: String,
//! }
//!
//! grid_fields!(ClientRow, CamelCase {
//!     id,
//!     full_name => "name",
//!     email as "contact" => "profile.email",
//! });
//!
//! let fields = pushkind_grid::fields::field_map::<ClientRow>();
//! assert_eq!(fields.resolve("FULLNAME"), Some("name"));
//! assert_eq!(fields.resolve("contact"), Some("profile.email"));
//! assert_eq!(fields.resolve("email"), None);
//! ```

use std::collections::HashMap;

mod cache;

pub use cache::field_map;

/// Naming convention applied to fields without an explicit external name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameCase {
    /// The field's own name.
    #[default]
    Verbatim,
    /// `snake_case` field names become `camelCase`.
    CamelCase,
    /// `snake_case` field names become `PascalCase`.
    PascalCase,
}

impl NameCase {
    pub fn apply(self, name: &str) -> String {
        let name = name.strip_prefix("r#").unwrap_or(name);
        if self == NameCase::Verbatim {
            return name.to_string();
        }

        let mut converted = String::with_capacity(name.len());
        let mut upper = self == NameCase::PascalCase;
        for ch in name.chars() {
            if ch == '_' {
                upper = self == NameCase::PascalCase || !converted.is_empty();
                continue;
            }
            if upper {
                converted.extend(ch.to_uppercase());
                upper = false;
            } else {
                converted.push(ch);
            }
        }
        converted
    }
}

/// Declared metadata of a single exposed field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name of the struct field.
    pub name: &'static str,
    /// Serialization-name override.
    pub rename: Option<&'static str>,
    /// Maps-to override naming the internal storage path.
    pub maps_to: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            rename: None,
            maps_to: None,
        }
    }

    pub const fn rename(self, external: &'static str) -> Self {
        Self {
            rename: Some(external),
            ..self
        }
    }

    pub const fn maps_to(self, internal: &'static str) -> Self {
        Self {
            maps_to: Some(internal),
            ..self
        }
    }

    /// Name the client sees: the override, else the converted field name.
    pub fn external_name(&self, case: NameCase) -> String {
        match self.rename {
            Some(external) => external.to_string(),
            None => case.apply(self.name),
        }
    }

    /// Storage path: the maps-to override, else the external name.
    pub fn internal_path(&self, case: NameCase) -> String {
        match self.maps_to {
            Some(internal) => internal.to_string(),
            None => self.external_name(case),
        }
    }
}

/// Types whose fields may be searched and sorted through a grid request.
pub trait GridFields: 'static {
    const NAME_CASE: NameCase = NameCase::Verbatim;

    /// Exposed fields in declaration order.
    fn grid_fields() -> Vec<FieldSpec>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct FieldEntry {
    external: String,
    internal: String,
}

/// Case-insensitive map from external field names to internal field paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: HashMap<String, FieldEntry>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map declared by `T`. Prefer [`field_map`], which caches it.
    pub fn for_type<T: GridFields>() -> Self {
        T::grid_fields()
            .iter()
            .map(|spec| {
                (
                    spec.external_name(T::NAME_CASE),
                    spec.internal_path(T::NAME_CASE),
                )
            })
            .collect()
    }

    /// Registers a field. A later registration of the same external name
    /// (in any case) replaces the earlier one, whose path is returned.
    pub fn insert(
        &mut self,
        external: impl Into<String>,
        internal: impl Into<String>,
    ) -> Option<String> {
        let external = external.into();
        let internal = internal.into();
        let previous = self
            .entries
            .insert(external.to_lowercase(), FieldEntry { external, internal })?;
        log::debug!(
            "Field `{}` redeclared, `{}` replaced",
            previous.external,
            previous.internal
        );
        Some(previous.internal)
    }

    /// Internal path for an external name, compared case-insensitively.
    pub fn resolve(&self, external: &str) -> Option<&str> {
        self.entries
            .get(&external.to_lowercase())
            .map(|entry| entry.internal.as_str())
    }

    pub fn contains(&self, external: &str) -> bool {
        self.resolve(external).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(external, internal)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|entry| (entry.external.as_str(), entry.internal.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (external, internal) in iter {
            map.insert(external, internal);
        }
        map
    }
}

/// Implements [`GridFields`] for a struct from a list of its fields.
///
/// Each entry is `field`, optionally followed by `as "externalName"` and/or
/// `=> "internal.path"`. An optional [`NameCase`] variant after the type
/// sets the convention for fields without `as`. Listing a field the struct
/// does not have is a compile error.
#[macro_export]
macro_rules! grid_fields {
    ($ty:ty { $($body:tt)* }) => {
        $crate::grid_fields!($ty, Verbatim { $($body)* });
    };
    ($ty:ty, $case:ident {
        $($field:ident $(as $external:literal)? $(=> $internal:literal)?),* $(,)?
    }) => {
        impl $crate::fields::GridFields for $ty {
            const NAME_CASE: $crate::fields::NameCase = $crate::fields::NameCase::$case;

            fn grid_fields() -> ::std::vec::Vec<$crate::fields::FieldSpec> {
                let _ = |value: &$ty| {
                    $( let _ = &value.$field; )*
                };

                ::std::vec![
                    $(
                        $crate::fields::FieldSpec::new(stringify!($field))
                            $(.rename($external))?
                            $(.maps_to($internal))?
                    ),*
                ]
            }
        }
    };
}
