//! Translation of widget grid requests into [`QueryOptions`].
//!
//! Invalid or hostile input never fails the translation: bad column indices,
//! blank or unknown field names and disabled columns are dropped.

use crate::domain::query::{OrderBy, QueryOptions, SortDirection};
use crate::domain::request::{ColumnRequest, GridRequest};
use crate::fields::{FieldMap, GridFields, field_map};

/// Policy applied on top of the plain translation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Upper bound for a positive page size. A zero take is left alone.
    pub max_take: Option<u64>,
}

impl TranslateOptions {
    pub fn max_take(mut self, max_take: u64) -> Self {
        self.max_take = Some(max_take);
        self
    }
}

/// Translates `request`, checking field names against `fields` when given.
pub fn translate(request: &GridRequest, fields: Option<&FieldMap>) -> QueryOptions {
    translate_with(request, fields, &TranslateOptions::default())
}

/// Translates `request` against the cached field map of `T`.
pub fn translate_for<T: GridFields>(request: &GridRequest) -> QueryOptions {
    translate(request, Some(field_map::<T>()))
}

/// Translates `request` and applies `options`.
pub fn translate_with(
    request: &GridRequest,
    fields: Option<&FieldMap>,
    options: &TranslateOptions,
) -> QueryOptions {
    let skip = u64::try_from(request.start).unwrap_or(0);
    let mut take = u64::try_from(request.length).unwrap_or(0);
    if let Some(max_take) = options.max_take {
        if take > max_take {
            log::warn!("Requested page size {take} capped to {max_take}");
            take = max_take;
        }
    }

    let search = request
        .search
        .as_ref()
        .and_then(|search| search.value.as_deref())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string);

    let search_fields = if search.is_some() {
        non_empty(
            request
                .columns
                .iter()
                .filter(|column| column.searchable)
                .filter_map(|column| resolve_field(column, fields))
                .collect(),
        )
    } else {
        None
    };

    let order_by = non_empty(
        request
            .order
            .iter()
            .filter_map(|order| {
                let column = order
                    .column
                    .and_then(|index| usize::try_from(index).ok())
                    .and_then(|index| request.columns.get(index));
                let Some(column) = column else {
                    log::debug!("Dropping order on missing column {:?}", order.column);
                    return None;
                };
                if !column.orderable {
                    log::debug!("Dropping order on non-orderable column {:?}", column.data);
                    return None;
                }
                let field = resolve_field(column, fields)?;
                Some(OrderBy::new(
                    field,
                    SortDirection::parse(order.dir.as_deref()),
                ))
            })
            .collect(),
    );

    QueryOptions {
        skip,
        take,
        search,
        search_fields,
        order_by,
    }
}

/// Field a column exposes: its name mapped through `fields`, or verbatim when
/// no map is given. `None` for blank or unknown names.
fn resolve_field(column: &ColumnRequest, fields: Option<&FieldMap>) -> Option<String> {
    let name = column
        .data
        .as_deref()
        .filter(|name| !name.trim().is_empty())?;

    match fields {
        None => Some(name.to_string()),
        Some(fields) => {
            let resolved = fields.resolve(name).map(str::to_string);
            if resolved.is_none() {
                log::debug!("Dropping unknown field `{name}`");
            }
            resolved
        }
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::{ColumnRequest, OrderRequest, SearchRequest};

    fn sample_request() -> GridRequest {
        GridRequest::new(0, 25)
            .search("smith")
            .column(ColumnRequest::new("name", true, true))
            .column(ColumnRequest::new("email", false, true))
    }

    #[test]
    fn translates_basic_request() {
        let request = sample_request().order(OrderRequest::new(0, "asc"));

        let options = translate(&request, None);

        assert_eq!(
            options,
            QueryOptions {
                skip: 0,
                take: 25,
                search: Some("smith".to_string()),
                search_fields: Some(vec!["name".to_string()]),
                order_by: Some(vec![OrderBy::new("name", SortDirection::Asc)]),
            }
        );
    }

    #[test]
    fn out_of_range_order_is_dropped() {
        let request = sample_request().order(OrderRequest::new(5, "desc"));

        let options = translate(&request, None);

        assert_eq!(options.order_by, None);
        assert_eq!(options.search_fields, Some(vec!["name".to_string()]));
    }

    #[test]
    fn blank_search_skips_search_fields() {
        let mut request = sample_request();
        request.search = Some(SearchRequest::new("   "));

        let options = translate(&request, None);

        assert_eq!(options.search, None);
        assert_eq!(options.search_fields, None);
    }

    #[test]
    fn search_value_is_kept_verbatim() {
        let mut request = sample_request();
        request.search = Some(SearchRequest::new("  john  smith "));

        let options = translate(&request, None);

        assert_eq!(options.search.as_deref(), Some("  john  smith "));
    }

    #[test]
    fn negative_paging_is_clamped() {
        let options = translate(&GridRequest::new(-10, -1), None);

        assert_eq!(options.skip, 0);
        assert_eq!(options.take, 0);
    }

    #[test]
    fn max_take_caps_positive_takes_only() {
        let options = TranslateOptions::default().max_take(100);

        let capped = translate_with(&GridRequest::new(0, 5000), None, &options);
        assert_eq!(capped.take, 100);

        let within = translate_with(&GridRequest::new(0, 50), None, &options);
        assert_eq!(within.take, 50);

        let unlimited = translate_with(&GridRequest::new(0, -1), None, &options);
        assert_eq!(unlimited.take, 0);
    }

    #[test]
    fn blank_and_missing_data_are_skipped() {
        let request = GridRequest::new(0, 10)
            .search("x")
            .column(ColumnRequest::new("  ", true, true))
            .column(ColumnRequest {
                data: None,
                searchable: true,
                orderable: true,
            })
            .order(OrderRequest::new(0, "asc"))
            .order(OrderRequest::new(1, "asc"));

        let options = translate(&request, None);

        assert_eq!(options.search_fields, None);
        assert_eq!(options.order_by, None);
    }

    #[test]
    fn field_map_translates_and_filters() {
        let fields: FieldMap = [("Name", "profile.full_name")].into_iter().collect();
        let request = GridRequest::new(0, 10)
            .search("a")
            .column(ColumnRequest::new("name", true, true))
            .column(ColumnRequest::new("password_hash", true, true))
            .order(OrderRequest::new(1, "desc"))
            .order(OrderRequest::new(0, "DESC"));

        let options = translate(&request, Some(&fields));

        assert_eq!(
            options.search_fields,
            Some(vec!["profile.full_name".to_string()])
        );
        assert_eq!(
            options.order_by,
            Some(vec![OrderBy::new("profile.full_name", SortDirection::Desc)])
        );
    }

    #[test]
    fn missing_order_index_is_dropped() {
        let request = sample_request().order(OrderRequest {
            column: None,
            dir: Some("desc".to_string()),
        });

        assert_eq!(translate(&request, None).order_by, None);
    }
}
