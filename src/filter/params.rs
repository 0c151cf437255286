use super::error::FilterError;
use super::filter::EntityFilter;
use super::listable::{Listable, SortKey};
use super::types::{Page, SortDirection, SqlParam};

/// Raw filter parameters pulled from a list request's query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub search: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    pub states: Vec<String>,
    pub other: Vec<(String, String)>,
}

impl ListParams {
    pub fn parse(raw_query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(raw) = raw_query else {
            return params;
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "search" => {
                    let term = value.trim();
                    if !term.is_empty() {
                        params.search = Some(term.to_string());
                    }
                }
                "sort_field" => params.sort_field = Some(value.into_owned()),
                "sort_order" => params.sort_order = Some(value.into_owned()),
                // repeated and/or comma-separated
                "state" => params.states.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string),
                ),
                _ => params.other.push((key.into_owned(), value.into_owned())),
            }
        }

        params
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.other
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Turn request parameters into a typed filter for `T`, rejecting unknown
/// sort fields and malformed numeric values.
pub fn build_filter<T: Listable>(params: &ListParams, tenant_id: i64, page: Page) -> Result<EntityFilter<T>, FilterError> {
    let mut filter = EntityFilter::<T>::new(tenant_id, page);

    if let Some(field) = params.sort_field.as_deref().filter(|f| !f.is_empty()) {
        filter.sort = T::Sort::parse(field).ok_or_else(|| FilterError::InvalidSortField(field.to_string()))?;
    }
    if let Some(order) = params.sort_order.as_deref().filter(|o| !o.is_empty()) {
        filter.order = SortDirection::parse(order)?;
    }

    if !params.states.is_empty() {
        filter.states = params
            .states
            .iter()
            .map(|s| {
                s.parse::<i16>().map_err(|_| FilterError::InvalidParameter {
                    name: "state".to_string(),
                    value: s.clone(),
                })
            })
            .collect::<Result<_, _>>()?;
    }

    for column in T::FOREIGN_KEYS {
        if let Some(raw) = params.get(column).filter(|v| !v.is_empty()) {
            let id = raw.parse::<i64>().map_err(|_| FilterError::InvalidParameter {
                name: column.to_string(),
                value: raw.to_string(),
            })?;
            filter.equals.push((*column, SqlParam::BigInt(id)));
        }
    }

    filter.search = params.search.clone();

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter::tests::{Gadget, GadgetSort};

    fn page() -> Page {
        Page::Offset { offset: 0, limit: 25 }
    }

    #[test]
    fn parses_repeated_and_comma_separated_states() {
        let params = ListParams::parse(Some("state=1,2&state=3&search=%20bob%20"));
        assert_eq!(params.states, vec!["1", "2", "3"]);
        assert_eq!(params.search.as_deref(), Some("bob"));
    }

    #[test]
    fn missing_query_yields_defaults() {
        let filter = build_filter::<Gadget>(&ListParams::parse(None), 8, page()).unwrap();
        assert_eq!(filter.states, vec![1]);
        assert_eq!(filter.sort, GadgetSort::Name);
        assert_eq!(filter.order, SortDirection::Asc);
        assert!(filter.search.is_none());
    }

    #[test]
    fn applies_sort_and_foreign_keys() {
        let params = ListParams::parse(Some("sort_field=id&sort_order=desc&owner_id=12&unknown=x"));
        let filter = build_filter::<Gadget>(&params, 8, page()).unwrap();

        assert_eq!(filter.sort, GadgetSort::Id);
        assert_eq!(filter.order, SortDirection::Desc);
        assert_eq!(filter.equals, vec![("owner_id", SqlParam::BigInt(12))]);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let params = ListParams::parse(Some("sort_field=password_hash"));
        assert!(matches!(
            build_filter::<Gadget>(&params, 1, page()),
            Err(FilterError::InvalidSortField(f)) if f == "password_hash"
        ));
    }

    #[test]
    fn malformed_state_is_rejected() {
        let params = ListParams::parse(Some("state=active"));
        assert!(matches!(
            build_filter::<Gadget>(&params, 1, page()),
            Err(FilterError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn malformed_foreign_key_is_rejected() {
        let params = ListParams::parse(Some("owner_id=abc"));
        assert!(build_filter::<Gadget>(&params, 1, page()).is_err());
    }
}
