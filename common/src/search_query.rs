//! Shared filter state and the query builder that turns it into request parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::select_option::SelectOption;


/// Searchable fields. Declaration order is the order parameters appear in a built query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Name,
    RollNumber,
    LastOrganization,
    YearOfEntry,
    ProgramName,
    NatureOfJob,
    Specialization,
    Country,
    City,
    LastPosition,
    CollegeClubs,
}

impl FilterField {
    pub const ALL: [FilterField; 11] = [
        FilterField::Name,
        FilterField::RollNumber,
        FilterField::LastOrganization,
        FilterField::YearOfEntry,
        FilterField::ProgramName,
        FilterField::NatureOfJob,
        FilterField::Specialization,
        FilterField::Country,
        FilterField::City,
        FilterField::LastPosition,
        FilterField::CollegeClubs,
    ];

    /// Parameter name understood by the search endpoints.
    pub fn query_key(self) -> &'static str {
        match self {
            FilterField::Name => "name",
            FilterField::RollNumber => "rollNumber",
            FilterField::LastOrganization => "lastOrganization",
            FilterField::YearOfEntry => "yearOfEntry",
            FilterField::ProgramName => "programName",
            FilterField::NatureOfJob => "natureOfJob",
            FilterField::Specialization => "specialization",
            FilterField::Country => "country",
            FilterField::City => "city",
            FilterField::LastPosition => "lastPosition",
            FilterField::CollegeClubs => "collegeClubs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    Text(String),
    Choice(SelectOption),
}

impl FilterValue {
    /// The token that would be sent for this value, before trimming.
    pub fn raw(&self) -> &str {
        match self {
            FilterValue::Text(text) => text,
            FilterValue::Choice(option) => &option.value,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<SelectOption> for FilterValue {
    fn from(value: SelectOption) -> Self {
        FilterValue::Choice(value)
    }
}


/// Sparse map of filter values. City only makes sense for the country it was picked under,
/// so any change to Country drops it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    values: BTreeMap<FilterField, FilterValue>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FilterField, value: impl Into<FilterValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<FilterValue>) {
        let value = value.into();
        if field == FilterField::Country && self.values.get(&FilterField::Country) != Some(&value) {
            self.values.remove(&FilterField::City);
        }
        self.values.insert(field, value);
    }

    pub fn clear_field(&mut self, field: FilterField) {
        self.values.remove(&field);
        if field == FilterField::Country {
            self.values.remove(&FilterField::City);
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn get(&self, field: FilterField) -> Option<&FilterValue> {
        self.values.get(&field)
    }

    /// Trimmed value of a field, or `None` when it is unset or blank.
    pub fn active_value(&self, field: FilterField) -> Option<&str> {
        let value = self.values.get(&field)?.raw().trim();
        if value.is_empty() { None } else { Some(value) }
    }

    pub fn selected_country(&self) -> Option<&SelectOption> {
        match self.values.get(&FilterField::Country) {
            Some(FilterValue::Choice(option)) => Some(option),
            _ => None,
        }
    }

    pub fn has_active_filter(&self, scope: SearchScope) -> bool {
        scope.fields().iter().any(|field| self.active_value(*field).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}


/// Which search endpoint a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchScope {
    /// Full directory search over every filter field.
    Directory,
    /// Records with incomplete data, narrowed by cohort only.
    Missing,
}

impl SearchScope {
    pub fn fields(self) -> &'static [FilterField] {
        match self {
            SearchScope::Directory => &FilterField::ALL,
            SearchScope::Missing => &[FilterField::YearOfEntry, FilterField::ProgramName, FilterField::Specialization],
        }
    }

    pub fn accepts(self, field: FilterField) -> bool {
        self.fields().contains(&field)
    }

    /// Restricted scopes refuse to search without at least one filter.
    pub fn requires_filter(self) -> bool {
        matches!(self, SearchScope::Missing)
    }
}


/// Flat, ordered request parameters. Built fresh for every search, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SearchQuery {
    pub params: Vec<(String, String)>,
}

impl SearchQuery {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.params.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Form-encoded `key=value&...` form, as it would appear in a URL.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new()).extend_pairs(&self.params).finish()
    }
}


/// Directory-scope query: every recognized, non-blank field plus `page` and `limit`.
pub fn build_search_query(filters: &FilterState, page: u64, page_size: u64) -> SearchQuery {
    build_scoped_search_query(SearchScope::Directory, filters, page, page_size)
}

pub fn build_scoped_search_query(scope: SearchScope, filters: &FilterState, page: u64, page_size: u64) -> SearchQuery {
    let mut params = Vec::new();
    for field in scope.fields() {
        let Some(value) = filters.active_value(*field) else { continue };
        let value = match field {
            // the backend matches country codes case-insensitively only when they arrive upper-cased
            FilterField::Country => value.to_uppercase(),
            _ => value.to_string(),
        };
        params.push((field.query_key().to_string(), value));
    }
    params.push(("page".to_string(), page.to_string()));
    params.push(("limit".to_string(), page_size.to_string()));
    SearchQuery { params }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_fields_are_dropped() {
        let filters = FilterState::new().with(FilterField::Name, "  ").with(FilterField::City, "\t");
        let query = build_search_query(&filters, 1, 20);
        assert_eq!(query.keys(), vec!["page", "limit"]);
        assert_eq!(query.get("page"), Some("1"));
        assert_eq!(query.get("limit"), Some("20"));
    }

    #[test]
    fn country_is_upper_cased() {
        let filters = FilterState::new().with(FilterField::Country, "us");
        let query = build_search_query(&filters, 1, 20);
        assert_eq!(query.get("country"), Some("US"));

        let filters = FilterState::new().with(FilterField::Country, SelectOption::new(" in ", "India"));
        let query = build_search_query(&filters, 1, 20);
        assert_eq!(query.get("country"), Some("IN"));
    }

    #[test]
    fn fields_follow_declaration_order() {
        let filters = FilterState::new()
            .with(FilterField::CollegeClubs, "Robotics")
            .with(FilterField::Name, " Asha ")
            .with(FilterField::YearOfEntry, SelectOption::same("2005"))
            .with(FilterField::Country, "in");
        let query = build_search_query(&filters, 3, 20);
        assert_eq!(query.keys(), vec!["name", "yearOfEntry", "country", "collegeClubs", "page", "limit"]);
        assert_eq!(query.get("name"), Some("Asha"));
        assert_eq!(query.get("page"), Some("3"));
    }

    #[test]
    fn missing_scope_ignores_fields_outside_its_subset() {
        let filters = FilterState::new().with(FilterField::Name, "Asha").with(FilterField::ProgramName, SelectOption::same("MBA"));
        let query = build_scoped_search_query(SearchScope::Missing, &filters, 1, 20);
        assert_eq!(query.keys(), vec!["programName", "page", "limit"]);
        assert!(filters.has_active_filter(SearchScope::Missing));

        let only_name = FilterState::new().with(FilterField::Name, "Asha");
        assert!(!only_name.has_active_filter(SearchScope::Missing));
        assert!(only_name.has_active_filter(SearchScope::Directory));
    }

    #[test]
    fn changing_or_clearing_country_drops_city() {
        let india = SelectOption::new("IN", "India");
        let mut filters = FilterState::new().with(FilterField::Country, india.clone()).with(FilterField::City, "Gwalior");

        filters.set(FilterField::Country, india.clone());
        assert_eq!(filters.active_value(FilterField::City), Some("Gwalior"));

        filters.set(FilterField::Country, SelectOption::new("NP", "Nepal"));
        assert_eq!(filters.get(FilterField::City), None);

        filters.set(FilterField::Country, india);
        filters.set(FilterField::City, "Indore");
        filters.clear_field(FilterField::Country);
        assert_eq!(filters.get(FilterField::City), None);
        assert!(filters.is_empty());
    }

    #[test]
    fn query_string_is_percent_encoded() {
        let filters = FilterState::new().with(FilterField::Specialization, SelectOption::same("IT+MBA")).with(FilterField::Name, "A Rao");
        let query = build_search_query(&filters, 2, 20);
        assert_eq!(query.to_query_string(), "name=A+Rao&specialization=IT%2BMBA&page=2&limit=20");
    }

    #[test]
    fn query_string_escapes_reserved_characters() {
        let filters = FilterState::new().with(FilterField::LastOrganization, "AT&T = 100%").with(FilterField::City, "São Paulo");
        let query = build_search_query(&filters, 1, 20);
        assert_eq!(query.to_query_string(), "lastOrganization=AT%26T+%3D+100%25&city=S%C3%A3o+Paulo&page=1&limit=20");
    }
}
