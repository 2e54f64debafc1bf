//! Search endpoint payloads and the page model the controller commits.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

use crate::alumni_record::AlumniRecord;


/// Body of `api/search` and `api/missing_alumni`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "lenient_list")]
    pub data: Vec<AlumniRecord>,
    pub total_count: Option<u64>,
    pub has_more: Option<bool>,
}

/// One committed page of results. Replaced wholesale on every completed search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResultPage {
    pub rows: Vec<AlumniRecord>,
    pub total_count: u64,
    pub has_more: bool,
    pub page: u64,
}

impl SearchResultPage {
    pub fn from_response(response: SearchResponse, page: u64) -> Self {
        Self {
            rows: response.data,
            total_count: response.total_count.unwrap_or(0),
            has_more: response.has_more.unwrap_or(false),
            page,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Orders one page by year of entry, ascending. Rows without a year go last.
pub fn sort_by_year_of_entry(rows: &mut [AlumniRecord]) {
    rows.sort_by_key(|row| row.year_of_entry.unwrap_or(i64::MAX));
}


/// Decodes a JSON array element by element. Anything that is not an array becomes an empty
/// list, and elements that fail to decode are skipped. For records that means elements that
/// are not objects.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_list_from_value(value))
}

pub fn lenient_list_from_value<T: DeserializeOwned>(value: serde_json::Value) -> Vec<T> {
    let serde_json::Value::Array(items) = value else { return Vec::new() };
    items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_payload() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "data": [{"name": "Asha", "rollNumber": "R1", "yearOfEntry": 2004}],
            "totalCount": 41,
            "hasMore": true
        }))
        .unwrap();
        let page = SearchResultPage::from_response(response, 2);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.total_count, 41);
        assert!(page.has_more);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn tolerates_missing_and_malformed_parts() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "data": "not a list",
            "totalCount": null
        }))
        .unwrap();
        let page = SearchResultPage::from_response(response, 1);
        assert!(page.is_empty());
        assert_eq!(page.total_count, 0);
        assert!(!page.has_more);

        let response: SearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn skips_only_rows_that_are_not_objects() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "data": [{"name": "Asha", "rollNumber": "R1"}, 17, {"name": "Ravi", "yearOfEntry": "soon"}, ["x"], {"name": "Meera"}]
        }))
        .unwrap();
        let names = response.data.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Asha", "Ravi", "Meera"]);
    }

    #[test]
    fn off_type_fields_keep_every_row() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "data": [
                {"serialNo": 12, "name": "Asha", "rollNumber": "R1"},
                {"name": "Ravi", "rollNumber": "R2", "yearOfEntry": "2005"},
                {"name": "Meera", "rollNumber": "R3", "phone": 9876543210u64}
            ],
            "totalCount": 3,
            "hasMore": false
        }))
        .unwrap();
        let page = SearchResultPage::from_response(response, 1);
        assert_eq!(page.rows.len(), 3);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.rows[1].year_of_entry, Some(2005));
        assert_eq!(page.rows[2].phone.as_deref(), Some("9876543210"));
    }

    #[test]
    fn unset_year_sorts_last_and_ties_keep_order() {
        let row = |name: &str, year: Option<i64>| AlumniRecord { name: name.into(), year_of_entry: year, ..Default::default() };
        let mut rows = vec![row("a", None), row("b", Some(2010)), row("c", Some(2001)), row("d", Some(2010)), row("e", None)];
        sort_by_year_of_entry(&mut rows);
        let names = rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["c", "b", "d", "a", "e"]);
    }
}
