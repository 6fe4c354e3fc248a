//! Query construction (pure).
//!
//! Maps `{mode, form values, page}` to a [`SearchRequest`] and its wire
//! payload `{"id": <template id>, "params": {...}}`. No validation happens
//! here: empty fields are sent as empty strings and the search service
//! decides what they mean.

pub mod pagination;

pub use pagination::{PageItem, ROWS_PER_PAGE};

use crate::model::{FormField, SearchForm, SearchMode};
use serde::Serialize;
use std::collections::BTreeMap;

/// A template parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Text field, passed through verbatim (possibly empty).
    Text(String),
    /// Numeric paging parameter (`from` / `size`).
    Number(u64),
}

/// A fully built search request.
///
/// Constructed fresh for every search action and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    mode: SearchMode,
    params: BTreeMap<&'static str, ParamValue>,
    offset: u64,
    limit: u32,
}

/// Wire body POSTed to the search-template endpoint.
#[derive(Debug, Serialize)]
pub struct TemplatePayload<'a> {
    /// Stored template id.
    pub id: &'static str,
    /// Template parameters.
    pub params: &'a BTreeMap<&'static str, ParamValue>,
}

impl SearchRequest {
    /// Mode the request was built for.
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Template parameters keyed by wire name.
    pub fn params(&self) -> &BTreeMap<&'static str, ParamValue> {
        &self.params
    }

    /// Row offset (`from`).
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Page size (`size`).
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Body to POST.
    pub fn payload(&self) -> TemplatePayload<'_> {
        TemplatePayload {
            id: self.mode.template_id(),
            params: &self.params,
        }
    }
}

/// Build the request for `mode` from the current form values and page.
pub fn build_request(mode: SearchMode, form: &SearchForm, page: u32) -> SearchRequest {
    let offset = pagination::offset(page);
    let limit = ROWS_PER_PAGE;
    let text = |field: FormField| ParamValue::Text(form.get(field).to_string());

    let mut params = BTreeMap::new();
    match mode {
        SearchMode::BasicPerson => {
            params.insert("query_string", text(FormField::SearchText));
        }
        SearchMode::AdvancedPerson => {
            params.insert("name", text(FormField::SearchText));
            params.insert("state", text(FormField::State));
            params.insert("country", text(FormField::Country));
        }
        SearchMode::Exclusion => {
            params.insert("agency", text(FormField::Agency));
            params.insert("exclusion_type", text(FormField::ExclusionType));
        }
        SearchMode::DateRange => {
            params.insert("start_date", text(FormField::StartDate));
            params.insert("end_date", text(FormField::EndDate));
        }
        SearchMode::Classification => {
            params.insert("classification", text(FormField::Classification));
            params.insert("query_string", text(FormField::SearchText));
        }
        SearchMode::AggregationTemplate => {}
    }

    if !mode.is_aggregation() {
        params.insert("from", ParamValue::Number(offset));
        params.insert("size", ParamValue::Number(u64::from(limit)));
    }

    SearchRequest {
        mode,
        params,
        offset,
        limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(request: &SearchRequest) -> Vec<&'static str> {
        request.params().keys().copied().collect()
    }

    #[test]
    fn basic_person_keys() {
        let req = build_request(SearchMode::BasicPerson, &SearchForm::new(), 1);
        assert_eq!(keys(&req), vec!["from", "query_string", "size"]);
    }

    #[test]
    fn advanced_person_maps_search_text_to_name() {
        let mut form = SearchForm::new();
        form.set(FormField::SearchText, "Smith");
        let req = build_request(SearchMode::AdvancedPerson, &form, 1);
        assert_eq!(
            keys(&req),
            vec!["country", "from", "name", "size", "state"]
        );
        assert_eq!(
            req.params()["name"],
            ParamValue::Text("Smith".to_string())
        );
    }

    #[test]
    fn unset_fields_are_empty_strings_not_omitted() {
        let req = build_request(SearchMode::Exclusion, &SearchForm::new(), 1);
        assert_eq!(req.params()["agency"], ParamValue::Text(String::new()));
        assert_eq!(
            req.params()["exclusion_type"],
            ParamValue::Text(String::new())
        );
    }

    #[test]
    fn page_three_starts_at_twenty() {
        for mode in SearchMode::ALL.into_iter().filter(|m| !m.is_aggregation()) {
            let req = build_request(mode, &SearchForm::new(), 3);
            assert_eq!(req.offset(), 20);
            assert_eq!(req.params()["from"], ParamValue::Number(20));
            assert_eq!(req.params()["size"], ParamValue::Number(10));
        }
    }

    #[test]
    fn aggregation_template_has_empty_params() {
        let req = build_request(SearchMode::AggregationTemplate, &SearchForm::new(), 4);
        assert!(req.params().is_empty());
    }

    #[test]
    fn fields_of_other_modes_are_ignored() {
        let mut form = SearchForm::new();
        form.set(FormField::Agency, "HHS");
        let req = build_request(SearchMode::DateRange, &form, 1);
        assert!(!req.params().contains_key("agency"));
    }

    #[test]
    fn payload_carries_template_id() {
        let req = build_request(SearchMode::Classification, &SearchForm::new(), 1);
        let json = serde_json::to_value(req.payload()).unwrap();
        assert_eq!(json["id"], "classification_search");
        assert_eq!(json["params"]["from"], 0);
        assert_eq!(json["params"]["classification"], "");
    }
}
