//! Wire models for the Scorecard API

use crate::domain::{CompassError, FetchError, RawBatch, RawRecord, Result};
use serde::Deserialize;

/// One page of the schools endpoint response
///
/// An empty or missing `results` array signals end of data.
#[derive(Debug, Deserialize, Default)]
pub struct SchoolsPage {
    #[serde(default)]
    pub results: Vec<RawRecord>,
}

impl SchoolsPage {
    /// Whether this page signals end of data
    pub fn is_end_of_data(&self) -> bool {
        self.results.is_empty()
    }

    /// Consume the page into a raw batch
    pub fn into_batch(self) -> RawBatch {
        self.results
    }
}

/// A validated, non-empty set of field identifiers to request
///
/// The API requires at least one field; an empty request would page through
/// the entire dataset returning nothing usable.
#[derive(Debug, Clone)]
pub struct Fields<'a>(&'a [&'a str]);

impl<'a> Fields<'a> {
    /// Wrap a field list, rejecting the empty set
    pub fn new(fields: &'a [&'a str]) -> Result<Self> {
        if fields.is_empty() {
            return Err(CompassError::Validation(
                "at least one field identifier is required".to_string(),
            ));
        }
        Ok(Self(fields))
    }

    /// Comma-joined form for the `fields` query parameter
    pub fn to_query_value(&self) -> String {
        self.0.join(",")
    }
}

/// A failed fetch, carrying the progress made before the error
///
/// There is no automatic retry; the caller decides whether the partial
/// batches are worth anything (the orchestrator discards them).
#[derive(Debug)]
pub struct FetchFailure {
    /// What went wrong
    pub error: FetchError,
    /// 0-based index of the page the failure occurred on; also the number
    /// of pages successfully fetched before it
    pub page: u32,
    /// Batches buffered before the failure
    pub partial: Vec<RawBatch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_rejects_empty() {
        assert!(Fields::new(&[]).is_err());
    }

    #[test]
    fn test_fields_query_value() {
        let fields = Fields::new(&["id", "school.name", "school.school_url"]).unwrap();
        assert_eq!(fields.to_query_value(), "id,school.name,school.school_url");
    }

    #[test]
    fn test_page_with_results() {
        let page: SchoolsPage = serde_json::from_value(json!({
            "metadata": { "total": 6289, "page": 0, "per_page": 100 },
            "results": [ { "id": 100654 } ]
        }))
        .unwrap();
        assert!(!page.is_end_of_data());
        assert_eq!(page.into_batch().len(), 1);
    }

    #[test]
    fn test_empty_results_is_end_of_data() {
        let page: SchoolsPage = serde_json::from_value(json!({ "results": [] })).unwrap();
        assert!(page.is_end_of_data());
    }

    #[test]
    fn test_missing_results_is_end_of_data() {
        let page: SchoolsPage = serde_json::from_value(json!({ "metadata": {} })).unwrap();
        assert!(page.is_end_of_data());
    }
}
