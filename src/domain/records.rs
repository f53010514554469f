//! Raw and normalized record types
//!
//! [`RawRecord`] is one record as returned by the Scorecard API: a JSON
//! object keyed by the requested field identifiers. Records are field-named
//! rather than column-positional, so a reordering of fields by the source
//! can never silently misalign values. A field the source omitted reads as
//! JSON null, preserving alignment with the requested field set.
//!
//! The typed `*Record` structs are the normalized rows produced by the
//! transformer and consumed by the loader. Every dependent record carries
//! `school_unitid`, the foreign key into `schools`.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One raw record from a fetched page
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

/// The set of raw records from one fetched page; the unit of load
/// transactionality downstream
pub type RawBatch = Vec<RawRecord>;

static NULL: Value = Value::Null;

impl RawRecord {
    /// Value of a field, or JSON null if the source omitted it
    pub fn field(&self, name: &str) -> &Value {
        self.0.get(name).unwrap_or(&NULL)
    }

    /// Field as a string, if present and non-null
    pub fn str_field(&self, name: &str) -> Option<String> {
        self.field(name).as_str().map(str::to_owned)
    }

    /// Field as an integer, if present and numeric
    pub fn int_field(&self, name: &str) -> Option<i64> {
        self.field(name).as_i64()
    }

    /// Field as a float, if present and numeric
    ///
    /// Integral JSON numbers are widened, since the API serializes whole
    /// dollar amounts without a decimal point.
    pub fn float_field(&self, name: &str) -> Option<f64> {
        self.field(name).as_f64()
    }

    /// Field as a boolean; numeric 0/1 flags are accepted, matching how the
    /// Scorecard dataset encodes booleans
    pub fn bool_field(&self, name: &str) -> Option<bool> {
        match self.field(name) {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|v| v != 0),
            _ => None,
        }
    }
}

/// Normalized row for the `schools` table (root entity)
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolRecord {
    /// Globally unique stable external identifier; primary key
    pub unitid: i32,
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Normalized row for the `locations` table
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub school_unitid: i32,
    pub city: Option<String>,
    /// Canonical 5-digit zip (any "+4" suffix removed)
    pub zipcode: Option<String>,
    pub state: Option<String>,
    /// Mapped region label; always present (region mapping is fail-closed)
    pub region: String,
    /// Mapped locale label; `"None"` for unclassified institutions
    pub locale: Option<String>,
}

/// Normalized row for the `finances` table
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceRecord {
    pub school_unitid: i32,
    pub year: Option<i32>,
    pub cost_attendance: Option<f64>,
    pub avg_net_price: Option<f64>,
    pub in_state_tuition: Option<f64>,
    pub out_state_tuition: Option<f64>,
    pub tuition_per_fte: Option<f64>,
    pub instructional_expenditure_per_fte: Option<f64>,
    pub avg_faculty_salary: Option<f64>,
}

/// Normalized row for the `controls` table
#[derive(Debug, Clone, PartialEq)]
pub struct ControlRecord {
    pub school_unitid: i32,
    pub under_investigation: Option<bool>,
    pub predominant_deg: Option<String>,
    pub highest_deg: Option<String>,
    pub control: Option<String>,
    pub hbcu: Option<bool>,
    pub religious_affiliation: Option<String>,
    pub carnegie_undergrad: Option<String>,
    pub carnegie_size: Option<String>,
}

/// Normalized row for the `admissions` table
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionRecord {
    pub school_unitid: i32,
    pub year: Option<i32>,
    pub admission_rate: Option<f64>,
    pub number_of_students: Option<i32>,
    pub sat_math_median: Option<f64>,
    pub sat_reading_median: Option<f64>,
    pub sat_writing_median: Option<f64>,
    pub act_math_median: Option<f64>,
    pub act_english_median: Option<f64>,
    pub act_writing_median: Option<f64>,
    pub act_cumulative_median: Option<f64>,
    pub avg_sat_score_admitted: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_field_reads_as_null() {
        let rec = record(json!({ "id": 100654 }));
        assert!(rec.field("school.name").is_null());
        assert_eq!(rec.str_field("school.name"), None);
    }

    #[test]
    fn test_str_field() {
        let rec = record(json!({ "school.city": "Normal" }));
        assert_eq!(rec.str_field("school.city"), Some("Normal".to_string()));
    }

    #[test]
    fn test_int_field() {
        let rec = record(json!({ "id": 100654 }));
        assert_eq!(rec.int_field("id"), Some(100654));
        assert_eq!(rec.int_field("missing"), None);
    }

    #[test]
    fn test_float_field_widens_integers() {
        let rec = record(json!({ "latest.cost.tuition.in_state": 9744 }));
        assert_eq!(rec.float_field("latest.cost.tuition.in_state"), Some(9744.0));
    }

    #[test]
    fn test_bool_field_accepts_numeric_flags() {
        let rec = record(json!({
            "school.under_investigation": 0,
            "school.minority_serving.historically_black": 1,
            "flag": true
        }));
        assert_eq!(rec.bool_field("school.under_investigation"), Some(false));
        assert_eq!(
            rec.bool_field("school.minority_serving.historically_black"),
            Some(true)
        );
        assert_eq!(rec.bool_field("flag"), Some(true));
        assert_eq!(rec.bool_field("missing"), None);
    }

    #[test]
    fn test_deserialize_from_results_array() {
        let records: Vec<RawRecord> = serde_json::from_value(json!([
            { "id": 1, "school.name": "A" },
            { "id": 2, "school.name": "B" }
        ]))
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].int_field("id"), Some(2));
    }
}
