//! Pure normalization of raw batches into entity records
//!
//! Every function here is total over its input and performs no I/O:
//! an identical raw batch always yields an identical normalized batch.
//! Each raw record is paired with its owning unitid by name (the `id`
//! field on the record itself), never by positional index.
//!
//! Location assembly applies the two mapping tables from
//! [`crate::core::mapping`]; their fail-closed/fail-open asymmetry
//! propagates through here unchanged.

use crate::core::mapping::{map_locale, map_region};
use crate::domain::{
    AdmissionRecord, CompassError, ControlRecord, FinanceRecord, LocationRecord, RawRecord,
    Result, SchoolRecord, FIELD_UNITID,
};

/// Canonicalize a zip code to its 5-digit form
///
/// Returns the prefix before the first hyphen if one exists, otherwise the
/// input unchanged. Total and pure over any string input.
///
/// # Examples
///
/// ```
/// use compass::core::transform::canonicalize_zip;
///
/// assert_eq!(canonicalize_zip("98926-1234"), "98926");
/// assert_eq!(canonicalize_zip("98926"), "98926");
/// ```
pub fn canonicalize_zip(zip: &str) -> &str {
    match zip.split_once('-') {
        Some((prefix, _)) => prefix,
        None => zip,
    }
}

/// Owning unitid of a raw record
///
/// # Errors
///
/// Returns a transform error if the record has no integral `id` field; a
/// record that cannot be tied to an institution cannot be loaded anywhere.
fn unitid(record: &RawRecord) -> Result<i32> {
    let id = record
        .int_field(FIELD_UNITID)
        .ok_or_else(|| CompassError::Transform("record is missing the unitid field".to_string()))?;
    i32::try_from(id)
        .map_err(|_| CompassError::Transform(format!("unitid {id} is out of range")))
}

/// Assemble School records from a raw batch
pub fn schools(batch: &[RawRecord]) -> Result<Vec<SchoolRecord>> {
    batch
        .iter()
        .map(|record| {
            Ok(SchoolRecord {
                unitid: unitid(record)?,
                name: record.str_field("school.name"),
                url: record.str_field("school.school_url"),
            })
        })
        .collect()
}

/// Assemble Location records from a raw batch
///
/// Applies zip canonicalization and region/locale mapping. An unknown
/// region code fails the whole batch (fail-closed); an unknown or missing
/// locale degrades to the `"None"` sentinel (fail-open).
pub fn locations(batch: &[RawRecord]) -> Result<Vec<LocationRecord>> {
    batch
        .iter()
        .map(|record| {
            let region = map_region(record.int_field("school.region_id"))?;
            let locale = map_locale(record.int_field("school.locale"));
            Ok(LocationRecord {
                school_unitid: unitid(record)?,
                city: record.str_field("school.city"),
                zipcode: record
                    .str_field("school.zip")
                    .map(|zip| canonicalize_zip(&zip).to_string()),
                state: record.str_field("school.state"),
                region: region.to_string(),
                locale: Some(locale.to_string()),
            })
        })
        .collect()
}

/// Assemble Finance records from a raw batch
///
/// The `latest.*` snapshot carries no year of its own; rows are stamped
/// with the dataset year the run was configured for.
pub fn finances(batch: &[RawRecord], data_year: i32) -> Result<Vec<FinanceRecord>> {
    batch
        .iter()
        .map(|record| {
            Ok(FinanceRecord {
                school_unitid: unitid(record)?,
                year: Some(data_year),
                cost_attendance: record.float_field("latest.cost.attendance.academic_year"),
                avg_net_price: record.float_field("latest.cost.avg_net_price.overall"),
                in_state_tuition: record.float_field("latest.cost.tuition.in_state"),
                out_state_tuition: record.float_field("latest.cost.tuition.out_of_state"),
                tuition_per_fte: record.float_field("latest.school.tuition_revenue_per_fte"),
                instructional_expenditure_per_fte: record
                    .float_field("latest.school.instructional_expenditure_per_fte"),
                avg_faculty_salary: record.float_field("latest.school.faculty_salary"),
            })
        })
        .collect()
}

/// Assemble Control records from a raw batch
///
/// Categorical codes are stored as their raw textual form; the read-path
/// service owns any further presentation mapping.
pub fn controls(batch: &[RawRecord]) -> Result<Vec<ControlRecord>> {
    batch
        .iter()
        .map(|record| {
            Ok(ControlRecord {
                school_unitid: unitid(record)?,
                under_investigation: record.bool_field("school.under_investigation"),
                predominant_deg: categorical(record, "school.degrees_awarded.predominant"),
                highest_deg: categorical(record, "school.degrees_awarded.highest"),
                control: categorical(record, "school.ownership"),
                hbcu: record.bool_field("school.minority_serving.historically_black"),
                religious_affiliation: categorical(record, "school.religious_affiliation"),
                carnegie_undergrad: categorical(record, "school.carnegie_undergrad"),
                carnegie_size: categorical(record, "school.carnegie_size_setting"),
            })
        })
        .collect()
}

/// Assemble Admission records from a raw batch
pub fn admissions(batch: &[RawRecord], data_year: i32) -> Result<Vec<AdmissionRecord>> {
    batch
        .iter()
        .map(|record| {
            Ok(AdmissionRecord {
                school_unitid: unitid(record)?,
                year: Some(data_year),
                admission_rate: record.float_field("latest.admissions.admission_rate.overall"),
                number_of_students: record
                    .int_field("latest.student.size")
                    .and_then(|n| i32::try_from(n).ok()),
                sat_math_median: record
                    .float_field("latest.admissions.sat_scores.midpoint.math"),
                sat_reading_median: record
                    .float_field("latest.admissions.sat_scores.midpoint.critical_reading"),
                sat_writing_median: record
                    .float_field("latest.admissions.sat_scores.midpoint.writing"),
                act_math_median: record.float_field("latest.admissions.act_scores.midpoint.math"),
                act_english_median: record
                    .float_field("latest.admissions.act_scores.midpoint.english"),
                act_writing_median: record
                    .float_field("latest.admissions.act_scores.midpoint.writing"),
                act_cumulative_median: record
                    .float_field("latest.admissions.act_scores.midpoint.cumulative"),
                avg_sat_score_admitted: record
                    .float_field("latest.admissions.sat_scores.average.overall"),
            })
        })
        .collect()
}

/// A categorical field as text, whether the source sent a string or a
/// numeric code
fn categorical(record: &RawRecord, field: &str) -> Option<String> {
    let value = record.field(field);
    if let Some(s) = value.as_str() {
        Some(s.to_string())
    } else if value.is_number() {
        Some(value.to_string())
    } else {
        None
    }
}
