//! Ingestion entity types
//!
//! Each entity corresponds to one destination table and one set of Scorecard
//! API fields. The ingestion order is fixed: `School` must be loaded before
//! any of its dependents, because every other table carries a foreign key to
//! `schools.unitid`.

use std::fmt;

/// Raw field identifier for the institution's stable external identifier
///
/// Present in every entity's field list; it becomes `unitid` /
/// `school_unitid` in the destination schema.
pub const FIELD_UNITID: &str = "id";

/// An entity type ingested by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// Root entity: institution identity (unitid, name, url)
    School,
    /// City, state, canonical zip, mapped region and locale labels
    Location,
    /// Cost, tuition and salary metrics
    Finance,
    /// Institutional classification flags and categorical fields
    Control,
    /// Admission rate and test-score medians
    Admission,
}

impl Entity {
    /// All entities in dependency order: School first, dependents after
    pub const ORDERED: [Entity; 5] = [
        Entity::School,
        Entity::Location,
        Entity::Finance,
        Entity::Control,
        Entity::Admission,
    ];

    /// Scorecard API field identifiers requested for this entity
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Entity::School => &[FIELD_UNITID, "school.name", "school.school_url"],
            Entity::Location => &[
                FIELD_UNITID,
                "school.city",
                "school.state",
                "school.zip",
                "school.region_id",
                "school.locale",
            ],
            Entity::Finance => &[
                FIELD_UNITID,
                "latest.cost.attendance.academic_year",
                "latest.cost.avg_net_price.overall",
                "latest.cost.tuition.in_state",
                "latest.cost.tuition.out_of_state",
                "latest.school.tuition_revenue_per_fte",
                "latest.school.instructional_expenditure_per_fte",
                "latest.school.faculty_salary",
            ],
            Entity::Control => &[
                FIELD_UNITID,
                "school.under_investigation",
                "school.degrees_awarded.predominant",
                "school.degrees_awarded.highest",
                "school.ownership",
                "school.minority_serving.historically_black",
                "school.religious_affiliation",
                "school.carnegie_undergrad",
                "school.carnegie_size_setting",
            ],
            Entity::Admission => &[
                FIELD_UNITID,
                "latest.admissions.admission_rate.overall",
                "latest.student.size",
                "latest.admissions.sat_scores.midpoint.math",
                "latest.admissions.sat_scores.midpoint.critical_reading",
                "latest.admissions.sat_scores.midpoint.writing",
                "latest.admissions.act_scores.midpoint.math",
                "latest.admissions.act_scores.midpoint.english",
                "latest.admissions.act_scores.midpoint.writing",
                "latest.admissions.act_scores.midpoint.cumulative",
                "latest.admissions.sat_scores.average.overall",
            ],
        }
    }

    /// Destination table name
    pub fn table(&self) -> &'static str {
        match self {
            Entity::School => "schools",
            Entity::Location => "locations",
            Entity::Finance => "finances",
            Entity::Control => "controls",
            Entity::Admission => "admissions",
        }
    }

}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::School => "school",
            Entity::Location => "location",
            Entity::Finance => "finance",
            Entity::Control => "control",
            Entity::Admission => "admission",
        };
        write!(f, "{name}")
    }
}
