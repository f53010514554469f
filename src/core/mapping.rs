//! Code-to-label mapping tables
//!
//! The Scorecard dataset encodes region and locale as numeric codes. The
//! two mappings fail differently on purpose:
//!
//! - [`map_region`] is **fail-closed**: the source documents exactly ten
//!   region codes (0-9), so any other value means the dataset and this
//!   mapping have diverged and the run must stop.
//! - [`map_locale`] is **fail-open**: institutions without an urbanization
//!   classification are legitimate, so an unknown or absent code yields the
//!   [`LOCALE_NONE`] sentinel instead of an error.
//!
//! This asymmetry is a domain property, not an inconsistency.

use crate::domain::MappingError;

/// Sentinel label for institutions without a locale classification
pub const LOCALE_NONE: &str = "None";

/// Map a region code (0-9) to its descriptive label
///
/// # Errors
///
/// Returns [`MappingError::UnknownRegionCode`] for any code outside the
/// documented enumeration. Pass `None` when the source record carried no
/// region code; that is equally fatal.
pub fn map_region(code: Option<i64>) -> Result<&'static str, MappingError> {
    let label = match code {
        Some(0) => "U.S. Service Schools",
        Some(1) => "New England (CT, ME, MA, NH, RI, VT)",
        Some(2) => "Mid East (DE, DC, MD, NJ, NY, PA)",
        Some(3) => "Great Lakes (IL, IN, MI, OH, WI)",
        Some(4) => "Plains (IA, KS, MN, MO, NE, ND, SD)",
        Some(5) => "Southeast (AL, AR, FL, GA, KY, LA, MS, NC, SC, TN, VA, WV)",
        Some(6) => "Southwest (AZ, NM, OK, TX)",
        Some(7) => "Rocky Mountains (CO, ID, MT, UT, WY)",
        Some(8) => "Far West (AK, CA, HI, NV, OR, WA)",
        Some(9) => "Outlying Areas (AS, FM, GU, MH, MP, PR, PW, VI)",
        other => return Err(MappingError::UnknownRegionCode { code: other }),
    };
    Ok(label)
}

/// Map a two-digit locale code to its descriptive label
///
/// Unknown or absent codes yield [`LOCALE_NONE`] without failing.
pub fn map_locale(code: Option<i64>) -> &'static str {
    match code {
        Some(11) => "City: Large (population of 250,000 or more)",
        Some(12) => "City: Midsize (population of at least 100,000 but less than 250,000)",
        Some(13) => "City: Small (population less than 100,000)",
        Some(21) => "Suburb: Large (outside principal city, in urbanized area with population of 250,000 or more)",
        Some(22) => "Suburb: Midsize (outside principal city, in urbanized area with population of at least 100,000 but less than 250,000)",
        Some(23) => "Suburb: Small (outside principal city, in urbanized area with population less than 100,000)",
        Some(31) => "Town: Fringe (in urban cluster up to 10 miles from an urbanized area)",
        Some(32) => "Town: Distant (in urban cluster more than 10 miles and up to 35 miles from an urbanized area)",
        Some(33) => "Town: Remote (in urban cluster more than 35 miles from an urbanized area)",
        Some(41) => "Rural: Fringe (rural territory up to 5 miles from an urbanized area or up to 2.5 miles from an urban cluster)",
        Some(42) => "Rural: Distant (rural territory more than 5 miles but up to 25 miles from an urbanized area or more than 2.5 and up to 10 miles from an urban cluster)",
        Some(43) => "Rural: Remote (rural territory more than 25 miles from an urbanized area and more than 10 miles from an urban cluster)",
        _ => LOCALE_NONE,
    }
}
