//! Result type alias used throughout the crate

use crate::domain::errors::CompassError;

/// Convenience alias for `std::result::Result<T, CompassError>`
///
/// All fallible operations in Compass return this type so callers can use
/// the `?` operator without repeating the error type.
pub type Result<T, E = CompassError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn fallible(fail: bool) -> Result<u32> {
        if fail {
            Err(CompassError::Validation("boom".to_string()))
        } else {
            Ok(42)
        }
    }

    #[test]
    fn test_result_alias_ok() {
        assert_eq!(fallible(false).unwrap(), 42);
    }

    #[test]
    fn test_result_alias_err() {
        assert!(fallible(true).is_err());
    }
}
