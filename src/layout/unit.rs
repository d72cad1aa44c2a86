//! Parsing of absolute and percentage unit strings

use std::str::FromStr;

use super::error::ConstraintError;
use super::types::Measure;

impl FromStr for Measure {
    type Err = ConstraintError;

    /// Parse `"12"`, `" 12.5 "` or `"50%"`
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (number, percent) = match trimmed.strip_suffix('%') {
            Some(prefix) => (prefix.trim_end(), true),
            None => (trimmed, false),
        };
        let value: f64 = number
            .parse()
            .map_err(|_| ConstraintError::invalid_unit(raw))?;
        if !value.is_finite() {
            return Err(ConstraintError::invalid_unit(raw));
        }
        Ok(if percent {
            Measure::Percent(value)
        } else {
            Measure::Px(value)
        })
    }
}

impl TryFrom<&str> for Measure {
    type Error = ConstraintError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// Convert an optional unit string into an absolute value against `base`
///
/// Absent input stays absent: the constraint simply was not supplied.
pub fn parse_unit(raw: Option<&str>, base: f64) -> Result<Option<f64>, ConstraintError> {
    raw.map(|s| s.parse::<Measure>().map(|m| m.resolve(base)))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_scales_by_base() {
        assert_eq!(parse_unit(Some("50%"), 200.0), Ok(Some(100.0)));
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(parse_unit(Some("42"), 200.0), Ok(Some(42.0)));
        assert_eq!(parse_unit(Some(" 7.5 "), 10.0), Ok(Some(7.5)));
    }

    #[test]
    fn test_absent_stays_absent() {
        assert_eq!(parse_unit(None, 200.0), Ok(None));
    }

    #[test]
    fn test_whitespace_around_percent() {
        assert_eq!(" 25 % ".parse::<Measure>(), Ok(Measure::Percent(25.0)));
    }

    #[test]
    fn test_negative_values() {
        assert_eq!("-10".parse::<Measure>(), Ok(Measure::Px(-10.0)));
        assert_eq!("-10%".parse::<Measure>(), Ok(Measure::Percent(-10.0)));
    }

    #[test]
    fn test_invalid_unit() {
        assert!(matches!(
            parse_unit(Some("ten"), 100.0),
            Err(ConstraintError::InvalidUnit { .. })
        ));
        assert!("%".parse::<Measure>().is_err());
        assert!("12px".parse::<Measure>().is_err());
    }
}
