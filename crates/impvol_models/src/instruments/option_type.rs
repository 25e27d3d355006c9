//! Call/put option type.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Type of a European option.
///
/// # Variants
/// - `Call`: right to buy, payoff max(S - K, 0)
/// - `Put`: right to sell, payoff max(K - S, 0)
///
/// # Examples
/// ```
/// use impvol_models::instruments::OptionType;
///
/// let put: OptionType = "P".parse().unwrap();
/// assert_eq!(put, OptionType::Put);
/// assert_eq!(put.code(), 1);
/// assert_eq!(put.to_string(), "put");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Call option
    Call,
    /// Put option
    Put,
}

impl OptionType {
    /// Numeric encoding used in tabular output: `Call -> 0`, `Put -> 1`.
    #[inline]
    pub fn code(&self) -> u8 {
        match self {
            OptionType::Call => 0,
            OptionType::Put => 1,
        }
    }

    /// Inverse of [`OptionType::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(OptionType::Call),
            1 => Some(OptionType::Put),
            _ => None,
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Error returned when an option type label is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown option type '{0}': expected call, c, put or p")]
pub struct ParseOptionTypeError(pub String);

impl FromStr for OptionType {
    type Err = ParseOptionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(ParseOptionTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        for label in ["call", "Call", "CALL", "c", "C", " call "] {
            assert_eq!(label.parse::<OptionType>().unwrap(), OptionType::Call);
        }
        for label in ["put", "Put", "PUT", "p", "P"] {
            assert_eq!(label.parse::<OptionType>().unwrap(), OptionType::Put);
        }
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = "straddle".parse::<OptionType>().unwrap_err();
        assert_eq!(err, ParseOptionTypeError("straddle".to_string()));
        assert!(err.to_string().contains("straddle"));
        assert!("".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let parsed: OptionType = option_type.to_string().parse().unwrap();
            assert_eq!(parsed, option_type);
        }
    }

    #[test]
    fn test_code() {
        assert_eq!(OptionType::Call.code(), 0);
        assert_eq!(OptionType::Put.code(), 1);
        assert_eq!(OptionType::from_code(0), Some(OptionType::Call));
        assert_eq!(OptionType::from_code(1), Some(OptionType::Put));
        assert_eq!(OptionType::from_code(2), None);
    }

    #[test]
    fn test_predicates() {
        assert!(OptionType::Call.is_call());
        assert!(!OptionType::Call.is_put());
        assert!(OptionType::Put.is_put());
    }
}
