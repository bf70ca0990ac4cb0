//! Chilean RUT (Rol Único Tributario) handling: cleaning, modulus-11 check
//! digit computation, validation and the dotted display format.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MortgageCreditError;
use crate::MortgageCreditResult;

/// A RUT whose check digit has been verified. Stored in cleaned form
/// (`"123456785"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rut(String);

impl Rut {
    pub fn parse(raw: &str) -> MortgageCreditResult<Rut> {
        let cleaned = clean_rut(raw);
        let (body, check) = split(&cleaned).ok_or_else(|| {
            MortgageCreditError::validation("rut", format!("'{raw}' is not a RUT"))
        })?;
        let expected = check_digit(body)?;
        if check != expected {
            return Err(MortgageCreditError::validation(
                "rut",
                format!("check digit '{check}' does not match expected '{expected}'"),
            ));
        }
        Ok(Rut(cleaned))
    }

    /// Digits before the check character.
    pub fn body(&self) -> &str {
        &self.0[..self.0.len() - 1]
    }

    pub fn check(&self) -> char {
        self.0.chars().last().unwrap_or('0')
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_rut(&self.0))
    }
}

impl TryFrom<String> for Rut {
    type Error = MortgageCreditError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rut::parse(&value)
    }
}

impl From<Rut> for String {
    fn from(rut: Rut) -> Self {
        format_rut(&rut.0)
    }
}

/// Strip everything but ASCII letters and digits and lowercase the rest.
pub fn clean_rut(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Modulus-11 check character for a digit body: weights 2..7 cycle from the
/// least significant digit, 11 maps to '0' and 10 to 'k'.
pub fn check_digit(body: &str) -> MortgageCreditResult<char> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MortgageCreditError::validation(
            "rut",
            format!("body '{body}' must be a non-empty run of digits"),
        ));
    }

    let sum: u32 = body
        .bytes()
        .rev()
        .zip((2..=7).cycle())
        .map(|(b, weight)| u32::from(b - b'0') * weight)
        .sum();

    Ok(match 11 - sum % 11 {
        11 => '0',
        10 => 'k',
        d => char::from_digit(d, 10).unwrap_or('0'),
    })
}

/// Whether `raw` is a well-formed RUT with a matching check digit. Formatting
/// characters are ignored and 'K' is accepted in either case.
pub fn validate_rut(raw: &str) -> bool {
    Rut::parse(raw).is_ok()
}

/// Render a RUT as `12.345.678-5`. Input is cleaned first; the check
/// character is not verified.
pub fn format_rut(raw: &str) -> String {
    let cleaned = clean_rut(raw);
    let Some((body, check)) = cleaned
        .char_indices()
        .last()
        .map(|(i, c)| (&cleaned[..i], c))
    else {
        return String::new();
    };

    if body.is_empty() {
        return check.to_string();
    }

    let mut grouped = String::with_capacity(body.len() + body.len() / 3 + 2);
    for (i, c) in body.chars().enumerate() {
        if i > 0 && (body.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{grouped}-{check}")
}

fn split(cleaned: &str) -> Option<(&str, char)> {
    if cleaned.len() < 2 {
        return None;
    }
    let (body, check) = cleaned.split_at(cleaned.len() - 1);
    let check = check.chars().next()?;
    if !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !(check.is_ascii_digit() || check == 'k') {
        return None;
    }
    Some((body, check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_check_digits() {
        assert_eq!(check_digit("12345678").unwrap(), '5');
        assert_eq!(check_digit("11111111").unwrap(), '1');
        // sum % 11 == 1 -> 10 -> 'k'
        assert_eq!(check_digit("10000013").unwrap(), 'k');
        // sum % 11 == 0 -> 11 -> '0'
        assert_eq!(check_digit("10000004").unwrap(), '0');
    }

    #[test]
    fn test_validate_accepts_formatting() {
        assert!(validate_rut("12.345.678-5"));
        assert!(validate_rut("12345678-5"));
        assert!(validate_rut(" 123456785 "));
        assert!(validate_rut("10.000.013-K"));
    }

    #[test]
    fn test_validate_rejects_wrong_digit() {
        assert!(!validate_rut("12.345.678-6"));
        assert!(!validate_rut("12.345.678-k"));
        assert!(!validate_rut("10.000.004-k"));
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert!(!validate_rut(""));
        assert!(!validate_rut("5"));
        assert!(!validate_rut("12a45678-5"));
        assert!(!validate_rut("12345678-x"));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_rut("123456785"), "12.345.678-5");
        assert_eq!(format_rut("9.876.543-3"), "9.876.543-3");
        assert_eq!(format_rut("1k"), "1-k");
        assert_eq!(format_rut("k"), "k");
        assert_eq!(format_rut(""), "");
    }

    #[test]
    fn test_parse_reports_validation_error() {
        match Rut::parse("12.345.678-9") {
            Err(MortgageCreditError::Validation { field, .. }) => assert_eq!(field, "rut"),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_rut_accessors_and_display() {
        let rut = Rut::parse("12.345.678-5").unwrap();
        assert_eq!(rut.body(), "12345678");
        assert_eq!(rut.check(), '5');
        assert_eq!(rut.to_string(), "12.345.678-5");
    }
}
