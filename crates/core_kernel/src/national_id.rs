//! Norwegian national identity numbers
//!
//! An identifier is eleven digits: `DDMMYY` birthdate, a three-digit
//! individual number that selects the century, and two mod-11 check digits.
//! Temporary identifiers (D-numbers) add 40 to the day.
//!
//! Validity is a pure function of the digit string; nothing here touches a
//! registry.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const LENGTH: usize = 11;
const D_NUMBER_DAY_OFFSET: u32 = 40;
const FIRST_CHECK_WEIGHTS: [u32; 9] = [3, 7, 6, 1, 8, 9, 4, 5, 2];
const SECOND_CHECK_WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Reasons a digit string is not a national identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NationalIdError {
    #[error("National id must be {LENGTH} digits, got {0}")]
    InvalidLength(usize),

    #[error("National id may only contain digits")]
    NonDigit,

    #[error("National id checksum does not match")]
    Checksum,

    #[error("National id does not encode a valid birthdate")]
    Birthdate,
}

/// A validated eleven-digit national identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId {
    digits: String,
    birthdate: NaiveDate,
}

impl NationalId {
    /// Parses and validates a digit string
    ///
    /// Both check digits must match and the first nine digits must decode
    /// to a real calendar date.
    pub fn parse(value: &str) -> Result<Self, NationalIdError> {
        let length = value.chars().count();
        if length != LENGTH {
            return Err(NationalIdError::InvalidLength(length));
        }
        let digits = to_digits(value)?;

        let first = check_digit(&digits[..9], &FIRST_CHECK_WEIGHTS);
        let second = check_digit(&digits[..10], &SECOND_CHECK_WEIGHTS);
        if first != Some(digits[9]) || second != Some(digits[10]) {
            return Err(NationalIdError::Checksum);
        }

        let birthdate = decode_birthdate(&digits).ok_or(NationalIdError::Birthdate)?;

        Ok(Self {
            digits: value.to_string(),
            birthdate,
        })
    }

    /// Builds an identifier from a birthdate and individual number
    ///
    /// Computes both check digits. Fails with `Checksum` when the first nine
    /// digits have no valid check digit, and with `Birthdate` when the
    /// individual number cannot encode the birth year's century.
    pub fn from_parts(
        birthdate: NaiveDate,
        individual_number: u32,
        d_number: bool,
    ) -> Result<Self, NationalIdError> {
        if individual_number > 999 {
            return Err(NationalIdError::Birthdate);
        }
        let day = birthdate.day() + if d_number { D_NUMBER_DAY_OFFSET } else { 0 };
        let base = format!(
            "{:02}{:02}{:02}{:03}",
            day,
            birthdate.month(),
            birthdate.year().rem_euclid(100),
            individual_number
        );
        let mut digits = to_digits(&base)?;
        let first = check_digit(&digits, &FIRST_CHECK_WEIGHTS).ok_or(NationalIdError::Checksum)?;
        digits.push(first);
        let second = check_digit(&digits, &SECOND_CHECK_WEIGHTS).ok_or(NationalIdError::Checksum)?;

        let id = Self::parse(&format!("{base}{first}{second}"))?;
        if id.birthdate != birthdate {
            return Err(NationalIdError::Birthdate);
        }
        Ok(id)
    }

    /// Returns the raw eleven digits
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Birthdate encoded in the identifier
    pub fn birthdate(&self) -> NaiveDate {
        self.birthdate
    }

    /// True for temporary identifiers whose day carries the +40 offset
    pub fn is_d_number(&self) -> bool {
        self.digits.as_bytes()[0] >= b'4'
    }

    /// Birthdate part followed by a mask, safe for log output
    pub fn masked(&self) -> String {
        format!("{}*****", &self.digits[..6])
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl FromStr for NationalId {
    type Err = NationalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NationalId {
    type Error = NationalIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NationalId> for String {
    fn from(id: NationalId) -> String {
        id.digits
    }
}

fn to_digits(value: &str) -> Result<Vec<u32>, NationalIdError> {
    value
        .chars()
        .map(|c| c.to_digit(10).ok_or(NationalIdError::NonDigit))
        .collect()
}

fn check_digit(digits: &[u32], weights: &[u32]) -> Option<u32> {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match 11 - (sum % 11) {
        11 => Some(0),
        10 => None,
        k => Some(k),
    }
}

fn decode_birthdate(digits: &[u32]) -> Option<NaiveDate> {
    let mut day = digits[0] * 10 + digits[1];
    if day > D_NUMBER_DAY_OFFSET {
        day -= D_NUMBER_DAY_OFFSET;
    }
    let month = digits[2] * 10 + digits[3];
    let yy = (digits[4] * 10 + digits[5]) as i32;
    let individual = digits[6] * 100 + digits[7] * 10 + digits[8];

    let century = match (individual, yy) {
        (0..=499, _) => 1900,
        (500..=749, 54..=99) => 1800,
        (500..=999, 0..=39) => 2000,
        (900..=999, 40..=99) => 1900,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(century + yy, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_parts_roundtrips_through_parse() {
        let id = NationalId::from_parts(date(1971, 6, 11), 123, false).unwrap();
        let parsed = NationalId::parse(id.as_str()).unwrap();
        assert_eq!(parsed.birthdate(), date(1971, 6, 11));
        assert!(!parsed.is_d_number());
    }

    #[test]
    fn test_d_number_offsets_day() {
        let id = NationalId::from_parts(date(1985, 3, 24), 410, true).unwrap();
        assert!(id.as_str().starts_with("64"));
        assert!(id.is_d_number());
        assert_eq!(id.birthdate(), date(1985, 3, 24));
    }

    #[test]
    fn test_rejects_wrong_length_and_letters() {
        assert_eq!(NationalId::parse("1234"), Err(NationalIdError::InvalidLength(4)));
        assert_eq!(NationalId::parse("1234567890a"), Err(NationalIdError::NonDigit));
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(NationalId::parse("1106711239٥"), Err(NationalIdError::NonDigit));
        assert_eq!(NationalId::parse("110671123٩"), Err(NationalIdError::InvalidLength(10)));
    }

    #[test]
    fn test_rejects_corrupted_check_digit() {
        let id = NationalId::from_parts(date(1950, 12, 1), 42, false).unwrap();
        let mut raw = id.as_str().to_string();
        let last = raw.pop().unwrap().to_digit(10).unwrap();
        raw.push(char::from_digit((last + 1) % 10, 10).unwrap());
        assert_eq!(NationalId::parse(&raw), Err(NationalIdError::Checksum));
    }

    #[test]
    fn test_century_from_individual_number() {
        let born_2005 = NationalId::from_parts(date(2005, 1, 15), 512, false).unwrap();
        assert_eq!(born_2005.birthdate().year(), 2005);

        let born_1860 = NationalId::parse("15016060183").unwrap();
        assert_eq!(born_1860.birthdate(), date(1860, 1, 15));

        let born_1948 = NationalId::parse("02084890033").unwrap();
        assert_eq!(born_1948.birthdate(), date(1948, 8, 2));
    }

    #[test]
    fn test_from_parts_reports_unusable_individual_number() {
        assert_eq!(
            NationalId::from_parts(date(1860, 1, 15), 600, false),
            Err(NationalIdError::Checksum)
        );
        assert_eq!(
            NationalId::from_parts(date(1860, 1, 15), 100, false),
            Err(NationalIdError::Birthdate)
        );
    }

    #[test]
    fn test_masked_hides_personal_number() {
        let id = NationalId::from_parts(date(1971, 6, 11), 123, false).unwrap();
        assert_eq!(id.masked(), "110671*****");
    }

    #[test]
    fn test_serde_transparent_string() {
        let id = NationalId::from_parts(date(1971, 6, 11), 123, false).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_str()));
        let back: NationalId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<NationalId>("\"12345678901\"").is_err());
    }
}
