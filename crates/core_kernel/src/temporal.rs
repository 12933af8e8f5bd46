//! Date helpers shared by extraction and routing
//!
//! Ages are always computed against an explicit reference date so routing
//! stays a pure function of its input.

use chrono::{Datelike, NaiveDate};

/// Date format used for birthdates in structured documents
pub const DOCUMENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Age in whole years on the given date
///
/// Returns 0 when the birthdate lies after `on`.
pub fn age_on(birthdate: NaiveDate, on: NaiveDate) -> u32 {
    let mut age = on.year() - birthdate.year();

    // Birthday not yet reached this year
    if (on.month(), on.day()) < (birthdate.month(), birthdate.day()) {
        age -= 1;
    }

    age.max(0) as u32
}

/// Parses a document birthdate, ignoring surrounding whitespace
pub fn parse_document_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DOCUMENT_DATE_FORMAT).ok()
}
