//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Datelike, NaiveDate};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;

use core_kernel::{BenefitType, CaseType, EventType, NationalId, RelationTag};

/// Strategy for birthdates whose century an individual number can encode
///
/// Days stop at 28 so every month is valid.
pub fn birthdate_strategy() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2040, 1u32..=12, 1u32..=28)
        .prop_filter_map("valid date", |(year, month, day)| NaiveDate::from_ymd_opt(year, month, day))
}

/// Strategy for individual numbers matching the birth year's century
pub fn individual_number_strategy(year: i32) -> BoxedStrategy<u32> {
    if year < 2000 {
        (0u32..500).boxed()
    } else {
        (500u32..1000).boxed()
    }
}

/// Strategy for valid national ids, ordinary and D-numbers
///
/// Combinations whose check digit would be 10 are skipped.
pub fn national_id_strategy() -> impl Strategy<Value = NationalId> {
    (birthdate_strategy(), any::<bool>())
        .prop_flat_map(|(birthdate, d_number)| {
            (Just(birthdate), individual_number_strategy(birthdate.year()), Just(d_number))
        })
        .prop_filter_map("check digit 10", |(birthdate, individual, d_number)| {
            NationalId::from_parts(birthdate, individual, d_number).ok()
        })
}

pub fn case_type_strategy() -> impl Strategy<Value = CaseType> {
    prop::sample::select(CaseType::ALL.to_vec())
}

pub fn event_type_strategy() -> impl Strategy<Value = EventType> {
    prop::sample::select(EventType::ALL.to_vec())
}

pub fn benefit_type_strategy() -> impl Strategy<Value = BenefitType> {
    prop::sample::select(BenefitType::ALL.to_vec())
}

pub fn relation_strategy() -> impl Strategy<Value = RelationTag> {
    prop::sample::select(RelationTag::ALL.to_vec())
}

/// A random first and last name
pub fn fake_name() -> (String, String) {
    (FirstName().fake(), LastName().fake())
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_ids_roundtrip_through_parse(id in national_id_strategy()) {
            let parsed = NationalId::parse(id.as_str()).unwrap();
            prop_assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_fake_name_is_not_blank() {
        let (first, last) = fake_name();
        assert!(!first.trim().is_empty());
        assert!(!last.trim().is_empty());
    }
}
