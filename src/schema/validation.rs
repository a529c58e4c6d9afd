use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::definitions::{
    FamilyMemberRegistration, FamilyRegistration, Field, Registration, FAMILY_NAME_MIN_LEN,
    HEAD_OF_FAMILY_NAME_MIN_LEN, MAX_AGE, MEMBER_NAME_MIN_LEN, MIN_AGE, NATIONAL_ID_DIGITS,
    ROLE_IN_FAMILY_MIN_LEN,
};
use super::normalization::{collapse_country_code, strip_non_digits};
use crate::error::FieldFailure;

lazy_static! {
    /// Rwandan national ID: 16 digits, leading 1 or 2
    static ref NATIONAL_ID_PATTERN: Regex = Regex::new(r"^[12][0-9]{15}$").unwrap();
    /// Rwandan mobile number in local form on the 072/073/078 networks
    static ref PHONE_PATTERN: Regex = Regex::new(r"^(072|073|078)[0-9]{7}$").unwrap();
}

/// Outcome for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub failure: Option<FieldFailure>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

impl FieldResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            failure: None,
            message: None,
        }
    }

    pub fn fail(failure: FieldFailure, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            failure: Some(failure),
            message: Some(message.into()),
        }
    }
}

/// Per-field outcomes plus the aggregate verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub fields: BTreeMap<Field, FieldResult>,
}

impl ValidationResult {
    fn from_fields(fields: impl IntoIterator<Item = (Field, FieldResult)>) -> Self {
        let fields: BTreeMap<Field, FieldResult> = fields.into_iter().collect();
        let is_valid = fields.values().all(|result| result.valid);
        Self { is_valid, fields }
    }

    pub fn field(&self, field: Field) -> Option<&FieldResult> {
        self.fields.get(&field)
    }

    pub fn is_field_valid(&self, field: Field) -> bool {
        self.field(field).map(|result| result.valid).unwrap_or(false)
    }

    /// Failing fields with their messages, in field order
    pub fn errors(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.fields.iter().filter_map(|(field, result)| {
            result.message.as_deref().map(|message| (*field, message))
        })
    }
}

/// Records that can be checked against their field rules
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

/// Validate any registration record
pub fn validate<R: Validate + ?Sized>(record: &R) -> ValidationResult {
    record.validate()
}

impl Validate for FamilyRegistration {
    fn validate(&self) -> ValidationResult {
        ValidationResult::from_fields([
            (
                Field::FamilyName,
                check_min_length(
                    &self.family_name,
                    FAMILY_NAME_MIN_LEN,
                    "Please enter a valid family name (minimum 2 characters)",
                ),
            ),
            (
                Field::HeadOfFamilyName,
                check_min_length(
                    &self.head_of_family_name,
                    HEAD_OF_FAMILY_NAME_MIN_LEN,
                    "Please enter the head of family name (minimum 3 characters)",
                ),
            ),
            (Field::NationalId, check_national_id(&self.national_id)),
            (Field::PhoneNumber, check_phone_number(&self.phone_number)),
            (
                Field::Sector,
                check_present(&self.sector, "Please select your sector"),
            ),
        ])
    }
}

impl Validate for FamilyMemberRegistration {
    fn validate(&self) -> ValidationResult {
        ValidationResult::from_fields([
            (
                Field::MemberName,
                check_min_length(
                    &self.member_name,
                    MEMBER_NAME_MIN_LEN,
                    "Please enter member name (minimum 3 characters)",
                ),
            ),
            (
                Field::Relation,
                check_present(&self.relation, "Please select relationship"),
            ),
            (Field::Age, check_age(&self.age)),
            (
                Field::RoleInFamily,
                check_min_length(
                    &self.role_in_family,
                    ROLE_IN_FAMILY_MIN_LEN,
                    "Please enter role in family (minimum 2 characters)",
                ),
            ),
        ])
    }
}

impl Validate for Registration {
    fn validate(&self) -> ValidationResult {
        match self {
            Registration::Family(record) => record.validate(),
            Registration::Member(record) => record.validate(),
        }
    }
}

/// Non-empty after trimming
pub fn check_present(raw: &str, message: &str) -> FieldResult {
    if raw.trim().is_empty() {
        FieldResult::fail(FieldFailure::Missing, message)
    } else {
        FieldResult::ok()
    }
}

/// Non-empty and at least `min` characters after trimming
pub fn check_min_length(raw: &str, min: usize, message: &str) -> FieldResult {
    let value = raw.trim();
    if value.is_empty() {
        FieldResult::fail(FieldFailure::Missing, message)
    } else if value.chars().count() < min {
        FieldResult::fail(FieldFailure::TooShort { min }, message)
    } else {
        FieldResult::ok()
    }
}

/// Sixteen digits starting with 1 or 2, ignoring separators
pub fn check_national_id(raw: &str) -> FieldResult {
    let value = raw.trim();
    if value.is_empty() {
        return FieldResult::fail(
            FieldFailure::Missing,
            "Please enter a valid Rwandan National ID (16 digits starting with 1 or 2)",
        );
    }

    let digits = strip_non_digits(value);
    if digits.len() != NATIONAL_ID_DIGITS {
        return FieldResult::fail(
            FieldFailure::WrongFormat,
            format!(
                "National ID must contain exactly {} digits (found {})",
                NATIONAL_ID_DIGITS,
                digits.len()
            ),
        );
    }
    if !NATIONAL_ID_PATTERN.is_match(&digits) {
        return FieldResult::fail(
            FieldFailure::WrongFormat,
            "National ID must start with 1 or 2",
        );
    }

    FieldResult::ok()
}

/// Local 072/073/078 mobile number; `+250` is accepted in place of the leading 0
pub fn check_phone_number(raw: &str) -> FieldResult {
    let value = raw.trim();
    if value.is_empty() {
        return FieldResult::fail(
            FieldFailure::Missing,
            "Please enter a valid Rwandan phone number (e.g., 078XXXXXXX)",
        );
    }

    // No truncation here: an overlong number is wrong, not reshaped
    let digits = collapse_country_code(&strip_non_digits(value));
    if !PHONE_PATTERN.is_match(&digits) {
        return FieldResult::fail(
            FieldFailure::WrongFormat,
            "Please enter a valid Rwandan phone number starting with 072, 073 or 078 (e.g., 078XXXXXXX)",
        );
    }

    FieldResult::ok()
}

/// Whole number of years in `MIN_AGE..=MAX_AGE`
pub fn check_age(raw: &str) -> FieldResult {
    const MESSAGE: &str = "Please enter a valid age (0-120)";

    let value = raw.trim();
    if value.is_empty() {
        return FieldResult::fail(FieldFailure::Missing, MESSAGE);
    }

    match value.parse::<i64>() {
        Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => FieldResult::ok(),
        Ok(_) => FieldResult::fail(
            FieldFailure::OutOfRange {
                min: MIN_AGE,
                max: MAX_AGE,
            },
            MESSAGE,
        ),
        Err(_) => FieldResult::fail(FieldFailure::WrongFormat, MESSAGE),
    }
}
