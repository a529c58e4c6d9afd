use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum trimmed length of a family name
pub const FAMILY_NAME_MIN_LEN: usize = 2;
/// Minimum trimmed length of the head of family's name
pub const HEAD_OF_FAMILY_NAME_MIN_LEN: usize = 3;
/// Minimum trimmed length of a member's name
pub const MEMBER_NAME_MIN_LEN: usize = 3;
/// Minimum trimmed length of a member's role in the family
pub const ROLE_IN_FAMILY_MIN_LEN: usize = 2;

/// Number of digits in a Rwandan national ID
pub const NATIONAL_ID_DIGITS: usize = 16;
/// Number of digits in a local Rwandan mobile number (leading 0 included)
pub const PHONE_DIGITS: usize = 10;
/// International dialing prefix collapsed to a leading 0
pub const COUNTRY_CODE: &str = "250";

pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 120;

/// Every field the validator reports on, across both record shapes.
///
/// Ordering follows declaration order and is what keys the per-field map in a
/// `ValidationResult`, so results never depend on evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FamilyName,
    HeadOfFamilyName,
    NationalId,
    PhoneNumber,
    Sector,
    MemberName,
    Relation,
    Age,
    RoleInFamily,
}

impl Field {
    /// Identifier used by the presentation layer for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FamilyName => "familyName",
            Field::HeadOfFamilyName => "headOfFamilyName",
            Field::NationalId => "nationalId",
            Field::PhoneNumber => "phoneNumber",
            Field::Sector => "sector",
            Field::MemberName => "memberName",
            Field::Relation => "relation",
            Field::Age => "age",
            Field::RoleInFamily => "roleInFamily",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of a family registration, in reporting order
pub const FAMILY_FIELDS: [Field; 5] = [
    Field::FamilyName,
    Field::HeadOfFamilyName,
    Field::NationalId,
    Field::PhoneNumber,
    Field::Sector,
];

/// Fields of a member registration, in reporting order
pub const MEMBER_FIELDS: [Field; 4] = [
    Field::MemberName,
    Field::Relation,
    Field::Age,
    Field::RoleInFamily,
];

/// Primary record representing a household unit.
///
/// A snapshot assembled by the presentation layer at submit time. Values are
/// kept exactly as entered; trimming happens during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRegistration {
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub head_of_family_name: String,
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub sector: String,
}

/// One individual belonging to a family.
///
/// `age` holds the raw form value so that non-numeric input can be reported
/// as a field failure instead of being rejected at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberRegistration {
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub relation: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub role_in_family: String,
}

/// Either record shape, tagged by `kind` when exchanged as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Registration {
    Family(FamilyRegistration),
    Member(FamilyMemberRegistration),
}

impl From<FamilyRegistration> for Registration {
    fn from(record: FamilyRegistration) -> Self {
        Registration::Family(record)
    }
}

impl From<FamilyMemberRegistration> for Registration {
    fn from(record: FamilyMemberRegistration) -> Self {
        Registration::Member(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_identifiers_match_serde_names() {
        for field in FAMILY_FIELDS.iter().chain(MEMBER_FIELDS.iter()) {
            let serialized = serde_json::to_value(field).unwrap();
            assert_eq!(serialized, json!(field.as_str()));
        }
    }

    #[test]
    fn test_family_registration_from_form_json() {
        let record: FamilyRegistration = serde_json::from_value(json!({
            "familyName": "Uwimana",
            "headOfFamilyName": "Jean Uwimana",
            "nationalId": "1 1990 1234 5678 901",
            "phoneNumber": "078 812 3456",
            "sector": "Kibungo"
        }))
        .unwrap();

        assert_eq!(record.family_name, "Uwimana");
        assert_eq!(record.national_id, "1 1990 1234 5678 901");
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let record: FamilyMemberRegistration =
            serde_json::from_value(json!({ "memberName": "Aline" })).unwrap();

        assert_eq!(record.member_name, "Aline");
        assert!(record.relation.is_empty());
        assert!(record.age.is_empty());
    }

    #[test]
    fn test_registration_is_tagged_by_kind() {
        let registration: Registration = serde_json::from_value(json!({
            "kind": "member",
            "memberName": "Aline",
            "relation": "Child",
            "age": "12",
            "roleInFamily": "Student"
        }))
        .unwrap();

        match registration {
            Registration::Member(member) => assert_eq!(member.age, "12"),
            other => panic!("expected member registration, got {:?}", other),
        }
    }
}
