use duhigure::config::CatalogConfig;
use duhigure::error::FieldFailure;
use duhigure::schema::{format_national_id_display, format_phone_display};
use duhigure::{
    normalize_national_id, normalize_phone, validate, FamilyMemberRegistration,
    FamilyRegistration, Field, Registration, Validate,
};
use serde_json::json;

fn family(national_id: &str, phone_number: &str) -> FamilyRegistration {
    FamilyRegistration {
        family_name: "Ndayisaba".to_string(),
        head_of_family_name: "Claudine Ndayisaba".to_string(),
        national_id: national_id.to_string(),
        phone_number: phone_number.to_string(),
        sector: "Bumbogo".to_string(),
    }
}

fn member(age: &str) -> FamilyMemberRegistration {
    FamilyMemberRegistration {
        member_name: "Eric Ndayisaba".to_string(),
        relation: "Child".to_string(),
        age: age.to_string(),
        role_in_family: "Student".to_string(),
    }
}

#[test]
fn test_documented_national_id_examples() {
    let valid = validate(&family("1199012345678901", "0788123456"));
    assert!(valid.is_valid);

    let fifteen_digits = validate(&family("219901234567890", "0788123456"));
    assert!(!fifteen_digits.is_valid);
    let field = fifteen_digits.field(Field::NationalId).unwrap();
    assert!(field.message.as_deref().unwrap().contains("16 digits"));

    let leading_three = validate(&family("3199012345678901", "0788123456"));
    assert!(!leading_three.is_field_valid(Field::NationalId));
}

#[test]
fn test_documented_phone_examples() {
    assert!(validate(&family("1199012345678901", "0788123456")).is_valid);

    let wrong_prefix = validate(&family("1199012345678901", "0711234567"));
    assert!(!wrong_prefix.is_field_valid(Field::PhoneNumber));
    assert_eq!(
        wrong_prefix.field(Field::PhoneNumber).unwrap().failure,
        Some(FieldFailure::WrongFormat)
    );

    assert_eq!(normalize_phone("250788123456"), "0788123456");
}

#[test]
fn test_documented_age_examples() {
    assert!(!validate(&member("-1")).is_valid);
    assert!(validate(&member("120")).is_valid);
    assert!(!validate(&member("121")).is_valid);
}

#[test]
fn test_form_input_flows_through_normalization() {
    // What a user might type, reshaped for display then validated as-is
    let typed_phone = "+250 (788) 123-456";
    let typed_id = "1-1990-1234-5678-901";

    assert_eq!(format_phone_display(typed_phone), "078 812 3456");
    assert_eq!(format_national_id_display(typed_id), "1 1990 1234 5678 901");

    let shown = family(
        &format_national_id_display(typed_id),
        &format_phone_display(typed_phone),
    );
    assert!(validate(&shown).is_valid);
    assert!(validate(&family(typed_id, typed_phone)).is_valid);
}

#[test]
fn test_normalization_is_idempotent() {
    let inputs = [
        "",
        "1199012345678901",
        "1 1990 1234 5678 901 234",
        "+250 788 123 456",
        "250 250 788",
        "0788-123-456-789",
        "letters only",
    ];

    for input in inputs {
        let id = normalize_national_id(input);
        assert_eq!(normalize_national_id(&id), id);

        let phone = normalize_phone(input);
        assert_eq!(normalize_phone(&phone), phone);
    }
}

#[test]
fn test_missing_fields_are_each_reported() {
    let record = FamilyRegistration {
        sector: String::new(),
        ..family("1199012345678901", "0788123456")
    };

    let result = validate(&record);
    assert!(!result.is_valid);
    assert_eq!(
        result.errors().map(|(field, _)| field).collect::<Vec<_>>(),
        vec![Field::Sector]
    );
    assert_eq!(result.errors().next().unwrap().1, "Please select your sector");
}

#[test]
fn test_json_roundtrip_from_presentation_layer() {
    let submitted = json!({
        "kind": "family",
        "familyName": "  Mukamana ",
        "headOfFamilyName": "Grace Mukamana",
        "nationalId": "2 1985 7654 3210 987",
        "phoneNumber": "073 812 3456",
        "sector": "Kibungo"
    });

    let registration: Registration = serde_json::from_value(submitted).unwrap();
    let result = registration.validate();
    assert!(result.is_valid);

    let reply = serde_json::to_value(&result).unwrap();
    assert_eq!(reply["isValid"], true);
    assert_eq!(reply["fields"].as_object().unwrap().len(), 5);
}

#[test]
fn test_catalog_membership_is_a_caller_check() {
    let catalog = CatalogConfig::default();
    let record = FamilyRegistration {
        sector: "Nyamirambo".to_string(),
        ..family("1199012345678901", "0788123456")
    };

    // Presence passes in the validator; membership is the caller's call
    assert!(validate(&record).is_valid);
    assert!(!catalog.contains_sector(&record.sector));
    assert!(catalog.contains_relation(&member("10").relation));
}
