pub mod definitions;
pub mod normalization;
pub mod validation;

// Re-export the record shapes and the validator entry points
pub use definitions::{FamilyMemberRegistration, FamilyRegistration, Field, Registration};
pub use normalization::{
    format_national_id_display, format_phone_display, normalize_national_id, normalize_phone,
};
pub use validation::{validate, FieldResult, Validate, ValidationResult};
