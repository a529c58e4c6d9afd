pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod resource;
pub mod schema;
pub mod security;
pub mod startup;
pub mod utils;

// Re-export the validator surface for presentation-layer callers
pub use schema::{
    normalize_national_id, normalize_phone, validate, FamilyMemberRegistration,
    FamilyRegistration, Field, Registration, Validate, ValidationResult,
};
