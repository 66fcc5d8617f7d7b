//! Record integration tests
//!
//! Tests are organized by concern: schema declaration, the schema-checked
//! accessor API, whole-record conversions, the derived structural
//! operations, and the property-based algebraic laws.

mod convert_tests;
mod derived_tests;
