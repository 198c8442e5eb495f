//! Utility functions for key generation, URL validation and error classification.
//!
//! - [`key_generator`] - Random fixed-length alphanumeric short keys
//! - [`url_validator`] - Syntactic http/https URL validation
//! - [`db_error`] - PostgreSQL error classification

pub mod db_error;
pub mod key_generator;
pub mod url_validator;
