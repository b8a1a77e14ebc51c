//! Authentication primitives.
//!
//! - [`jwt`] -- access-token generation and validation.
//!
//! Sign-in itself happens at the identity provider; this service only
//! verifies the tokens it issues.

pub mod jwt;
