//! Request extractors shared by the handlers.

pub mod auth;
pub mod json;
pub mod locale;
