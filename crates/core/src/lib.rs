//! Domain logic for the festival submission portal.
//!
//! Pure code only: no I/O, no locale-dependent behaviour outside [`i18n`].

pub mod application;
pub mod draft;
pub mod error;
pub mod i18n;
pub mod lifecycle;
pub mod listing;
pub mod navigation;
pub mod normalize;
pub mod profile;
pub mod timestamp;
pub mod types;
