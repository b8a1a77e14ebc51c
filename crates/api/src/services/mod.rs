//! Portal orchestration.
//!
//! Handlers stay thin: they extract the requester, locale and payload, then
//! call into these services, which combine the record store with the pure
//! rules in `cifan_core` (normalization, gating, listing).

pub mod applications;
pub mod in_flight;
pub mod profile;
