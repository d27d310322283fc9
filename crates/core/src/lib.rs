//! vibes_core - Functional core for the vibes manager.
//!
//! Pure data types, validation, ordering and display formatting for vibe
//! records, plus the repository trait that storage backends implement.
//! Nothing in this crate performs I/O.

pub mod storage;
pub mod vibe;
