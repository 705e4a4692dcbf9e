//! Client state machines.
//!
//! ARCHITECTURE
//! ============
//! `submission` and `feed` are independent; `dashboard` composes them and
//! owns the reload contract between a successful submit and the list.

pub mod dashboard;
pub mod feed;
pub mod landing;
pub mod stats;
pub mod submission;
