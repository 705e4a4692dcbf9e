//! grainflow — donor-side client for the food-donation service.
//!
//! ARCHITECTURE
//! ============
//! `net` talks HTTP/JSON to the donation service behind the `DonationApi`
//! trait. `state` holds the client state machines: the submission form,
//! the donation feed with its reload signal, and the dashboard/landing view
//! selectors that compose them. `session` and `config` carry the explicit
//! context every piece is constructed with.

pub mod config;
pub mod error;
pub mod net;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;
