//! Network layer: wire types and the donation service client.

pub mod api;
pub mod types;
