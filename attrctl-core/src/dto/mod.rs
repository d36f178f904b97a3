//! Data Transfer Objects for the admin API
//!
//! DTOs are the JSON shapes exchanged with the admin service. Domain types
//! convert into and out of them at the client boundary.

pub mod attributes;
