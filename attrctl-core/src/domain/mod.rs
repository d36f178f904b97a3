//! Core domain types
//!
//! This module contains the structures shared by the admin client (which
//! moves them over the wire) and the CLI (which loads them from files and
//! reconciles them against the remote store).

pub mod attributes;
pub mod resource;
pub mod scope;
