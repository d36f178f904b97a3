//! attrctl Core
//!
//! Core types for matchable attribute overrides.
//!
//! This crate contains:
//! - Domain types: scopes, matchable resources and their attribute payloads
//! - DTOs: wire shapes exchanged with the admin service

pub mod domain;
pub mod dto;
