//! # sdv-core
//!
//! Core types for the SDV platform.
//!
//! This crate provides the foundational types shared across all SDV crates:
//! - The [`Identity`](identity::Identity) value object and its [`Role`](identity::Role)
//! - Entity structs for studies, sites, study files and principal investigators
//! - Status enums with their wire spellings
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;

pub use errors::CoreError;
pub use identity::{Identity, Role};
