//! Pyre Core - Foundational types for Pyre window effects
//!
//! This crate provides the core types that all other Pyre crates depend on:
//! - `Color` - RGBA colors and the `rgb()`/`rgba()` string encoding used by settings
//! - `Version` - Host version tuples used to filter the effect catalog
//! - `HandlerId` - Identifiers for connected signal and change handlers
//! - Error types and Result alias

mod color;
mod error;
mod id;
mod version;

pub use color::Color;
pub use error::{PyreError, Result};
pub use id::HandlerId;
pub use version::Version;
