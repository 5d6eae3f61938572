//! Utility types and functions for Quill.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - [`BoundingBox`], [`Color`] and math re-exports from glam
//! - [`NamedEnum`] - enums stored by name with a fallback member

mod error;
mod math;
mod named;

pub use error::*;
pub use math::*;
pub use named::NamedEnum;
pub(crate) use named::named_enum;
