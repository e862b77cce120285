//! Utility types for the metadata index.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Token`] / [`SceneId`] - Identifier types
//! - [`Error`] / [`Result`] - Error handling

mod error;
mod token;

pub use error::*;
pub use token::*;
