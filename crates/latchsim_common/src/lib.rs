//! Shared foundational types used across the latchsim workspace.
//!
//! This crate provides interned signal names and the bit-string literal
//! format used to write and display signal traces.

#![warn(missing_docs)]

pub mod bits;
pub mod ident;

pub use bits::{BitString, ParseBitsError};
pub use ident::{Ident, Interner};
