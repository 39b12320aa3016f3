//! # jform-transform — Flat-to-Nested Transformation
//!
//! Turns a validated flat submission into a nested tree of native values:
//! repeated fieldset inputs become arrays of per-repetition objects, and
//! number fields become JSON numbers.
//!
//! ```text
//! { "name": "John",                        { "name": "John",
//!   "offspring_name": ["Baby 1", "Baby 2"], => "offspring": [
//!   "offspring_age":  ["3", "1"] }             { "name": "Baby 1", "age": 3 },
//!                                              { "name": "Baby 2", "age": 1 } ] }
//! ```
//!
//! Validate before transforming: conversion trusts its input and passes
//! anything it cannot parse through unchanged.
//!
//! ## Crate Policy
//!
//! - Depends only on `jform-core` internally; independent of validation.
//! - Absent or blank inputs are omitted from the tree, never set to `null`.

pub mod convert;
pub mod transformer;

pub use convert::convert_to_native;
pub use transformer::{transform, SchemaTransformer, Transformed, ValueTree};
