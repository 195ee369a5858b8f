//! # simd-load-verify
//!
//! Exhaustive verification of the memory-facing surface of portable SIMD
//! vector types: array layout, same-type loads and converting loads.
//!
//! A vector type implements [`vector::SimdVector`]; the checks drive its
//! load entry points over aligned buffers and compare every lane against
//! what a scalar reading of the same memory predicts.
//!
//! ## Modules
//!
//! - [`element`] — Element types, their tags and scalar conversions
//! - [`vector`] — The vector abstraction and scalar/SSE/AVX reference backends
//! - [`buffer`] — Heap buffers with a guaranteed start alignment
//! - [`lattice`] — Conversion lattice and its validation
//! - [`checks`] — Alignment, sequential load and converting load checks
//! - [`report`] — Pass/fail recording and text rendering
//! - [`config`] — YAML suite configuration
//! - [`suite`] — Vector registry and suite runner

pub mod buffer;
pub mod checks;
pub mod config;
pub mod element;
pub mod error;
pub mod lattice;
pub mod report;
pub mod suite;
pub mod vector;
