//! Single-lane reference vectors.
//!
//! One lane per vector, aligned to the element only. Arrays of these
//! pack with no padding, which is what the alignment checker expects for
//! degenerate vectors.

use super::reference_vector;

reference_vector!(I32x1: [i32; 1], align 4, Scalar);
reference_vector!(U32x1: [u32; 1], align 4, Scalar);
reference_vector!(F32x1: [f32; 1], align 4, Scalar);
reference_vector!(F64x1: [f64; 1], align 8, Scalar);
reference_vector!(I16x1: [i16; 1], align 2, Scalar);
reference_vector!(U16x1: [u16; 1], align 2, Scalar);
