//! 128-bit reference vectors with 16-byte alignment.
//!
//! `F32x8` is the "short float" vector: eight `f32` lanes, matching the
//! lane count of the 16-bit vectors, stored as two 128-bit halves and so
//! only 16-byte aligned.

use super::reference_vector;

reference_vector!(I32x4: [i32; 4], align 16, Sse);
reference_vector!(U32x4: [u32; 4], align 16, Sse);
reference_vector!(F32x4: [f32; 4], align 16, Sse);
reference_vector!(F64x2: [f64; 2], align 16, Sse);
reference_vector!(I16x8: [i16; 8], align 16, Sse);
reference_vector!(U16x8: [u16; 8], align 16, Sse);
reference_vector!(F32x8: [f32; 8], align 16, Sse);
