//! 256-bit reference vectors with 32-byte alignment.
//!
//! 16-bit lanes keep eight lanes in a 128-bit register, so `I16x8` and
//! `U16x8` are only 16-byte aligned even though the backend alignment is
//! 32. `F32x8` doubles as the short float vector on this backend.

use super::reference_vector;

reference_vector!(I32x8: [i32; 8], align 32, Avx);
reference_vector!(U32x8: [u32; 8], align 32, Avx);
reference_vector!(F32x8: [f32; 8], align 32, Avx);
reference_vector!(F64x4: [f64; 4], align 32, Avx);
reference_vector!(I16x8: [i16; 8], align 16, Avx);
reference_vector!(U16x8: [u16; 8], align 16, Avx);
