//! Aligned, owned test buffers.
//!
//! `Vec<T>` only guarantees `align_of::<T>()`, which is not enough to make
//! "aligned" loads meaningful. [`AlignedBuffer`] allocates through
//! [`std::alloc`] with an explicit alignment and frees on drop.

use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::element::Element;
use crate::error::VerifyError;

/// Cache-line granularity used for conversion buffers.
pub const CACHE_LINE: usize = 64;

/// A zero-initialised slice of `len` elements whose first element sits on
/// an `align`-byte boundary.
pub struct AlignedBuffer<T: Element> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
}

impl<T: Element> AlignedBuffer<T> {
    /// Allocate `len` zeroed elements aligned to at least `align` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Layout`] if `align` is not a power of two or
    /// the size overflows, and [`VerifyError::Alloc`] if the allocator fails.
    pub fn new(len: usize, align: usize) -> Result<Self, VerifyError> {
        let layout_err = || VerifyError::Layout {
            len,
            elem_size: size_of::<T>(),
            align,
        };
        let bytes = len.checked_mul(size_of::<T>()).ok_or_else(layout_err)?;
        let layout = Layout::from_size_align(bytes.max(1), align.max(align_of::<T>()))
            .map_err(|_| layout_err())?;
        // SAFETY: layout has non-zero size. All-zero bytes are a valid
        // value for every `Element` implementor.
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(VerifyError::Alloc { bytes })?;
        Ok(Self { ptr, len, layout })
    }

    /// Allocate and fill slot `k` with `fill(k)`.
    ///
    /// # Errors
    ///
    /// See [`AlignedBuffer::new`].
    pub fn from_fn(
        len: usize,
        align: usize,
        mut fill: impl FnMut(usize) -> T,
    ) -> Result<Self, VerifyError> {
        let mut buf = Self::new(len, align)?;
        for (k, slot) in buf.iter_mut().enumerate() {
            *slot = fill(k);
        }
        Ok(buf)
    }

    /// Alignment the allocation was requested with.
    pub fn align(&self) -> usize {
        self.layout.align()
    }
}

impl<T: Element> Deref for AlignedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // SAFETY: ptr is valid for len initialised elements until drop.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Element> DerefMut for AlignedBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: as above, and &mut self guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Element> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc_zeroed with this exact layout.
        unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), self.layout) };
    }
}

impl<T: Element> std::fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("align", &self.layout.align())
            .finish_non_exhaustive()
    }
}
