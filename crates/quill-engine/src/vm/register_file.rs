//! Register file for the frame stack
//!
//! Each call frame occupies a window of a contiguous array: first the
//! function's locals, then its virtual registers.
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Frame 1: locals | registers (current)  │  ← top
//! ├────────────────────────────────────────┤
//! │ Frame 0: locals | registers            │
//! └────────────────────────────────────────┘  ← base 0
//! ```

use super::error::{VmError, VmResult};
use crate::frontend::types::Scalar;

/// Default maximum register file size (in slots)
pub const DEFAULT_MAX_SIZE: usize = 1024 * 64;

#[derive(Debug)]
pub struct RegisterFile {
    registers: Vec<Scalar>,
    /// Next free slot
    top: usize,
    max_size: usize,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_SIZE)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            registers: Vec::with_capacity(256),
            top: 0,
            max_size,
        }
    }

    /// Allocate a window of `count` slots, returning its base index
    ///
    /// Slots start as `short` zero; callers overwrite locals with the zero of
    /// their declared type.
    pub fn alloc_frame(&mut self, count: usize, depth: usize) -> VmResult<usize> {
        let base = self.top;
        let new_top = base + count;
        if new_top > self.max_size {
            return Err(VmError::StackOverflow { depth });
        }
        if new_top > self.registers.len() {
            self.registers.resize(new_top, Scalar::Short(0));
        }
        for slot in &mut self.registers[base..new_top] {
            *slot = Scalar::Short(0);
        }
        self.top = new_top;
        Ok(base)
    }

    /// Free the topmost window, shrinking back to `base`
    #[inline]
    pub fn free_frame(&mut self, base: usize) {
        debug_assert!(base <= self.top);
        self.top = base;
    }

    #[inline]
    pub fn get(&self, index: usize) -> VmResult<Scalar> {
        if index < self.top {
            Ok(self.registers[index])
        } else {
            Err(VmError::RegisterOutOfBounds {
                index,
                top: self.top,
            })
        }
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: Scalar) -> VmResult<()> {
        if index < self.top {
            self.registers[index] = value;
            Ok(())
        } else {
            Err(VmError::RegisterOutOfBounds {
                index,
                top: self.top,
            })
        }
    }

    #[inline]
    pub fn top(&self) -> usize {
        self.top
    }

    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.top == 0
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
