//! Bounded call stack.
//!
//! The original interpreter allowed 16 nested subroutine calls. A fixed
//! array with an explicit depth index preserves that limit faithfully: the
//! 17th call is a reported overflow, not a reallocation.

/// Maximum call nesting depth.
pub const STACK_DEPTH: usize = 16;

/// Error returned when pushing onto a full stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFull;

/// LIFO of subroutine return addresses.
#[derive(Debug, Default)]
pub struct CallStack {
    slots: [u16; STACK_DEPTH],
    depth: usize,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a return address. On overflow the stack is left unmodified.
    pub fn push(&mut self, ret: u16) -> Result<(), StackFull> {
        if self.depth == STACK_DEPTH {
            return Err(StackFull);
        }
        self.slots[self.depth] = ret;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u16> {
        if self.depth == 0 {
            return None;
        }
        self.depth -= 1;
        Some(self.slots[self.depth])
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}
