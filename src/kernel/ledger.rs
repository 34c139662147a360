//! Frame ledger
//!
//! A LIFO record of pending evaluation steps with a depth limit. The ledger
//! never looks inside a frame; it only owns them and counts them.
//!
//! Frames popped while a signal propagates are kept on a side trail until the
//! unwind settles, so an escaped signal can still report where it started.

use super::errors::Fatal;
use tracing::debug;

/// Depth limit used when no configuration overrides it
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// A push was refused because the ledger is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthExceeded {
    pub limit: usize,
}

#[derive(Debug, Clone)]
pub struct FrameLedger<F> {
    frames: Vec<F>,
    unwound: Vec<F>,
    limit: usize,
}

impl<F> FrameLedger<F> {
    pub fn new(limit: usize) -> Self {
        FrameLedger {
            frames: Vec::new(),
            unwound: Vec::new(),
            limit,
        }
    }

    /// Record a frame
    ///
    /// Refused once `limit` frames are pending; the refused frame is dropped
    /// and the ledger is left exactly as it was.
    pub fn push(&mut self, frame: F) -> Result<(), DepthExceeded> {
        self.unwound.clear();
        if self.frames.len() >= self.limit {
            debug!(limit = self.limit, "frame ledger full, refusing push");
            return Err(DepthExceeded { limit: self.limit });
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Remove the most recent frame
    ///
    /// Popping an empty ledger means a push/pop pair was broken somewhere;
    /// it fails instead of going negative.
    pub fn pop(&mut self) -> Result<F, Fatal> {
        self.frames.pop().ok_or_else(|| {
            debug!("pop on empty frame ledger");
            Fatal::LedgerUnderflow
        })
    }

    /// Pop the newest frame on behalf of a propagating signal
    ///
    /// The frame moves to the unwind trail instead of being dropped.
    pub fn pop_unwinding(&mut self) -> Result<(), Fatal> {
        let frame = self.pop()?;
        self.unwound.push(frame);
        Ok(())
    }

    /// Drop the unwind trail; the signal was resolved or reported
    pub fn settle(&mut self) {
        self.unwound.clear();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Pending frames, newest first
    pub fn newest_first(&self) -> impl ExactSizeIterator<Item = &F> + '_ {
        self.frames.iter().rev()
    }

    /// Frames popped by the current unwind, then pending frames, newest first
    pub fn unwound_first(&self) -> impl Iterator<Item = &F> + '_ {
        self.unwound.iter().chain(self.frames.iter().rev())
    }
}

impl<F> Default for FrameLedger<F> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
