//! Tests for the control kernel
//!
//! Organized by component

mod helpers;
