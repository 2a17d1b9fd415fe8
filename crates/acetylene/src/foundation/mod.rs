//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the framework:
//! - Math types and helpers
//! - Time management and the fixed update step
//! - Logging setup

pub mod math;
pub mod time;
pub mod logging;
