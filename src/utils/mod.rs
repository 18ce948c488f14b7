//! Shared utility modules
//!
//! This module contains reusable utilities that are used across different
//! parts of the crate.

pub mod date;
pub mod html;

// Re-export commonly used functions
pub use date::{format_date, format_day};
pub use html::{escape_attribute, escape_html, escape_text};
