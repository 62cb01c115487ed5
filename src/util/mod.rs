//! Utility modules for password generation and timestamp display.

pub mod datetime;
pub mod password;
