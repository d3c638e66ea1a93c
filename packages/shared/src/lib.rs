//! Utilities shared by the Kaigi packages: logger setup and time helpers.

pub mod logger;
pub mod time;
