//! Utility modules: poll scheduling, timeout.

pub mod poll;
pub mod timeout;
