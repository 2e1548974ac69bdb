//! Helpers used by the surrounding import tooling

pub mod xregexp;
