//! Shared test utilities used across spanstep crates.

pub mod capture;
pub mod profile;
