//! Common types used across the application.

pub mod id;
pub mod money;

#[cfg(test)]
mod money_tests;

pub use id::*;
pub use money::{InvalidAmount, from_minor_units, to_minor_units};
