//! Command implementations.

pub mod send;
