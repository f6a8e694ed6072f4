//! Store types for UI state management

pub mod movie;

pub use movie::*;
