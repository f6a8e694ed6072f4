//! marquee-ui - Display types and stores for marquee
//!
//! Pure state: no I/O happens here. The app crate owns a `MovieState` and
//! mutates it in response to OMDb results.

pub mod display_types;
pub mod stores;

pub use display_types::*;
