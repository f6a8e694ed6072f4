//! marquee-core - OMDb client and configuration for marquee

pub mod config;
pub mod omdb;
