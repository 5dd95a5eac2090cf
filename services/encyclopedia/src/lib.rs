//! services/encyclopedia/src/lib.rs
//!
//! The encyclopedia service: configuration, the adapters implementing the
//! `hadith_core` ports, and the UI controller driven by the terminal binary.

pub mod adapters;
pub mod config;
pub mod error;
pub mod ui;
