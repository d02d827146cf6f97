//! Tabloforge - Tablo DVR recording extraction
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod extract;
pub mod manifest;
pub mod recordings;
