//! pkgup - package upgrade checker library
//!
//! This library provides the core functionality for deciding which installed
//! packages have newer or rebuilt releases available:
//! - Release identifier parsing and version ordering
//! - Metadata fingerprints of packing lists
//! - Upgrade resolution against a candidate index

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod index;
pub mod orchestrator;
pub mod output;
pub mod signify;
pub mod update;
