//! Core types shared across UMRO facilities
//!
//! This crate holds the canonical vocabulary used by the logging facility
//! and by anything that wants to filter or assert on its output:
//!
//! - **Schema constants**: canonical field keys and event names

pub mod schema;
