//! Property-based testing entry point for seqsat-design
//!
//! Run with: cargo test --test property_based

mod common;
mod property_tests;
