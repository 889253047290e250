//! Integration test harness entry point.
//!
//! Cargo compiles `tests/integration/` as a single test crate rooted here.

mod api_tests;
