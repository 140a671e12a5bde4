//! Test harness shared by unit and integration tests.

pub mod app_builder;

pub use app_builder::{create_test_app, test_state, TestAppBuilder, TEST_SECRET};
