//! Gateway test support utilities
//!
//! Helpers shared by the gateway's integration tests: unified logging
//! initialization and assertions on the `{ error, message }` contract.

pub mod error_body;
pub mod logging;

pub use error_body::{assert_error_body, read_json};
