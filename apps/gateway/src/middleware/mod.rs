pub mod normalize_errors;
pub mod request_trace;
pub mod structured_logger;

pub use normalize_errors::NormalizeErrors;
pub use request_trace::{RequestId, RequestTrace};
pub use structured_logger::StructuredLogger;
