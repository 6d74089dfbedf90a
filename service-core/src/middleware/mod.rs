pub mod cors;
pub mod tracing;

pub use cors::{apply_cors_headers, cors_headers_middleware, preflight_middleware};
pub use self::tracing::{request_id_middleware, REQUEST_ID_HEADER};
