// ABOUTME: HTTP middleware for request tracing and session authentication
// ABOUTME: Provides request ID generation, per-request spans and the session auth check

pub mod auth;
pub mod tracing;

// Authentication middleware
pub use auth::{AuthMethod, AuthResult, SessionAuthMiddleware};

// Request tracing
pub use self::tracing::{
    create_request_span, propagate_request_id_layer, set_request_id_layer, trace_layer,
    REQUEST_ID_HEADER,
};
