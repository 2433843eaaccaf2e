//! RFC 9457 Problem Details for the modkit framework
//!
//! This crate provides the `Problem` value type and its HTTP rendering:
//! - JSON mapping between typed members and free-form extensions (`Problem`)
//! - Response rendering through a small sink abstraction (`ResponseSink`)
//! - Static problem definitions (`ProblemDef`)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod error;
pub mod escape;
pub mod extensions;
pub mod problem;
pub mod render;

// Re-export commonly used types
pub use catalog::ProblemDef;
pub use error::{JsonKind, ProblemError};
pub use extensions::Extensions;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, RESERVED_MEMBERS};
pub use render::ResponseSink;

/// Extension member carrying the request trace id.
pub const TRACE_ID_EXTENSION: &str = "trace_id";

/// Helper to attach instance and `trace_id` to a Problem
///
/// This is a convenience function for enriching Problem instances with
/// request-specific context before returning them as HTTP responses.
pub fn finalize(mut p: Problem, instance: &str, trace_id: Option<String>) -> Problem {
    p = p.with_instance(instance);
    if let Some(tid) = trace_id {
        p = p.with_extension(TRACE_ID_EXTENSION, tid);
    }
    p
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finalize_sets_instance_and_trace_id() {
        let p = finalize(
            catalog::NOT_FOUND.as_problem("missing"),
            "/users/123",
            Some("req-456".to_owned()),
        );
        assert_eq!(p.instance, "/users/123");
        assert_eq!(p.extension(TRACE_ID_EXTENSION), Some(&json!("req-456")));
    }

    #[test]
    fn finalize_without_trace_id_adds_no_extension() {
        let p = finalize(Problem::new(), "/ping", None);
        assert_eq!(p.instance, "/ping");
        assert!(p.extensions().is_empty());
    }
}
