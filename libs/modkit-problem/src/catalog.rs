//! Static problem definitions shared across handlers

use http::StatusCode;

use crate::problem::Problem;

/// Problem type used when the type carries no extra semantics (RFC 9457 §4.2.1).
pub const ABOUT_BLANK: &str = "about:blank";

/// Static problem definition from catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemDef {
    pub status: StatusCode,
    pub title: &'static str,
    pub type_url: &'static str,
}

impl ProblemDef {
    #[must_use]
    pub const fn new(status: StatusCode, title: &'static str) -> Self {
        Self {
            status,
            title,
            type_url: ABOUT_BLANK,
        }
    }

    #[must_use]
    pub const fn with_type(mut self, type_url: &'static str) -> Self {
        self.type_url = type_url;
        self
    }

    /// Convert this definition into a Problem with the given detail
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new()
            .with_status_code(self.status)
            .with_title(self.title)
            .with_type(self.type_url)
            .with_detail(detail)
    }
}

pub const BAD_REQUEST: ProblemDef = ProblemDef::new(StatusCode::BAD_REQUEST, "Bad Request");
pub const NOT_FOUND: ProblemDef = ProblemDef::new(StatusCode::NOT_FOUND, "Not Found");
pub const CONFLICT: ProblemDef = ProblemDef::new(StatusCode::CONFLICT, "Conflict");
pub const UNPROCESSABLE_ENTITY: ProblemDef =
    ProblemDef::new(StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity");
pub const INTERNAL_SERVER_ERROR: ProblemDef =
    ProblemDef::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
pub const SERVICE_UNAVAILABLE: ProblemDef =
    ProblemDef::new(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable");

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn problem_def_to_problem_works() {
        let def = ProblemDef::new(StatusCode::NOT_FOUND, "Not Found")
            .with_type("https://errors.example.com/TEST_NOT_FOUND");

        let problem = def.as_problem("Resource missing");
        assert_eq!(problem.status, 404);
        assert_eq!(problem.title, "Not Found");
        assert_eq!(problem.detail, "Resource missing");
        assert_eq!(problem.type_url, "https://errors.example.com/TEST_NOT_FOUND");
        assert!(problem.extensions().is_empty());
    }

    #[test]
    fn builtin_definitions() {
        let cases = [
            (BAD_REQUEST, 400, "Bad Request"),
            (NOT_FOUND, 404, "Not Found"),
            (CONFLICT, 409, "Conflict"),
            (UNPROCESSABLE_ENTITY, 422, "Unprocessable Entity"),
            (INTERNAL_SERVER_ERROR, 500, "Internal Server Error"),
            (SERVICE_UNAVAILABLE, 503, "Service Unavailable"),
        ];
        for (def, status, title) in cases {
            let problem = def.as_problem("x");
            assert_eq!(problem.status, status);
            assert_eq!(problem.title, title);
            assert_eq!(problem.type_url, ABOUT_BLANK);
        }
    }
}
