//! Writing a [`Problem`] as an HTTP response.

use std::io;

use http::header::{CACHE_CONTROL, CONTENT_TYPE};
use http::{HeaderName, HeaderValue, Response, StatusCode};

use crate::error::ProblemError;
use crate::problem::{APPLICATION_PROBLEM_JSON, Problem};

/// `Cache-Control` value sent for statuses outside [`CACHEABLE_STATUSES`].
pub const NO_STORE_CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";

/// Title of the replacement problem rendered when encoding fails.
pub const ENCODING_ERROR_TITLE: &str = "JSON Encoding Error";

/// Statuses that may be cached, or for which cache headers do not matter.
/// `0` stands for "status not set".
pub const CACHEABLE_STATUSES: [i64; 11] = [0, 200, 204, 206, 300, 301, 404, 405, 410, 414, 501];

/// The parts of an HTTP response the renderer writes to.
pub trait ResponseSink {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    fn write_status(&mut self, status: StatusCode);

    /// Append `body` to the response payload.
    ///
    /// # Errors
    /// Returns an error if the underlying transport rejects the bytes.
    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;
}

impl ResponseSink for Response<Vec<u8>> {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.body_mut().extend_from_slice(body);
        Ok(())
    }
}

#[must_use]
pub fn is_cacheable(status: i64) -> bool {
    CACHEABLE_STATUSES.contains(&status)
}

impl Problem {
    /// Write this problem to `sink` as an `application/problem+json` response.
    ///
    /// The body is fully encoded before anything is written. If encoding fails,
    /// `self.status` becomes 422 and the body is replaced by a problem titled
    /// [`ENCODING_ERROR_TITLE`] carrying the encoding error as its detail.
    /// A status of zero or below leaves the response status to the transport.
    /// Failures to write the body are logged and otherwise ignored.
    pub fn render<S>(&mut self, sink: &mut S)
    where
        S: ResponseSink + ?Sized,
    {
        let body = match self.to_json() {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "problem is not encodable, rendering fallback body");
                self.status = i64::from(StatusCode::UNPROCESSABLE_ENTITY.as_u16());
                encoding_error_body(self.status, &err)
            }
        };

        sink.set_header(
            CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        if !is_cacheable(self.status) {
            sink.set_header(
                CACHE_CONTROL,
                HeaderValue::from_static(NO_STORE_CACHE_CONTROL),
            );
        }

        write_status_line(self.status, sink);

        let payload = body.strip_suffix(b"\n").unwrap_or(body.as_slice());
        if let Err(err) = sink.write_body(payload) {
            tracing::debug!(error = %err, "failed to write problem response body");
        }
    }

    /// Render into a fresh `http::Response` whose status defaults to 200.
    #[must_use]
    pub fn into_http_response(mut self) -> Response<Vec<u8>> {
        let mut response = Response::new(Vec::new());
        self.render(&mut response);
        response
    }
}

/// Statuses of zero or below are never written.
fn write_status_line<S>(status: i64, sink: &mut S)
where
    S: ResponseSink + ?Sized,
{
    if status <= 0 {
        return;
    }
    if let Some(code) = status_code(status) {
        sink.write_status(code);
    } else {
        tracing::warn!(
            status,
            "problem status is not a valid HTTP status code, leaving response status unset"
        );
    }
}

fn status_code(status: i64) -> Option<StatusCode> {
    let code = u16::try_from(status).ok()?;
    StatusCode::from_u16(code).ok()
}

fn encoding_error_body(status: i64, err: &ProblemError) -> Vec<u8> {
    // No extensions, so this cannot hit an unencodable value.
    Problem::new()
        .with_status(status)
        .with_title(ENCODING_ERROR_TITLE)
        .with_detail(err.to_string())
        .to_json()
        .unwrap_or_else(|_| b"{}".to_vec())
}

/// Axum integration: make Problem directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Problem {
    fn into_response(self) -> axum::response::Response {
        self.into_http_response().map(axum::body::Body::from)
    }
}
