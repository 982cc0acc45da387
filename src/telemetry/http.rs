use std::time::Duration;

use axum::http::{HeaderMap, Request, Response};
use opentelemetry::KeyValue;
use tower_http::trace::{MakeSpan, OnResponse};
use tracing::Span;

use super::metrics::{HTTP_REQUEST_DURATION, HTTP_REQUESTS_TOTAL};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Opens one span per request with OpenTelemetry HTTP semantic attributes.
#[derive(Clone)]
pub struct HttpMakeSpan;

impl<B> MakeSpan<B> for HttpMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let method = request.method().as_str();
        let uri = request.uri();
        let path = uri.path();

        tracing::info_span!(
            "HTTP request",
            otel.name = %format!("{} {}", method, path),
            http.method = %method,
            http.route = %path,
            http.target = %uri,
            http.scheme = "http",
            http.flavor = ?request.version(),
            http.user_agent = header_str(request.headers(), "user-agent"),
            http.request_id = %header_str(request.headers(), X_REQUEST_ID),
            http.response.status_code = tracing::field::Empty,
            otel.status_code = tracing::field::Empty,
        )
    }
}

/// Records the response status on the request span and feeds the HTTP metrics.
#[derive(Clone)]
pub struct HttpOnResponse;

impl<B> OnResponse<B> for HttpOnResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status = response.status().as_u16();

        span.record("http.response.status_code", status as i64);
        span.record("otel.status_code", if status >= 500 { "ERROR" } else { "OK" });

        let latency_ms = latency.as_secs_f64() * 1000.0;
        let attributes = [
            KeyValue::new("http.status_code", status.to_string()),
            KeyValue::new("http.status_class", status_class(status)),
        ];

        HTTP_REQUESTS_TOTAL.add(1, &attributes);
        HTTP_REQUEST_DURATION.record(latency_ms, &attributes);

        tracing::info!(
            http.response.status_code = status,
            latency_ms = latency_ms,
            "finished processing request"
        );
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

fn status_class(status: u16) -> String {
    format!("{}xx", status / 100)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
    }

    #[test]
    fn test_header_str_missing_or_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REQUEST_ID, "req-1".parse().unwrap());
        headers.insert(
            "user-agent",
            axum::http::HeaderValue::from_bytes(b"caf\xe9").unwrap(),
        );

        assert_eq!(header_str(&headers, X_REQUEST_ID), "req-1");
        assert_eq!(header_str(&headers, "user-agent"), "");
        assert_eq!(header_str(&headers, "referer"), "");
    }

    #[test]
    fn test_span_and_response_hooks_without_subscriber() {
        let request = Request::builder()
            .uri("/api/v1/health")
            .header(X_REQUEST_ID, "req-2")
            .body(Body::empty())
            .unwrap();
        let span = HttpMakeSpan.make_span(&request);

        let response = Response::builder()
            .status(StatusCode::SERVICE_UNAVAILABLE)
            .body(Body::empty())
            .unwrap();
        HttpOnResponse.on_response(&response, Duration::from_millis(3), &span);
    }
}
