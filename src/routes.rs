use axum::{
    Router,
    routing::{get, post},
};

use crate::{AppState, handlers};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .route("/api/v1/students", get(handlers::list_students))
        .route(
            "/api/v1/students/{id}/report",
            post(handlers::generate_report),
        )
        .route("/api/v1/reports/cleanup", post(handlers::cleanup_reports))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::service::ReportService;
    use crate::testing::{FakeClient, FakeRenderer, Fetch, Render};

    fn app(client: FakeClient, renderer: FakeRenderer) -> Router {
        create_router(AppState {
            report_service: ReportService::new(Arc::new(client), Arc::new(renderer)),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_generate_report_created() {
        let app = app(
            FakeClient::new(Fetch::Found),
            FakeRenderer::new(Render::Path("/reports/missing/42.pdf".into())),
        );

        let (status, body) = send(
            app,
            post_request("/api/v1/students/42/report", r#"{"generated_by": "admin1"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["student_id"], 42);
        assert_eq!(body["data"]["student_name"], "Ada Lovelace");
        assert_eq!(body["data"]["generated_by"], "admin1");
        assert_eq!(body["data"]["file_size"], 0);
        assert!(
            body["data"]["report_id"]
                .as_str()
                .unwrap()
                .starts_with("RPT-42-")
        );
    }

    #[tokio::test]
    async fn test_generate_report_without_body() {
        let app = app(
            FakeClient::new(Fetch::Found),
            FakeRenderer::new(Render::Path("/reports/missing/1.pdf".into())),
        );

        let (status, body) = send(app, post_request("/api/v1/students/1/report", "")).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["generated_by"], "system");
    }

    #[tokio::test]
    async fn test_generate_report_error_statuses() {
        let cases = [
            (Fetch::Found, 1, StatusCode::INTERNAL_SERVER_ERROR),
            (Fetch::Missing, 1, StatusCode::NOT_FOUND),
            (Fetch::Fails, 1, StatusCode::BAD_GATEWAY),
            (Fetch::Found, 0, StatusCode::BAD_REQUEST),
        ];

        for (fetch, student_id, expected) in cases {
            let app = app(FakeClient::new(fetch), FakeRenderer::new(Render::Fails));
            let uri = format!("/api/v1/students/{student_id}/report");

            let (status, body) = send(app, post_request(&uri, "")).await;

            assert_eq!(status, expected, "{uri}");
            assert_eq!(body["success"], false);
            assert!(body["message"].is_string());
        }
    }

    #[tokio::test]
    async fn test_generate_report_malformed_id() {
        for id in ["abc", "99999999999999999999"] {
            let app = app(FakeClient::new(Fetch::Found), FakeRenderer::new(Render::Fails));
            let uri = format!("/api/v1/students/{id}/report");

            let (status, body) = send(app, post_request(&uri, "")).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], "Bad Request");
            assert!(
                body["message"]
                    .as_str()
                    .unwrap()
                    .starts_with("invalid student ID"),
                "{body}"
            );
        }
    }

    #[tokio::test]
    async fn test_list_students_envelope() {
        let app = app(FakeClient::new(Fetch::Found), FakeRenderer::new(Render::Fails));

        let (status, body) = send(app, get_request("/api/v1/students?class=10&section=A")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_health_status_codes() {
        let app_ok = app(FakeClient::new(Fetch::Found), FakeRenderer::new(Render::Fails));
        let (status, body) = send(app_ok, get_request("/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["healthy"], true);
        assert_eq!(body["components"]["student_api"]["status"], "healthy");

        let app_down = app(
            FakeClient::new(Fetch::Found).unhealthy(),
            FakeRenderer::new(Render::Fails),
        );
        let (status, body) = send(app_down, get_request("/api/v1/health")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["message"], "Some components are unhealthy");
    }

    #[tokio::test]
    async fn test_cleanup_endpoint() {
        let app_ok = app(FakeClient::new(Fetch::Found), FakeRenderer::new(Render::Fails));
        let (status, body) = send(app_ok, post_request("/api/v1/reports/cleanup", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let mut failing = FakeRenderer::new(Render::Fails);
        failing.cleanup_fails = true;
        let app_err = app(FakeClient::new(Fetch::Found), failing);
        let (status, body) = send(app_err, post_request("/api/v1/reports/cleanup", "")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }
}
