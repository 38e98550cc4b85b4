use super::*;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use shared::{domain::DeploymentVariant, protocol::parse_status};
use tower::ServiceExt;

fn test_app() -> Router {
    build_router(Arc::new(AppState::from_settings(&Settings::default())))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let response = test_app()
        .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn status_is_a_one_element_array_both_variants_can_read() {
    let response = test_app()
        .oneshot(Request::get("/status").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    let by_state = parse_status(&body, DeploymentVariant::State).expect("state variant");
    let by_figures = parse_status(&body, DeploymentVariant::Figures).expect("figures variant");
    assert_eq!(by_state.id, 1);
    assert_eq!(by_state.state_code, 0);
    assert_eq!(by_figures.state_code, 0);
}

#[tokio::test]
async fn posted_update_is_served_on_next_get() {
    let app = test_app();
    let update = Request::post("/status")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "figures": 3, "temperature": "23" }).to_string(),
        ))
        .expect("request");
    let response = app.clone().oneshot(update).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::get("/status").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let body = body_text(response).await;
    let record = parse_status(&body, DeploymentVariant::Figures).expect("figures");
    assert_eq!(record.state_code, 3);
    assert_eq!(record.temperature, "23");
    assert_eq!(
        parse_status(&body, DeploymentVariant::State)
            .expect("state")
            .state_code,
        1
    );
}

#[test]
fn state_only_update_selects_line_or_nothing() {
    let mut status = StatusPayload {
        id: 1,
        temperature: "20".into(),
        state: Some(0),
        figures: Some(4),
    };
    apply_update(
        &mut status,
        StatusUpdateRequest {
            state: Some(1),
            ..StatusUpdateRequest::default()
        },
    );
    assert_eq!(status.state, Some(1));
    assert_eq!(status.figures, Some(1));

    apply_update(
        &mut status,
        StatusUpdateRequest {
            state: Some(0),
            ..StatusUpdateRequest::default()
        },
    );
    assert_eq!(status.figures, Some(0));
}

#[test]
fn explicit_state_is_kept_next_to_figures() {
    let mut status = StatusPayload {
        id: 1,
        temperature: "20".into(),
        state: Some(0),
        figures: Some(0),
    };
    apply_update(
        &mut status,
        StatusUpdateRequest {
            id: Some(7),
            state: Some(0),
            figures: Some(2),
            ..StatusUpdateRequest::default()
        },
    );
    assert_eq!(status.id, 7);
    assert_eq!(status.state, Some(0));
    assert_eq!(status.figures, Some(2));
}

#[test]
fn unknown_figures_code_publishes_state_off() {
    let mut status = StatusPayload {
        id: 1,
        temperature: "20".into(),
        state: Some(1),
        figures: Some(1),
    };
    for figures in [7, -1, 0] {
        apply_update(
            &mut status,
            StatusUpdateRequest {
                figures: Some(figures),
                ..StatusUpdateRequest::default()
            },
        );
        assert_eq!(status.state, Some(0), "figures {figures}");
        assert_eq!(status.figures, Some(figures));
    }

    apply_update(
        &mut status,
        StatusUpdateRequest {
            figures: Some(4),
            ..StatusUpdateRequest::default()
        },
    );
    assert_eq!(status.state, Some(1));
}

#[test]
fn initial_unknown_figures_code_starts_with_state_off() {
    let state = AppState::from_settings(&Settings {
        initial_figures: 9,
        ..Settings::default()
    });
    let status = state.status.try_read().expect("uncontended");
    assert_eq!(status.state, Some(0));
    assert_eq!(status.figures, Some(9));
}
