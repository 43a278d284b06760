//! Route tests over the in-process backend

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use toolhub_config::{AppConfig, CatalogSource};
use toolhub_core::{CollaboratorError, MemoryBackend, MemoryPreferenceStore, Role, Session};
use toolhub_web::{build_router, AppState};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    backend: Arc<MemoryBackend>,
}

impl TestApp {
    fn new(source: CatalogSource) -> Self {
        let mut config = AppConfig::default();
        config.catalog.source = source;
        let backend = Arc::new(MemoryBackend::seeded());
        let state = AppState::new(
            config,
            backend.clone(),
            Arc::new(MemoryPreferenceStore::new()),
        )
        .unwrap();
        Self {
            router: build_router(state).unwrap(),
            backend,
        }
    }

    fn user(&self, email: &str) -> Session {
        self.backend.register(email, "secret1", "Ada Lovelace")
    }

    async fn call(
        &self,
        method: &str,
        uri: &str,
        session: Option<&Session>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(session) = session {
            request = request.header(
                "Authorization",
                format!("Bearer {}", session.access_token.as_str()),
            );
        }
        let request = match body {
            Some(body) => request
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str, session: Option<&Session>) -> (StatusCode, Value) {
        self.call("GET", uri, session, None).await
    }
}

fn names(body: &Value) -> Vec<String> {
    body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = TestApp::new(CatalogSource::Static);
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = app.get("/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn listing_filters_and_binds_cards() {
    let app = TestApp::new(CatalogSource::Static);

    let (status, body) = app.get("/api/tools", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 12);
    assert_eq!(body["categories"][0]["id"], "all");
    assert_eq!(body["categories"][0]["count"], 12);

    let first = &body["tools"][0];
    assert_eq!(first["name"], "ChatGPT");
    assert_eq!(first["stars"].as_array().unwrap().len(), 5);
    assert!(first["rating_label"].as_str().unwrap().ends_with(".0"));

    let (_, body) = app.get("/api/tools?q=CODE", None).await;
    assert!(names(&body).contains(&"ChatGPT".to_string()));
    assert!(!names(&body).contains(&"Midjourney".to_string()));

    let (_, body) = app
        .get("/api/tools?category=Image%20Generation", None)
        .await;
    let names = names(&body);
    assert!(names.contains(&"Midjourney".to_string()));
    assert!(body["tools"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["category"] == "Image Generation"));

    let (_, body) = app.get("/api/tools?q=xyz-no-match&category=all", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn tool_detail_and_not_found() {
    let app = TestApp::new(CatalogSource::Static);

    let (status, body) = app.get("/api/tools/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tool"]["name"], "Midjourney");
    assert_eq!(body["is_favorite"], false);

    let (status, body) = app.get("/api/tools/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Tool not found");
}

#[tokio::test]
async fn favorite_toggle_needs_session() {
    let app = TestApp::new(CatalogSource::Static);
    let (status, body) = app.call("POST", "/api/tools/1/favorite", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Sign in required");

    let session = app.user("ada@example.com");
    let (_, body) = app
        .call("POST", "/api/tools/1/favorite", Some(&session), None)
        .await;
    assert_eq!(body["is_favorite"], true);
    assert_eq!(body["message"], "Added to favorites!");

    let (_, body) = app.get("/api/tools/1", Some(&session)).await;
    assert_eq!(body["is_favorite"], true);

    let (_, body) = app.get("/api/favorites", Some(&session)).await;
    let favorites = body["favorites"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["tool"]["name"], "ChatGPT");

    let (_, body) = app
        .call("POST", "/api/tools/1/favorite", Some(&session), None)
        .await;
    assert_eq!(body["is_favorite"], false);
    assert_eq!(body["message"], "Removed from favorites");
}

#[tokio::test]
async fn favoriting_unknown_tool_is_not_found() {
    let app = TestApp::new(CatalogSource::Static);
    let session = app.user("ada@example.com");

    let (status, body) = app
        .call("POST", "/api/tools/no-such-tool/favorite", Some(&session), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Tool not found");

    let (_, body) = app.get("/api/favorites", Some(&session)).await;
    assert!(body["favorites"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn remove_favorite_by_id() {
    let app = TestApp::new(CatalogSource::Static);
    let session = app.user("ada@example.com");
    app.call("POST", "/api/tools/3/favorite", Some(&session), None)
        .await;

    let (_, body) = app.get("/api/favorites", Some(&session)).await;
    let id = body["favorites"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .call("DELETE", &format!("/api/favorites/{id}"), Some(&session), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/favorites", Some(&session)).await;
    assert!(body["favorites"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn sign_up_validation_reports_first_field() {
    let app = TestApp::new(CatalogSource::Static);
    let (status, body) = app
        .call(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": "nope", "password": "1", "full_name": "A" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "email");
    assert_eq!(body["error"], "Invalid email address");
}

#[tokio::test]
async fn sign_up_then_sign_in() {
    let app = TestApp::new(CatalogSource::Static);
    let (status, body) = app
        .call(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": "ada@example.com", "password": "secret1", "fullName": "Ada" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["session"]["access_token"].is_string());

    let (status, _) = app
        .call(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": "ada@example.com", "password": "secret1", "full_name": "Ada" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .call(
            "POST",
            "/api/auth/signin",
            None,
            Some(json!({ "email": "ada@example.com", "password": "wrong-pw" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Failed to sign in");

    let (status, body) = app
        .call(
            "POST",
            "/api/auth/signin",
            None,
            Some(json!({ "email": "ada@example.com", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn session_endpoint_and_sign_out() {
    let app = TestApp::new(CatalogSource::Static);
    let (_, body) = app.get("/api/auth/session", None).await;
    assert!(body["user"].is_null());

    let session = app.user("ada@example.com");
    let (_, body) = app.get("/api/auth/session", Some(&session)).await;
    assert_eq!(body["role"], "user");

    app.call("POST", "/api/auth/signout", Some(&session), None)
        .await;
    let (_, body) = app.get("/api/auth/session", Some(&session)).await;
    assert!(body["user"].is_null());
}

#[tokio::test]
async fn reset_password_needs_recovery_session() {
    let app = TestApp::new(CatalogSource::Static);
    let form = json!({ "password": "newsecret", "confirm_password": "newsecret" });

    let (status, body) = app
        .call("POST", "/api/auth/reset-password", None, Some(form.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["error"],
        "This password reset link is invalid or has expired."
    );

    let session = app.user("ada@example.com");
    let (status, _) = app
        .call(
            "POST",
            "/api/auth/reset-password",
            Some(&session),
            Some(json!({ "password": "newsecret", "confirmPassword": "other" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call("POST", "/api/auth/reset-password", Some(&session), Some(form))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn dashboard_counts_favorites_and_activity() {
    let app = TestApp::new(CatalogSource::Static);
    let (status, _) = app.get("/api/dashboard", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let session = app.user("ada@example.com");
    app.call("POST", "/api/tools/4/favorite", Some(&session), None)
        .await;
    let (_, body) = app
        .call(
            "POST",
            "/api/tools/4/activity",
            Some(&session),
            Some(json!({ "action": "visit" })),
        )
        .await;
    assert_eq!(body["recorded"], true);

    let (status, body) = app.get("/api/dashboard", Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "Ada Lovelace");
    assert_eq!(body["stats"]["favorites"], 1);
    assert_eq!(body["stats"]["tools_explored"], 1);
    assert_eq!(
        body["recent_activity"][0]["activity_data"]["tool_id"],
        "4"
    );
}

#[tokio::test]
async fn anonymous_activity_is_not_recorded() {
    let app = TestApp::new(CatalogSource::Static);
    let (status, body) = app
        .call(
            "POST",
            "/api/tools/4/activity",
            None,
            Some(json!({ "action": "visit" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recorded"], false);
}

#[tokio::test]
async fn notifications_mark_read() {
    let app = TestApp::new(CatalogSource::Static);
    let session = app.user("ada@example.com");

    let (_, body) = app.get("/api/notifications", Some(&session)).await;
    assert_eq!(body["unread"], 2);
    assert_eq!(body["notifications"][0]["title"], "Welcome to GS AI Tools!");
    assert!(body["notifications"][0]["age"].as_str().unwrap().ends_with("ago"));

    let (status, _) = app
        .call("POST", "/api/notifications/1/read", Some(&session), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .call("POST", "/api/notifications/missing/read", Some(&session), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/api/notifications", Some(&session)).await;
    assert_eq!(body["unread"], 1);

    app.call("POST", "/api/notifications/read-all", Some(&session), None)
        .await;
    let (_, body) = app.get("/api/notifications", Some(&session)).await;
    assert_eq!(body["unread"], 0);
}

#[tokio::test]
async fn preferences_work_without_session() {
    let app = TestApp::new(CatalogSource::Static);
    let (_, body) = app.get("/api/preferences", None).await;
    assert_eq!(body, json!({ "vibe_mode": false, "particles_enabled": true }));

    app.call(
        "PUT",
        "/api/preferences",
        None,
        Some(json!({ "vibe_mode": true })),
    )
    .await;
    let (_, body) = app.get("/api/preferences", None).await;
    assert_eq!(body, json!({ "vibe_mode": true, "particles_enabled": true }));

    let session = app.user("ada@example.com");
    let (_, body) = app.get("/api/preferences", Some(&session)).await;
    assert_eq!(body["vibe_mode"], false);
}

#[tokio::test]
async fn settings_round_trip() {
    let app = TestApp::new(CatalogSource::Static);
    let (status, _) = app.get("/api/settings", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let session = app.user("ada@example.com");
    let (_, body) = app.get("/api/settings", Some(&session)).await;
    assert_eq!(body["theme"], "dark");
    assert_eq!(body["newsletter"], false);

    let (status, _) = app
        .call(
            "PUT",
            "/api/settings",
            Some(&session),
            Some(json!({ "newsletter": true, "language": "hi" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/settings", Some(&session)).await;
    assert_eq!(body["newsletter"], true);
    assert_eq!(body["language"], "hi");
    assert_eq!(body["email_notifications"], true);
}

#[tokio::test]
async fn admin_routes_are_gated() {
    let app = TestApp::new(CatalogSource::Backend);
    let member = app.user("ada@example.com");

    let (status, body) = app.get("/api/admin/roles", Some(&member)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You don't have admin permissions.");

    let admin = app.user("root@example.com");
    app.backend.grant(&admin.user.id, Role::Admin);

    let (status, body) = app.get("/api/admin/roles", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["total"], 2);
    assert_eq!(body["summary"]["admins"], 1);

    let uri = format!("/api/admin/roles/{}/toggle", member.user.id);
    let (_, body) = app.call("POST", &uri, Some(&admin), None).await;
    assert_eq!(body["role"], "admin");
    assert_eq!(body["message"], "User role updated to admin.");
}

#[tokio::test]
async fn admin_curates_catalog() {
    let app = TestApp::new(CatalogSource::Backend);
    let admin = app.user("root@example.com");
    app.backend.grant(&admin.user.id, Role::Admin);

    let (status, body) = app
        .call(
            "POST",
            "/api/admin/tools",
            Some(&admin),
            Some(json!({ "name": "", "category": "Search" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");

    let (status, tool) = app
        .call(
            "POST",
            "/api/admin/tools",
            Some(&admin),
            Some(json!({
                "name": "Perplexity",
                "category": "Search",
                "rating": 4,
                "price": "Freemium",
                "tags": ["search", "answers"]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = tool["id"].as_str().unwrap().to_string();

    let (_, body) = app.get("/api/tools?category=Search", None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["tools"][0]["price_badge"], "free");

    let (status, _) = app
        .call(
            "PUT",
            "/api/admin/tools/missing",
            Some(&admin),
            Some(json!({ "name": "X", "category": "Y" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call("DELETE", &format!("/api/admin/tools/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get("/api/tools?category=Search", None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn backend_failure_is_generic_bad_gateway() {
    let app = TestApp::new(CatalogSource::Backend);
    app.backend
        .fail_with(Some(CollaboratorError::network("connection refused")));

    let (status, body) = app.get("/api/tools", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to load tools");
}
