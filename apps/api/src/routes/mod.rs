pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::interview::handlers as interview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/signup", post(auth::handle_signup))
        .route("/login", post(auth::handle_login))
        .route("/logout", get(auth::handle_logout))
        // Adaptive interview
        .route("/start_interview/", post(interview::handle_start_interview))
        .route("/submit_answer/", post(interview::handle_submit_answer))
        .route("/session/", get(interview::handle_get_session))
        .route("/progress", get(interview::handle_progress))
        // Fixed-topic practice
        .route("/generate_question/", post(interview::handle_generate_question))
        .route("/analyse_answer/", post(interview::handle_analyse_answer))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::interview::service::test_support::service;
    use crate::providers::test_support::StubGenerator;
    use crate::store::test_support::MemoryStore;

    fn app(replies: Vec<Option<&str>>) -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let interviews = service(vec![StubGenerator::new("local", replies)], store.clone());
        let state = AppState {
            store: store.clone(),
            interviews: Arc::new(interviews),
        };
        (build_router(state), store)
    }

    fn form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_req(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> Response {
        app.clone().oneshot(req).await.unwrap()
    }

    async fn json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn sign_up_and_log_in(app: &Router, username: &str) -> String {
        let body = format!("username={username}&password=s3cret");
        let res = send(app, form("/signup", None, &body)).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = send(app, form("/login", None, &body)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_lists_tiers() {
        let (app, _) = app(vec![None]);
        let res = send(&app, get_req("/health", None)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json(res).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["providers"], serde_json::json!(["local", "static"]));
    }

    #[tokio::test]
    async fn test_full_interview_round_trip() {
        let (app, _) = app(vec![
            Some("Q1: what is a REST API?"),
            Some("That is incorrect, REST is an architectural style."),
            Some("Q2: what is an HTTP verb?"),
        ]);
        let cookie = sign_up_and_log_in(&app, "alice").await;
        assert_eq!(cookie, "user=alice");

        let res = send(
            &app,
            form("/start_interview/", Some(&cookie), "role=Backend+Engineer&level=junior"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json(res).await["question"], "Q1: what is a REST API?");

        let res = send(&app, form("/submit_answer/", Some(&cookie), "answer=I+don%27t+know")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json(res).await;
        assert!(body["feedback"].as_str().unwrap().contains("incorrect"));
        assert_eq!(body["next_question"], "Q2: what is an HTTP verb?");

        let session = json(send(&app, get_req("/session/", Some(&cookie))).await).await;
        assert_eq!(session["round"], 2);
        assert_eq!(session["difficulty"], "easy");
        assert_eq!(session["level"], "junior");
        assert_eq!(session["history"][0]["answer"], "I don't know");

        let progress = json(send(&app, get_req("/progress", Some(&cookie))).await).await;
        assert_eq!(progress["username"], "alice");
        assert_eq!(progress["skills"][0]["skill"], "auto");
        assert_eq!(progress["skills"][0]["attempts"], 1);
        assert_eq!(progress["skills"][0]["weak"], true);
    }

    #[tokio::test]
    async fn test_submit_before_start_returns_error_payload() {
        let (app, store) = app(vec![Some("anything")]);
        let cookie = sign_up_and_log_in(&app, "bob").await;

        let res = send(&app, form("/submit_answer/", Some(&cookie), "answer=hi")).await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(json(res).await["error"]["code"], "NO_ACTIVE_SESSION");
        assert_eq!(store.attempt_count(), 0);
    }

    #[tokio::test]
    async fn test_interview_routes_require_cookie() {
        let (app, _) = app(vec![None]);

        let res = send(&app, form("/start_interview/", None, "role=SRE&level=mid")).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json(res).await["error"]["code"], "NOT_AUTHENTICATED");

        let res = send(&app, get_req("/progress", None)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unregistered_cookie_cannot_start_interview() {
        let (app, _) = app(vec![Some("Q")]);

        let res = send(
            &app,
            form("/start_interview/", Some("user=ghost"), "role=SRE&level=mid"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json(res).await["error"]["code"], "NOT_AUTHENTICATED");

        let res = send(&app, get_req("/session/", Some("user=ghost"))).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_level_is_rejected() {
        let (app, _) = app(vec![None]);
        let res = send(
            &app,
            form("/start_interview/", Some("user=carol"), "role=SRE&level=staff"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_signup_and_bad_login() {
        let (app, _) = app(vec![None]);
        sign_up_and_log_in(&app, "dave").await;

        let res = send(&app, form("/signup", None, "username=dave&password=other")).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(json(res).await["error"]["message"], "User already exists!");

        let res = send(&app, form("/login", None, "username=dave&password=wrong")).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().get(header::SET_COOKIE).is_none());

        let res = send(&app, form("/login", None, "username=nobody&password=x")).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_expires_cookie_and_session() {
        let (app, _) = app(vec![Some("Q")]);
        let cookie = sign_up_and_log_in(&app, "erin").await;
        send(&app, form("/start_interview/", Some(&cookie), "role=QA&level=intern")).await;

        let res = send(&app, get_req("/logout", Some(&cookie))).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let set_cookie = res.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.contains("Max-Age=0"));

        let res = send(&app, get_req("/session/", Some(&cookie))).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_topic_flow() {
        let (app, store) = app(vec![Some("What is a B-tree?"), Some("Not correct.")]);

        let res = send(
            &app,
            form(
                "/generate_question/",
                None,
                "role=SDE&type=technical&topic=databases&difficulty=easy",
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json(res).await["question"], "What is a B-tree?");

        let cookie = sign_up_and_log_in(&app, "frank").await;
        let res = send(
            &app,
            form(
                "/analyse_answer/",
                Some(&cookie),
                "role=SDE&topic=databases&difficulty=easy&answer=a+tree",
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json(res).await["feedback"], "Not correct.");
        assert_eq!(store.attempt_count(), 1);

        let progress = json(send(&app, get_req("/progress", Some(&cookie))).await).await;
        assert_eq!(progress["skills"][0]["skill"], "databases");
        assert_eq!(progress["skills"][0]["weak"], true);
    }
}
