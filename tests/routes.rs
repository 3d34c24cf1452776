use std::{fs::File, net::SocketAddr};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use tempfile::TempDir;
use tower::ServiceExt;
use travelbucket::{
    config::AppConfig,
    db::init_pool,
    routes::create_router,
    services::{sessions::SessionService, settings::SettingsService},
    state::AppState,
};

async fn test_app() -> (Router, TempDir) {
    let root = TempDir::new().expect("temp dir");
    let db_path = root.path().join("routes.sqlite");
    File::create(&db_path).expect("db file");

    let config = AppConfig {
        database_url: format!("sqlite://{}", db_path.to_string_lossy()),
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        cookie_secret: "routes-cookie-secret".into(),
    };

    let db = init_pool(&config.database_url).await.expect("pool");
    sqlx::migrate!("./migrations").run(&db).await.expect("migrations");

    let settings = SettingsService::new(db.clone());
    let state = AppState::new(config, db, settings, SessionService::new());
    (create_router(state), root)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("request")
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn form_post_with_cookie(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("location header value")
}

fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .expect("set-cookie value")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

// Signs up and signs in, returning the session cookie pair.
async fn sign_in(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(form_post("/signup", "username=traveler&password=1234"))
        .await
        .expect("signup");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app
        .clone()
        .oneshot(form_post("/login", "username=traveler&password=1234"))
        .await
        .expect("login");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/menu");
    session_cookie(&response)
}

#[tokio::test]
async fn anonymous_visitors_are_sent_to_the_login_page() {
    let (app, _root) = test_app().await;

    let response = app.clone().oneshot(get("/")).await.expect("entry");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    for uri in ["/menu", "/bookings", "/account", "/map"] {
        let response = app.clone().oneshot(get(uri)).await.expect("page");
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }
}

#[tokio::test]
async fn wrong_credentials_rerender_the_login_form() {
    let (app, _root) = test_app().await;

    let response = app
        .clone()
        .oneshot(form_post("/login", "username=traveler&password=wrong"))
        .await
        .expect("login");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("Invalid username or password"));
}

#[tokio::test]
async fn empty_signup_rerenders_the_form() {
    let (app, _root) = test_app().await;

    let response = app
        .clone()
        .oneshot(form_post("/signup", "username=&password=1234"))
        .await
        .expect("signup");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("Username and password must not be empty"));
}

#[tokio::test]
async fn signed_in_visitors_land_on_the_menu() {
    let (app, _root) = test_app().await;
    let cookie = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .expect("entry");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/menu");

    let response = app
        .clone()
        .oneshot(get_with_cookie("/menu", &cookie))
        .await
        .expect("menu");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Travel Bucket"));
    assert!(body.contains("Sea Travel"));
}

#[tokio::test]
async fn category_pages_filter_places() {
    let (app, _root) = test_app().await;
    let cookie = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/menu/sea?q=coral", &cookie))
        .await
        .expect("category");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Coral Island"));
    assert!(!body.contains("Phuket Beach"));

    let response = app
        .clone()
        .oneshot(get_with_cookie("/menu/space", &cookie))
        .await
        .expect("unknown category");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bookings_round_trip_over_http() {
    let (app, _root) = test_app().await;
    let cookie = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/bookings", &cookie))
        .await
        .expect("bookings page");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("No bookings saved yet."));

    let form = "from=NYC&to=LAX&passengers=2&age_range=Adult\
                &departure_date=2024-01-10&return_date=2024-01-05";
    let response = app
        .clone()
        .oneshot(form_post_with_cookie("/bookings", &cookie, form))
        .await
        .expect("create booking");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/bookings");

    let response = app
        .clone()
        .oneshot(get_with_cookie("/bookings", &cookie))
        .await
        .expect("bookings page");
    let body = body_text(response).await;
    assert!(body.contains("NYC ⇌ LAX"));
    assert!(body.contains("2 • Adult"));
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let (app, _root) = test_app().await;
    let cookie = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(form_post_with_cookie("/logout", &cookie, ""))
        .await
        .expect("logout");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app
        .clone()
        .oneshot(get_with_cookie("/bookings", &cookie))
        .await
        .expect("bookings page");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}
