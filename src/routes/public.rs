use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use tracing::info;

use crate::{
    auth::{self, CurrentUser},
    error::AppError,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(entry))
        .route("/login", get(login_form).post(login_submit))
        .route("/signup", get(signup_form).post(signup_submit))
        .route("/forgot-password", post(forgot_password))
        .route("/logout", post(logout))
}

async fn entry(current: CurrentUser) -> Redirect {
    if current.0.is_some() {
        Redirect::to("/menu")
    } else {
        Redirect::to("/login")
    }
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    show_error: bool,
    username: String,
}

async fn login_form() -> impl IntoResponse {
    AskamaTemplateResponse::into_response(LoginTemplate {
        show_error: false,
        username: String::new(),
    })
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login_submit(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if auth::verify_credentials(&state, &form.username, &form.password).await? {
        let session_id = auth::create_session(&state, &form.username);
        info!("session started for {}", form.username);
        Ok((
            auth::apply_session_cookie(jar, &session_id),
            Redirect::to("/menu"),
        )
            .into_response())
    } else {
        Ok(render_login_error(form.username))
    }
}

fn render_login_error(username: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        AskamaTemplateResponse::into_response(LoginTemplate {
            show_error: true,
            username,
        }),
    )
        .into_response()
}

#[derive(Template)]
#[template(path = "signup.html")]
struct SignupTemplate {
    show_error: bool,
    username: String,
}

async fn signup_form() -> impl IntoResponse {
    AskamaTemplateResponse::into_response(SignupTemplate {
        show_error: false,
        username: String::new(),
    })
}

#[derive(Deserialize)]
struct SignupForm {
    username: String,
    password: String,
}

async fn signup_submit(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    if form.username.is_empty() || form.password.is_empty() {
        return Ok(render_signup_error(form.username));
    }

    // The new pair overwrites whatever was saved before.
    state
        .settings
        .save_credentials(&form.username, &form.password)
        .await?;
    info!("credentials saved for {}", form.username);
    Ok(Redirect::to("/login").into_response())
}

fn render_signup_error(username: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        AskamaTemplateResponse::into_response(SignupTemplate {
            show_error: true,
            username,
        }),
    )
        .into_response()
}

async fn forgot_password() -> Result<Redirect, AppError> {
    Err(AppError::NotImplemented)
}

async fn logout(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<(PrivateCookieJar, Redirect), AppError> {
    if let Some(cookie) = jar.get(auth::SESSION_COOKIE) {
        auth::destroy_session(&state, cookie.value());
    }
    Ok((auth::clear_session_cookie(jar), Redirect::to("/")))
}
