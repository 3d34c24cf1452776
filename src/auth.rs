use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar};

use crate::{error::AppError, state::AppState};

pub const SESSION_COOKIE: &str = "travelbucket_session";

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub session_id: String,
    pub username: String,
}

#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let jar = PrivateCookieJar::from_headers(&parts.headers, app.cookie_key.clone());
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(Self(None));
        };

        let session_id = cookie.value().to_string();
        let user = app
            .sessions
            .username(&session_id)
            .map(|username| AuthenticatedUser {
                session_id,
                username,
            });
        Ok(Self(user))
    }
}

impl CurrentUser {
    pub fn require_user(&self) -> Result<&AuthenticatedUser, AppError> {
        self.0.as_ref().ok_or(AppError::Unauthorized)
    }
}

// The vault keeps the pair unhashed and this is a literal string comparison
// with no lockout or rate limiting. Known weakness, kept as-is.
pub async fn verify_credentials(
    state: &AppState,
    username: &str,
    password: &str,
) -> Result<bool, AppError> {
    let Some(saved) = state.settings.saved_credentials().await? else {
        return Ok(false);
    };
    Ok(saved.username == username && saved.password == password)
}

pub fn create_session(state: &AppState, username: &str) -> String {
    state.sessions.create(username)
}

pub fn destroy_session(state: &AppState, session_id: &str) {
    state.sessions.destroy(session_id);
}

pub fn apply_session_cookie(jar: PrivateCookieJar, session_id: &str) -> PrivateCookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .build();
    jar.add(cookie)
}

pub fn clear_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    jar.remove(cookie)
}
