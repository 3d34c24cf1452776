use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use axum_extra::extract::Form;
use serde::Deserialize;

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::profile::{CUISINE_OPTIONS, PLACE_OPTIONS},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/account", get(account_form).post(account_submit))
}

#[derive(Clone)]
struct ToggleRow {
    name: &'static str,
    checked: bool,
}

#[derive(Template)]
#[template(path = "account.html")]
struct AccountTemplate {
    username: String,
    email: String,
    phone: String,
    address: String,
    age: String,
    cuisines: Vec<ToggleRow>,
    places: Vec<ToggleRow>,
}

async fn account_form(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let user = current.require_user()?;
    let profile = state
        .sessions
        .with_session(&user.session_id, |session| session.profile.clone())
        .ok_or(AppError::Unauthorized)?;

    let cuisines = CUISINE_OPTIONS
        .iter()
        .map(|&name| ToggleRow {
            name,
            checked: profile.likes_cuisine(name),
        })
        .collect();
    let places = PLACE_OPTIONS
        .iter()
        .map(|&name| ToggleRow {
            name,
            checked: profile.likes_place(name),
        })
        .collect();

    Ok(AskamaTemplateResponse::into_response(AccountTemplate {
        username: user.username.clone(),
        email: profile.email,
        phone: profile.phone,
        address: profile.address,
        age: profile.age,
        cuisines,
        places,
    }))
}

#[derive(Deserialize)]
struct ProfileForm {
    email: String,
    phone: String,
    address: String,
    age: String,
    #[serde(default)]
    cuisines: Vec<String>,
    #[serde(default)]
    places: Vec<String>,
}

async fn account_submit(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<ProfileForm>,
) -> Result<Redirect, AppError> {
    let user = current.require_user()?;
    state
        .sessions
        .with_session(&user.session_id, |session| {
            session.profile.email = form.email;
            session.profile.phone = form.phone;
            session.profile.address = form.address;
            session.profile.age = form.age;
            // Unknown option values are dropped rather than stored.
            session.profile.cuisines = form
                .cuisines
                .into_iter()
                .filter(|name| CUISINE_OPTIONS.contains(&name.as_str()))
                .collect();
            session.profile.places = form
                .places
                .into_iter()
                .filter(|name| PLACE_OPTIONS.contains(&name.as_str()))
                .collect();
        })
        .ok_or(AppError::Unauthorized)?;
    Ok(Redirect::to("/account"))
}
