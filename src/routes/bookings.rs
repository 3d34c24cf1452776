use std::fmt;

use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::booking::{AgeRange, Booking},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(bookings_page).post(booking_create))
        .route("/bookings/new", get(prefilled_form).post(prefilled_create))
        .route("/bookings/:id", get(booking_detail))
        .route("/bookings/:id/toggle", post(booking_toggle))
        .route("/bookings/:id/delete", post(booking_delete))
}

#[derive(Clone)]
struct BookingCard {
    id: String,
    date: String,
    route: String,
    meta: String,
    completed: bool,
}

#[derive(Template)]
#[template(path = "bookings.html")]
struct BookingsTemplate {
    today: String,
    has_bookings: bool,
    bookings: Vec<BookingCard>,
}

async fn bookings_page(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let user = current.require_user()?;
    let bookings = state
        .sessions
        .with_session(&user.session_id, |session| {
            session.bookings.list().iter().map(card_for).collect::<Vec<_>>()
        })
        .ok_or(AppError::Unauthorized)?;
    Ok(AskamaTemplateResponse::into_response(BookingsTemplate {
        today: Local::now().date_naive().to_string(),
        has_bookings: !bookings.is_empty(),
        bookings,
    }))
}

fn card_for(booking: &Booking) -> BookingCard {
    BookingCard {
        id: booking.id.clone(),
        date: format_date(booking.departure_date),
        route: booking.route_text(),
        meta: format!("{} • {}", booking.passengers, booking.age_range),
        completed: booking.is_completed,
    }
}

#[derive(Deserialize)]
struct BookingForm {
    from: String,
    to: String,
    passengers: String,
    age_range: AgeRange,
    departure_date: NaiveDate,
    return_date: NaiveDate,
}

async fn booking_create(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<BookingForm>,
) -> Result<Redirect, AppError> {
    let user = current.require_user()?;
    let booking = state
        .sessions
        .with_session(&user.session_id, |session| {
            session.bookings.create(
                form.from,
                form.to,
                form.departure_date,
                form.return_date,
                form.passengers,
                form.age_range,
            )
        })
        .ok_or(AppError::Unauthorized)?;
    debug!("booking {} saved", booking.id);
    Ok(Redirect::to("/bookings"))
}

#[derive(Deserialize)]
struct PrefilledQuery {
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
}

#[derive(Template)]
#[template(path = "booking_new.html")]
struct PrefilledTemplate {
    from: String,
    to: String,
    today: String,
}

async fn prefilled_form(
    current: CurrentUser,
    Query(query): Query<PrefilledQuery>,
) -> Result<impl IntoResponse, AppError> {
    current.require_user()?;
    Ok(AskamaTemplateResponse::into_response(PrefilledTemplate {
        from: query.from,
        to: query.to,
        today: Local::now().date_naive().to_string(),
    }))
}

#[derive(Debug, Clone, Copy, Deserialize)]
enum TravelClass {
    Economy,
    Business,
    #[serde(rename = "First Class")]
    FirstClass,
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TravelClass::Economy => "Economy",
            TravelClass::Business => "Business",
            TravelClass::FirstClass => "First Class",
        };
        write!(f, "{label}")
    }
}

#[derive(Deserialize)]
struct PrefilledForm {
    from: String,
    to: String,
    departure_date: NaiveDate,
    return_date: NaiveDate,
    passengers: u32,
    #[serde(rename = "class")]
    travel_class: TravelClass,
}

async fn prefilled_create(
    State(state): State<AppState>,
    current: CurrentUser,
    Form(form): Form<PrefilledForm>,
) -> Result<Redirect, AppError> {
    let user = current.require_user()?;
    let count = form.passengers.clamp(1, 10);
    // The record has no class field, so the class rides along in the
    // free-form passenger description.
    let description = format!("{} × {}", count, form.travel_class);
    let booking = state
        .sessions
        .with_session(&user.session_id, |session| {
            session.bookings.create(
                form.from,
                form.to,
                form.departure_date,
                form.return_date,
                description,
                AgeRange::Adult,
            )
        })
        .ok_or(AppError::Unauthorized)?;
    Ok(Redirect::to(&format!("/bookings/{}", booking.id)))
}

#[derive(Template)]
#[template(path = "booking_detail.html")]
struct BookingDetailTemplate {
    id: String,
    origin: String,
    destination: String,
    departure: String,
    returning: String,
    passengers: String,
    age_range: &'static str,
    status: &'static str,
    completed: bool,
    raw_json: String,
}

async fn booking_detail(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = current.require_user()?;
    let booking = state
        .sessions
        .with_session(&user.session_id, |session| {
            session.bookings.get(&booking_id).cloned()
        })
        .ok_or(AppError::Unauthorized)?
        .ok_or(AppError::NotFound)?;
    let raw_json =
        serde_json::to_string_pretty(&booking).map_err(|err| AppError::Other(err.into()))?;
    Ok(AskamaTemplateResponse::into_response(BookingDetailTemplate {
        id: booking.id.clone(),
        origin: booking.origin.clone(),
        destination: booking.destination.clone(),
        departure: format_date(booking.departure_date),
        returning: format_date(booking.return_date),
        passengers: booking.passengers.clone(),
        age_range: booking.age_range.as_str(),
        status: booking.status_text(),
        completed: booking.is_completed,
        raw_json,
    }))
}

async fn booking_toggle(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(booking_id): Path<String>,
) -> Result<Redirect, AppError> {
    let user = current.require_user()?;
    state
        .sessions
        .with_session(&user.session_id, |session| {
            session.bookings.toggle_completed(&booking_id)
        })
        .ok_or(AppError::Unauthorized)?;
    Ok(Redirect::to(&format!("/bookings/{booking_id}")))
}

async fn booking_delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(booking_id): Path<String>,
) -> Result<Redirect, AppError> {
    let user = current.require_user()?;
    state
        .sessions
        .with_session(&user.session_id, |session| {
            session.bookings.delete(&booking_id)
        })
        .ok_or(AppError::Unauthorized)?;
    debug!("booking {booking_id} deleted");
    Ok(Redirect::to("/bookings"))
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
