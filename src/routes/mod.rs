pub mod account;
pub mod bookings;
pub mod menu;
pub mod public;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(public::router())
        .merge(menu::router())
        .merge(bookings::router())
        .merge(account::router())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}
