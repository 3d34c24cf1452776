use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::catalog::{self, CATEGORIES},
    state::AppState,
};

// The one external URL the app touches. Fixed, never parameterized.
const MAP_SEARCH_URL: &str =
    "https://www.google.com/maps/search/?api=1&query=tourist+spots+near+me";

const DEFAULT_ORIGIN: &str = "Myplace";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", get(menu_page))
        .route("/menu/:slug", get(category_page))
        .route("/map", get(map_page))
}

#[derive(Clone)]
struct CategoryCard {
    slug: &'static str,
    name: &'static str,
    tint: &'static str,
}

#[derive(Template)]
#[template(path = "menu.html")]
struct MenuTemplate {
    categories: Vec<CategoryCard>,
}

async fn menu_page(current: CurrentUser) -> Result<impl IntoResponse, AppError> {
    current.require_user()?;
    let categories = CATEGORIES
        .iter()
        .map(|category| CategoryCard {
            slug: category.slug,
            name: category.name,
            tint: category.tint,
        })
        .collect();
    Ok(AskamaTemplateResponse::into_response(MenuTemplate {
        categories,
    }))
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Clone)]
struct PlaceRow {
    name: &'static str,
    book_href: String,
}

#[derive(Template)]
#[template(path = "category.html")]
struct CategoryTemplate {
    name: &'static str,
    slug: &'static str,
    query: String,
    places: Vec<PlaceRow>,
}

async fn category_page(
    current: CurrentUser,
    Path(slug): Path<String>,
    Query(search): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    current.require_user()?;
    let category = catalog::find_category(&slug).ok_or(AppError::NotFound)?;
    let places = catalog::search_places(category.slug, &search.q)
        .into_iter()
        .map(|place| PlaceRow {
            name: place,
            book_href: book_href(place),
        })
        .collect();
    Ok(AskamaTemplateResponse::into_response(CategoryTemplate {
        name: category.name,
        slug: category.slug,
        query: search.q,
        places,
    }))
}

fn book_href(place: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("from", DEFAULT_ORIGIN)
        .append_pair("to", place)
        .finish();
    format!("/bookings/new?{query}")
}

#[derive(Template)]
#[template(path = "map.html")]
struct MapTemplate {
    map_url: &'static str,
}

async fn map_page(current: CurrentUser) -> Result<impl IntoResponse, AppError> {
    current.require_user()?;
    Ok(AskamaTemplateResponse::into_response(MapTemplate {
        map_url: MAP_SEARCH_URL,
    }))
}
