//! HTML page handlers.
//!
//! The pages are deliberately small: a public generator at `/`, a login form
//! at `/login`, and the saved-barcode dashboard at `/dashboard`. All data
//! access happens through the JSON API; these handlers only serve shells.

use actix_web::http::header::ContentType;
use actix_web::{get, HttpResponse};

const GENERATOR_PAGE: &str = include_str!("pages/generator.html");
const LOGIN_PAGE: &str = include_str!("pages/login.html");
const DASHBOARD_PAGE: &str = include_str!("pages/dashboard.html");

fn html(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Public barcode generator. Anonymous visitors can render but not save.
#[get("/")]
pub async fn generator_page() -> HttpResponse {
    html(GENERATOR_PAGE)
}

/// Login form.
#[get("/login")]
pub async fn login_page() -> HttpResponse {
    html(LOGIN_PAGE)
}

/// Saved-barcode dashboard. Reachable only through the session gate.
#[get("/dashboard")]
pub async fn dashboard_page() -> HttpResponse {
    html(DASHBOARD_PAGE)
}
