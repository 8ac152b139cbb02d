//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};

use crate::domain::{BarcodeLifecycle, Username};
use crate::inbound::http::session_config::{SESSION_COOKIE_NAME, SESSION_TTL_DAYS};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, barcodes, pages};
use crate::middleware::SessionGate;
use crate::outbound::persistence::{
    DieselBarcodeRepository, DieselLoginService, InMemoryBarcodeRepository, InMemoryLoginService,
};
use crate::outbound::render::SvgBarcodeRenderer;

const FIXTURE_LOGIN_USERNAME: &str = "admin";
const FIXTURE_LOGIN_PASSWORD: &str = "password";

/// Build the shared HTTP state from configured ports and fixture fallbacks.
///
/// Uses database-backed adapters when a pool is configured, otherwise
/// in-memory adapters with a single fixture account.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => HttpState::new(
            Arc::new(DieselLoginService::new(pool.clone())),
            BarcodeLifecycle::new(Arc::new(DieselBarcodeRepository::new(pool.clone()))),
            Arc::new(SvgBarcodeRenderer::new()),
        ),
        None => {
            let username = Username::new(FIXTURE_LOGIN_USERNAME)
                .map_err(|err| std::io::Error::other(format!("invalid fixture username: {err}")))?;
            HttpState::new(
                Arc::new(InMemoryLoginService::new(username, FIXTURE_LOGIN_PASSWORD)),
                BarcodeLifecycle::new(Arc::new(InMemoryBarcodeRepository::new())),
                Arc::new(SvgBarcodeRenderer::new()),
            )
        }
    };
    Ok(state)
}

/// Build the cookie session middleware shared by the API and the pages.
pub fn session_middleware(
    key: Key,
    cookie_secure: bool,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::days(SESSION_TTL_DAYS)),
        )
        .build()
}

/// Register every route the server exposes.
///
/// Kept separate from middleware wiring so integration tests can mount the
/// same surface with their own state and session key.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let api = web::scope("/api/v1")
        .service(auth::login)
        .service(auth::logout)
        .service(auth::current_user)
        .service(barcodes::create_barcode)
        .service(barcodes::list_barcodes)
        .service(barcodes::get_barcode)
        .service(barcodes::barcode_image)
        .service(barcodes::delete_barcode)
        .service(barcodes::render_barcode);

    cfg.service(api)
        .service(pages::generator_page)
        .service(pages::login_page)
        .service(pages::dashboard_page);
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when state construction or socket binding
/// fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config)?);
    let ServerConfig {
        session,
        bind_addr,
        db_pool: _,
    } = config;
    let key = session.key;
    let cookie_secure = session.cookie_secure;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_state.clone())
            .wrap(SessionGate)
            .wrap(session_middleware(key.clone(), cookie_secure))
            .configure(configure_routes)
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
