//! Session gate redirecting anonymous visitors away from protected pages.
//!
//! The gate inspects the session cookie before routing. Anonymous requests
//! for a protected path are answered with `303 See Other` pointing at the
//! login page; everything else passes through untouched. The gate fails
//! closed: an unreadable or tampered session counts as anonymous.
//!
//! API routes are not gated here. They resolve the caller themselves and
//! answer `401`/`404` in JSON rather than redirecting.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::inbound::http::session::user_id_from_request;

const LOGIN_PATH: &str = "/login";
const PROTECTED_PREFIXES: &[&str] = &["/dashboard"];

fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Middleware guarding protected pages behind an authenticated session.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::middleware::SessionGate;
///
/// let app = App::new().wrap(SessionGate);
/// ```
#[derive(Clone)]
pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware { service }))
    }
}

/// Service wrapper produced by [`SessionGate`].
///
/// Applications should not use this type directly.
pub struct SessionGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_protected(req.path()) && user_id_from_request(&req).is_none() {
            let (req, _payload) = req.into_parts();
            let res = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, LOGIN_PATH))
                .finish()
                .map_into_right_body();
            return Box::pin(ready(Ok(ServiceResponse::new(req, res))));
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_session::storage::CookieSessionStore;
    use actix_session::SessionMiddleware;
    use actix_web::cookie::Key;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{web, App, HttpResponse};
    use rstest::rstest;

    use super::*;
    use crate::domain::{User, UserId, Username};
    use crate::inbound::http::session::SessionContext;
    use crate::inbound::http::ApiError;

    #[rstest]
    #[case("/dashboard", true)]
    #[case("/dashboard/", true)]
    #[case("/dashboard/archive", true)]
    #[case("/dashboards", false)]
    #[case("/", false)]
    #[case("/login", false)]
    fn protected_prefix_matching(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_protected(path), expected, "{path}");
    }

    fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".into())
            .cookie_secure(false)
            .build()
    }

    fn test_app_routes(
        cfg: &mut web::ServiceConfig,
    ) {
        cfg.route(
            "/dashboard",
            web::get().to(|| async { HttpResponse::Ok().body("dashboard") }),
        )
        .route("/login", web::get().to(|| async { HttpResponse::Ok().body("login") }))
        .route(
            "/session",
            web::post().to(|session: SessionContext| async move {
                let user = User::new(
                    UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
                    Username::new("ada").expect("fixture username"),
                );
                session.persist_user(&user).map_err(ApiError::from)?;
                Ok::<_, ApiError>(HttpResponse::Ok())
            }),
        );
    }

    #[actix_web::test]
    async fn anonymous_dashboard_request_redirects_to_login() {
        let app = actix_test::init_service(
            App::new()
                .wrap(SessionGate)
                .wrap(test_session_middleware())
                .configure(test_app_routes),
        )
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/dashboard").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get("location").expect("location header"),
            "/login"
        );
    }

    #[actix_web::test]
    async fn authenticated_dashboard_request_passes_through() {
        let app = actix_test::init_service(
            App::new()
                .wrap(SessionGate)
                .wrap(test_session_middleware())
                .configure(test_app_routes),
        )
        .await;

        let login_res =
            actix_test::call_service(&app, actix_test::TestRequest::post().uri("/session").to_request())
                .await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn public_routes_are_not_gated() {
        let app = actix_test::init_service(
            App::new()
                .wrap(SessionGate)
                .wrap(test_session_middleware())
                .configure(test_app_routes),
        )
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/login").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
