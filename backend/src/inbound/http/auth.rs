//! Authentication HTTP handlers.
//!
//! ```text
//! POST /api/v1/login
//! POST /api/v1/logout
//! GET  /api/v1/me
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, User};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request payload for logging in.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Authenticated identity returned to the caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.to_string(),
        }
    }
}

/// Authenticate and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Authenticated", body = UserBody),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Login service unavailable")
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<UserBody>> {
    let credentials = LoginCredentials::try_from_parts(&body.username, &body.password)
        .map_err(|err| Error::unauthenticated(err.to_string()))?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user)?;
    Ok(web::Json(user.into()))
}

/// End the caller's session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session ended")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Report the authenticated identity, if any.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Authenticated caller", body = UserBody),
        (status = 401, description = "No active session")
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(session: SessionContext) -> ApiResult<web::Json<UserBody>> {
    let id = session.require_user_id()?;
    // A session that names an id but no username is not one this server
    // issued; reject it rather than invent a blank identity.
    let username = session
        .username()
        .ok_or_else(|| Error::unauthenticated("login required"))?;
    Ok(web::Json(UserBody {
        id: id.to_string(),
        username: username.to_string(),
    }))
}
