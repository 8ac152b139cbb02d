//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every JSON endpoint from the inbound layer, the request
//! and response body schemas, and the session cookie security scheme.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ErrorCode, Symbology, User};
use crate::inbound::http::auth::{LoginRequestBody, UserBody};
use crate::inbound::http::barcodes::{BarcodeBody, BarcodeRequestBody};
use crate::inbound::http::error::ApiError;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Barcode backend API",
        description = "HTTP interface for rendering barcodes and managing saved records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::barcodes::create_barcode,
        crate::inbound::http::barcodes::list_barcodes,
        crate::inbound::http::barcodes::get_barcode,
        crate::inbound::http::barcodes::barcode_image,
        crate::inbound::http::barcodes::delete_barcode,
        crate::inbound::http::barcodes::render_barcode,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        LoginRequestBody,
        UserBody,
        BarcodeRequestBody,
        BarcodeBody,
        Symbology,
        User,
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "barcodes", description = "Barcode rendering and saved records")
    )
)]
pub struct ApiDoc;
