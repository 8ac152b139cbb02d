//! Barcode record HTTP handlers.
//!
//! ```text
//! POST   /api/v1/barcodes
//! GET    /api/v1/barcodes
//! GET    /api/v1/barcodes/{id}
//! GET    /api/v1/barcodes/{id}/image
//! DELETE /api/v1/barcodes/{id}
//! POST   /api/v1/render
//! ```
//!
//! Handlers resolve the caller's identity from the session once and pass it
//! into the lifecycle service explicitly; no ownership decision happens at
//! this layer.

use actix_web::{delete, get, http::header, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{BarcodePayload, BarcodeRecord, Error, Symbology};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request payload for creating or rendering a barcode.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeRequestBody {
    #[schema(example = "12345")]
    pub payload: String,
    #[schema(example = "CODE128")]
    pub symbology: String,
}

/// Persisted barcode returned to the caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeBody {
    #[schema(format = "uuid")]
    pub id: Uuid,
    pub payload: String,
    #[schema(example = "CODE128")]
    pub symbology: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<BarcodeRecord> for BarcodeBody {
    fn from(record: BarcodeRecord) -> Self {
        Self {
            id: record.id(),
            payload: record.payload().to_string(),
            symbology: record.symbology().to_string(),
            created_at: record.created_at().to_rfc3339(),
        }
    }
}

/// Query options for the image endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ImageQuery {
    /// Serve the image as an attachment download.
    #[serde(default)]
    pub download: bool,
}

fn parse_symbology(raw: &str) -> Result<Symbology, Error> {
    raw.parse().map_err(|err: crate::domain::BarcodeValidationError| {
        Error::invalid_payload(err.to_string()).with_details(json!({
            "field": "symbology",
            "value": raw,
        }))
    })
}

/// Save a barcode under the caller's account.
#[utoipa::path(
    post,
    path = "/api/v1/barcodes",
    request_body = BarcodeRequestBody,
    responses(
        (status = 201, description = "Barcode saved", body = BarcodeBody),
        (status = 400, description = "Invalid payload or symbology"),
        (status = 401, description = "Login required"),
        (status = 500, description = "Barcode store unavailable")
    ),
    tags = ["barcodes"],
    operation_id = "createBarcode"
)]
#[post("/barcodes")]
pub async fn create_barcode(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<BarcodeRequestBody>,
) -> ApiResult<HttpResponse> {
    let caller = session.user_id();
    let symbology = parse_symbology(&body.symbology)?;
    let record = state
        .barcodes
        .create(caller.as_ref(), &body.payload, symbology)
        .await?;
    Ok(HttpResponse::Created().json(BarcodeBody::from(record)))
}

/// List the caller's saved barcodes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/barcodes",
    responses(
        (status = 200, description = "Saved barcodes, newest first", body = [BarcodeBody]),
        (status = 500, description = "Barcode store unavailable")
    ),
    tags = ["barcodes"],
    operation_id = "listBarcodes"
)]
#[get("/barcodes")]
pub async fn list_barcodes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<BarcodeBody>>> {
    let caller = session.user_id();
    let records = state.barcodes.list(caller.as_ref()).await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}

/// Fetch one of the caller's barcodes.
#[utoipa::path(
    get,
    path = "/api/v1/barcodes/{id}",
    params(("id" = Uuid, Path, description = "Barcode record id")),
    responses(
        (status = 200, description = "Barcode record", body = BarcodeBody),
        (status = 404, description = "No such barcode for this caller")
    ),
    tags = ["barcodes"],
    operation_id = "getBarcode"
)]
#[get("/barcodes/{id}")]
pub async fn get_barcode(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BarcodeBody>> {
    let caller = session.user_id();
    let id = path.into_inner();
    let record = state.barcodes.view(caller.as_ref(), &id).await?;
    Ok(web::Json(record.into()))
}

/// Render one of the caller's barcodes as an image.
///
/// The stored payload and symbology are passed verbatim to the rendering
/// delegate, so repeated views reproduce an identical image.
#[utoipa::path(
    get,
    path = "/api/v1/barcodes/{id}/image",
    params(
        ("id" = Uuid, Path, description = "Barcode record id"),
        ("download" = Option<bool>, Query, description = "Serve as attachment")
    ),
    responses(
        (status = 200, description = "Rendered barcode image", content_type = "image/svg+xml"),
        (status = 404, description = "No such barcode for this caller"),
        (status = 500, description = "Rendering failed")
    ),
    tags = ["barcodes"],
    operation_id = "barcodeImage"
)]
#[get("/barcodes/{id}/image")]
pub async fn barcode_image(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    query: web::Query<ImageQuery>,
) -> ApiResult<HttpResponse> {
    let caller = session.user_id();
    let id = path.into_inner();
    let record = state.barcodes.view(caller.as_ref(), &id).await?;
    let rendered = state
        .renderer
        .render(record.payload(), record.symbology())
        .map_err(|err| Error::render_failure(err.to_string()))?;

    let mut response = HttpResponse::Ok();
    response.insert_header((header::CONTENT_TYPE, rendered.media_type));
    if query.download {
        response.insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"barcode-{}.svg\"", record.id()),
        ));
    }
    Ok(response.body(rendered.bytes))
}

/// Permanently delete one of the caller's barcodes.
#[utoipa::path(
    delete,
    path = "/api/v1/barcodes/{id}",
    params(("id" = Uuid, Path, description = "Barcode record id")),
    responses(
        (status = 204, description = "Barcode deleted"),
        (status = 404, description = "No such barcode for this caller"),
        (status = 500, description = "Barcode store unavailable")
    ),
    tags = ["barcodes"],
    operation_id = "deleteBarcode"
)]
#[delete("/barcodes/{id}")]
pub async fn delete_barcode(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let caller = session.user_id();
    let id = path.into_inner();
    state.barcodes.delete(caller.as_ref(), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Render a barcode without persisting it.
///
/// Backs the public generator screen: anonymous visitors can produce an
/// image, but nothing is saved.
#[utoipa::path(
    post,
    path = "/api/v1/render",
    request_body = BarcodeRequestBody,
    responses(
        (status = 200, description = "Rendered barcode image", content_type = "image/svg+xml"),
        (status = 400, description = "Invalid payload or symbology"),
        (status = 500, description = "Rendering failed")
    ),
    tags = ["barcodes"],
    operation_id = "renderBarcode"
)]
#[post("/render")]
pub async fn render_barcode(
    state: web::Data<HttpState>,
    body: web::Json<BarcodeRequestBody>,
) -> ApiResult<HttpResponse> {
    let symbology = parse_symbology(&body.symbology)?;
    let payload = BarcodePayload::new(body.payload.clone())
        .map_err(|err| Error::invalid_payload(err.to_string()))?;
    let rendered = state
        .renderer
        .render(&payload, symbology)
        .map_err(|err| Error::render_failure(err.to_string()))?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, rendered.media_type))
        .body(rendered.bytes))
}
