//! Handlers for the `/gallery` resource (testimonials and work showcase).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use sagedo_core::error::CoreError;
use sagedo_core::types::DbId;
use sagedo_db::models::gallery::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};
use sagedo_db::repositories::GalleryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Accepted gallery kinds.
const GALLERY_KINDS: &[&str] = &["testimonial", "work_showcase"];

/// GET /api/v1/gallery
///
/// Publicly visible gallery entries, newest first.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<DataResponse<Vec<GalleryItem>>> {
    let items = GalleryRepo::list_visible(&state.pool).await?;
    Ok(DataResponse::new(items))
}

/// GET /api/v1/admin/gallery
///
/// Every entry including hidden ones.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<DataResponse<Vec<GalleryItem>>> {
    let items = GalleryRepo::list_all(&state.pool).await?;
    Ok(DataResponse::new(items))
}

/// POST /api/v1/admin/gallery
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateGalleryItem>,
) -> AppResult<(StatusCode, DataResponse<GalleryItem>)> {
    if !GALLERY_KINDS.contains(&input.kind.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "kind must be one of: {}",
            GALLERY_KINDS.join(", ")
        ))));
    }
    if input.rating.is_some_and(|r| !(1..=5).contains(&r)) {
        return Err(AppError::Core(CoreError::Validation(
            "rating must be 1-5".into(),
        )));
    }
    let item = GalleryRepo::create(&state.pool, &input).await?;
    Ok(DataResponse::created(item))
}

/// PATCH /api/v1/admin/gallery/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGalleryItem>,
) -> AppResult<DataResponse<GalleryItem>> {
    if input.rating.is_some_and(|r| !(1..=5).contains(&r)) {
        return Err(AppError::Core(CoreError::Validation(
            "rating must be 1-5".into(),
        )));
    }
    let item = GalleryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "gallery item",
            id,
        }))?;
    Ok(DataResponse::new(item))
}
