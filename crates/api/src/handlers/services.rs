//! Handlers for the `/services` catalog resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use sagedo_core::error::CoreError;
use sagedo_core::types::DbId;
use sagedo_db::models::service::{CreateService, Service, UpdateService};
use sagedo_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/services
///
/// The full public catalog, ordered by category then name.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<DataResponse<Vec<Service>>> {
    let services = ServiceRepo::list(&state.pool).await?;
    Ok(DataResponse::new(services))
}

/// GET /api/v1/services/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<DataResponse<Service>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "service",
            id,
        }))?;
    Ok(DataResponse::new(service))
}

/// POST /api/v1/services/{id}/click
///
/// Record catalog interest for the popularity stats. Public, fire-and-forget.
pub async fn click(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if !ServiceRepo::increment_click(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "service",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/services
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, DataResponse<Service>)> {
    if input.price < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "price must not be negative".into(),
        )));
    }
    let service = ServiceRepo::create(&state.pool, &input).await?;
    Ok(DataResponse::created(service))
}

/// PATCH /api/v1/admin/services/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<DataResponse<Service>> {
    if input.price.is_some_and(|p| p < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "price must not be negative".into(),
        )));
    }
    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "service",
            id,
        }))?;
    Ok(DataResponse::new(service))
}

/// DELETE /api/v1/admin/services/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ServiceRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "service",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
