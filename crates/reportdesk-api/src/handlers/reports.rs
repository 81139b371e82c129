//! Report endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use reportdesk_core::error::AppError;
use reportdesk_core::types::RecordId;
use reportdesk_service::RecordForm;

use crate::dto::request::ListReportsQuery;
use crate::dto::response::{
    ApiResponse, MessageResponse, RecordView, ReportListResponse, ReportStateResponse,
};
use crate::error::ApiError;
use crate::extractors::RecordUpload;
use crate::state::AppState;

/// POST /api/reports
///
/// Responds `201` with the stored record and a `Location` pointing at the
/// list view.
pub async fn create_report(
    State(state): State<AppState>,
    upload: RecordUpload,
) -> Result<Response, ApiError> {
    let form = upload.to_new_form();
    let submission = state.form.submit(&form, upload.image.as_ref()).await?;
    state.reports.invalidate().await;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, submission.redirect_to)],
        Json(ApiResponse::ok(RecordView::from(&submission.record))),
    )
        .into_response())
}

/// GET /api/reports?sort=...&refresh=...
///
/// A `sort` parameter always reorders the loaded list, so it also places
/// records moved by an edit. Without one the current order is kept.
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ApiResponse<ReportListResponse>>, ApiError> {
    let sort = query.sort_key()?;
    let snapshot = state.reports.list(sort, query.refresh).await?;
    Ok(Json(ApiResponse::ok(ReportListResponse::from(
        snapshot.as_ref(),
    ))))
}

/// GET /api/reports/state
pub async fn report_state(
    State(state): State<AppState>,
) -> Json<ApiResponse<ReportStateResponse>> {
    let snapshot = state.reports.snapshot().await;
    Json(ApiResponse::ok(ReportStateResponse::from(snapshot.as_ref())))
}

/// PUT /api/reports/{id}
///
/// Fields that are not sent keep their current values and are not
/// revalidated; the stored document is then overwritten as a whole.
pub async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    upload: RecordUpload,
) -> Result<Json<ApiResponse<RecordView>>, ApiError> {
    let id = RecordId::new(id);
    let snapshot = state.reports.list(None, false).await?;
    let current = snapshot
        .find(&id)
        .ok_or_else(|| AppError::not_found(format!("Record '{id}' not found")))?;

    let mut form = RecordForm::from_fields(&current.fields());
    upload.apply_to(&mut form);
    let fields = form.to_edit_fields(&current.fields())?;

    let updated = state
        .reports
        .edit(&id, fields, upload.image.as_ref())
        .await?;
    Ok(Json(ApiResponse::ok(RecordView::from(&updated))))
}

/// DELETE /api/reports/{id}
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = RecordId::new(id);
    state.reports.delete(&id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Record '{id}' deleted"),
    })))
}
