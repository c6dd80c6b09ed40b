use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};

use crate::{
    dto::{RecordDto, RecordRequest},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(list_records).post(create_record))
        .route("/records/{id}", put(update_record).delete(delete_record))
}

async fn list_records(State(state): State<AppState>) -> Json<Vec<RecordDto>> {
    let records = state.list_records.execute().await;
    Json(records.into_iter().map(RecordDto::from).collect())
}

async fn create_record(
    State(state): State<AppState>,
    body: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordDto>), ApiError> {
    let Json(req) = body.map_err(|_| ApiError::BadRequest("invalid JSON"))?;

    let record = state
        .create_record
        .execute(&req.domain, &req.record_type, &req.value)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RecordRequest>, JsonRejection>,
) -> Result<Json<RecordDto>, ApiError> {
    let id = parse_id(&id)?;
    let Json(req) = body.map_err(|_| ApiError::BadRequest("invalid JSON"))?;

    let record = state
        .update_record
        .execute(id, &req.domain, &req.record_type, &req.value)
        .await?;

    Ok(Json(record.into()))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.delete_record.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::BadRequest("invalid id"))
}
