use super::service::service;
use super::types::request;
use crate::types::Context;
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Path(id): Path<i64>,
    Json(body): Json<request::Body>,
) -> impl IntoResponse {
    tracing::info!("PATCH request api/v1/activo/{id} : {body:?}");
    service(ctx, request::Payload { id, body }).await
}
