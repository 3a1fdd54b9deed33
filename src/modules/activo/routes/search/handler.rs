use super::service::service;
use super::types::request;
use crate::types::Context;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Query(criterios): Query<request::Criterios>,
) -> impl IntoResponse {
    tracing::info!("GET request api/v1/activo/search : {criterios:?}");
    service(ctx, request::Payload { criterios }).await
}
