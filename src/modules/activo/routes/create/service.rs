use super::types::{request, response};
use crate::types::Context;
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let validation = payload.validate();
    if let Err(errors) = &validation {
        tracing::warn!("Failed to validate payload: {errors}");
    }

    ctx.activos
        .create(payload, validation)
        .await
        .map(response::Success::from)
        .map_err(|err| {
            tracing::error!("POST request api/v1/activo, error: {err}");
            response::Error
        })
}
