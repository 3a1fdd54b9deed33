use super::types::{request, response};
use crate::types::Context;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let id = payload.id;

    ctx.activos
        .update(id, payload.body)
        .await
        .map(response::Success::from)
        .map_err(|err| {
            tracing::error!("PATCH request api/v1/activo/{id}, error: {err}");
            response::Error
        })
}
