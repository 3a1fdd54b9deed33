use super::types::{request, response};
use crate::types::Context;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    ctx.activos
        .get_by_id(payload.id)
        .await
        .map(response::Success::from)
        .map_err(|err| {
            tracing::error!("GET request api/v1/activo/{}, error: {err}", payload.id);
            response::Error
        })
}
