use super::types::response;
use crate::types::Context;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    ctx.activos
        .list()
        .await
        .map(response::Success::from)
        .map_err(|err| {
            tracing::error!("GET request api/v1/activo, error: {err}");
            response::Error
        })
}
