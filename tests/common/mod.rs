use async_trait::async_trait;
use atenea_backend_rs::{
    app,
    modules::activo::{
        repository::{Activo, Criterios},
        service::{ActivoService, Error, Transaccion},
    },
    types::{AppContext, AppEnvironment, Context},
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory stand-in for the asset service.
///
/// Reads are answered from `activos`, or fail when `fail_reads` is set;
/// writes answer with `transaccion`, or fail when it is `None`. With
/// `panic_on_write` writes panic instead. Every write records what it was
/// given.
#[derive(Default)]
pub struct StubActivos {
    pub activos: Vec<Activo>,
    pub transaccion: Option<Transaccion>,
    pub fail_reads: bool,
    pub panic_on_write: bool,
    pub created: Mutex<Vec<(Activo, bool)>>,
    pub updated: Mutex<Vec<(i64, Activo)>>,
}

impl StubActivos {
    pub fn with(activos: Vec<Activo>) -> Self {
        Self {
            activos,
            ..Default::default()
        }
    }

    pub fn answering(transaccion: Transaccion) -> Self {
        Self {
            transaccion: Some(transaccion),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Default::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic_on_write: true,
            ..Default::default()
        }
    }

    fn read_guard(&self) -> Result<(), Error> {
        if self.fail_reads {
            Err(Error::Unexpected("relation \"activos\" does not exist".to_string()))
        } else {
            Ok(())
        }
    }

    fn answer(&self) -> Result<Transaccion, Error> {
        if self.panic_on_write {
            panic!("boom in collaborator");
        }

        self.transaccion
            .clone()
            .ok_or_else(|| Error::Unexpected("connection reset by peer".to_string()))
    }
}

#[async_trait]
impl ActivoService for StubActivos {
    async fn list(&self) -> Result<Option<Vec<Activo>>, Error> {
        self.read_guard()?;
        Ok(if self.activos.is_empty() {
            None
        } else {
            Some(self.activos.clone())
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Activo>, Error> {
        self.read_guard()?;
        Ok(self.activos.iter().find(|a| a.id == Some(id)).cloned())
    }

    async fn search(&self, criterios: Criterios) -> Result<Option<Vec<Activo>>, Error> {
        self.read_guard()?;
        if criterios.is_empty() {
            return self.list().await;
        }

        let nombre = criterios.nombre.unwrap_or_default().to_lowercase();
        Ok(Some(
            self.activos
                .iter()
                .filter(|a| {
                    a.nombre
                        .as_deref()
                        .map(|n| n.to_lowercase().contains(&nombre))
                        .unwrap_or(false)
                })
                .cloned()
                .collect(),
        ))
    }

    async fn create(
        &self,
        activo: Activo,
        validation: Result<(), validator::ValidationErrors>,
    ) -> Result<Transaccion, Error> {
        self.created
            .lock()
            .unwrap()
            .push((activo, validation.is_ok()));
        self.answer()
    }

    async fn update(&self, id: i64, activo: Activo) -> Result<Transaccion, Error> {
        self.updated.lock().unwrap().push((id, activo));
        self.answer()
    }
}

pub fn build_test_app(stub: Arc<StubActivos>) -> Router {
    let ctx = Context {
        app: AppContext {
            host: "127.0.0.1".to_string(),
            environment: AppEnvironment::Development,
            port: 0,
        },
        activos: stub,
    };

    app::router(Arc::new(ctx))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn with_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn activo(id: i64, nombre: &str, valor: f64) -> Activo {
    Activo {
        id: Some(id),
        nombre: Some(nombre.to_string()),
        valor: Some(valor),
        ..Default::default()
    }
}
