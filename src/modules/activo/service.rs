use super::{
    repository::{self, Activo, Criterios},
    rules,
};
use crate::utils::{database::DatabaseConnection, response::Outcome, validation};
use async_trait::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

pub const DUPLICADO: &str = "duplicate";
pub const NO_VALIDO: &str = "Los datos del activo no son válidos";
pub const NO_ENCONTRADO: &str = "Activo no encontrado";
pub const CREADO: &str = "Activo creado";
pub const ACTUALIZADO: &str = "Activo actualizado";

/// Result of a write. `estado` tells the caller whether the write happened.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Transaccion {
    pub estado: bool,
    pub mensaje: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errores: Option<serde_json::Value>,
}

impl Transaccion {
    pub fn exitosa(mensaje: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            estado: true,
            mensaje: mensaje.into(),
            id,
            errores: None,
        }
    }

    pub fn rechazada(mensaje: impl Into<String>) -> Self {
        Self {
            estado: false,
            mensaje: mensaje.into(),
            id: None,
            errores: None,
        }
    }

    pub fn invalida(errors: &ValidationErrors) -> Self {
        Self {
            errores: Some(validation::into_details(errors)),
            ..Self::rechazada(NO_VALIDO)
        }
    }
}

impl Outcome for Transaccion {
    fn succeeded(&self) -> bool {
        self.estado
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Unexpected(String),
}

#[async_trait]
pub trait ActivoService: Send + Sync {
    /// Every activo, or `None` when there is nothing stored.
    async fn list(&self) -> Result<Option<Vec<Activo>>, Error>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Activo>, Error>;

    async fn search(&self, criterios: Criterios) -> Result<Option<Vec<Activo>>, Error>;

    /// `validation` is the outcome of the structural checks run on `activo`
    /// before the call; implementations decide what a failure means.
    async fn create(
        &self,
        activo: Activo,
        validation: Result<(), ValidationErrors>,
    ) -> Result<Transaccion, Error>;

    async fn update(&self, id: i64, activo: Activo) -> Result<Transaccion, Error>;
}

pub struct PgActivoService {
    db_conn: DatabaseConnection,
}

impl PgActivoService {
    pub fn new(db_conn: DatabaseConnection) -> Self {
        Self { db_conn }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|err| err.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl ActivoService for PgActivoService {
    async fn list(&self) -> Result<Option<Vec<Activo>>, Error> {
        let activos = repository::find_all(&self.db_conn.pool).await?;
        Ok(if activos.is_empty() { None } else { Some(activos) })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Activo>, Error> {
        Ok(repository::find_by_id(&self.db_conn.pool, id).await?)
    }

    async fn search(&self, criterios: Criterios) -> Result<Option<Vec<Activo>>, Error> {
        if criterios.is_empty() {
            return self.list().await;
        }

        Ok(Some(repository::find_many(&self.db_conn.pool, criterios).await?))
    }

    async fn create(
        &self,
        activo: Activo,
        validation: Result<(), ValidationErrors>,
    ) -> Result<Transaccion, Error> {
        if let Err(errors) = validation {
            return Ok(Transaccion::invalida(&errors));
        }

        if let Err(mensaje) = rules::check(&activo, Local::now().date_naive()) {
            return Ok(Transaccion::rechazada(mensaje));
        }

        if repository::exists_duplicate(
            &self.db_conn.pool,
            activo.serial.as_deref(),
            activo.numero_inventario.as_deref(),
            None,
        )
        .await?
        {
            return Ok(Transaccion::rechazada(DUPLICADO));
        }

        match repository::create(&self.db_conn.pool, activo).await {
            Ok(activo) => {
                tracing::info!("Activo {:?} created", activo.id);
                Ok(Transaccion::exitosa(CREADO, activo.id))
            }
            Err(err) if is_unique_violation(&err) => Ok(Transaccion::rechazada(DUPLICADO)),
            Err(err) => Err(err.into()),
        }
    }

    async fn update(&self, id: i64, activo: Activo) -> Result<Transaccion, Error> {
        let current = match repository::find_by_id(&self.db_conn.pool, id).await? {
            Some(current) => current,
            None => return Ok(Transaccion::rechazada(NO_ENCONTRADO)),
        };

        let merged = current.merge(activo.clone());

        if let Err(errors) = merged.validate() {
            tracing::warn!("Rejected update for activo {id}: {errors}");
            return Ok(Transaccion::invalida(&errors));
        }

        if let Err(mensaje) = rules::check(&merged, Local::now().date_naive()) {
            return Ok(Transaccion::rechazada(mensaje));
        }

        if (activo.serial.is_some() || activo.numero_inventario.is_some())
            && repository::exists_duplicate(
                &self.db_conn.pool,
                activo.serial.as_deref(),
                activo.numero_inventario.as_deref(),
                Some(id),
            )
            .await?
        {
            return Ok(Transaccion::rechazada(DUPLICADO));
        }

        match repository::update_by_id(&self.db_conn.pool, id, activo).await {
            Ok(()) => Ok(Transaccion::exitosa(ACTUALIZADO, Some(id))),
            Err(err) if is_unique_violation(&err) => Ok(Transaccion::rechazada(DUPLICADO)),
            Err(err) => Err(err.into()),
        }
    }
}
