use chrono::{NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::PgExecutor;
use std::{fmt, str::FromStr};
use validator::Validate;

#[derive(Serialize, Deserialize, Validate, sqlx::FromRow, Clone, Debug, Default, PartialEq)]
pub struct Activo {
    #[serde(skip_deserializing)]
    pub id: Option<i64>,
    #[validate(
        required(message = "El nombre es obligatorio"),
        length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres")
    )]
    pub nombre: Option<String>,
    #[validate(length(max = 500, message = "La descripción admite hasta 500 caracteres"))]
    pub descripcion: Option<String>,
    #[validate(length(max = 50, message = "El tipo admite hasta 50 caracteres"))]
    pub tipo: Option<String>,
    #[validate(length(max = 100, message = "El serial admite hasta 100 caracteres"))]
    pub serial: Option<String>,
    #[validate(length(max = 50, message = "El número de inventario admite hasta 50 caracteres"))]
    pub numero_inventario: Option<String>,
    #[validate(length(max = 30, message = "El estado admite hasta 30 caracteres"))]
    pub estado_actual: Option<String>,
    #[validate(length(max = 30, message = "El color admite hasta 30 caracteres"))]
    pub color: Option<String>,
    #[validate(range(min = 0.0, message = "El peso no puede ser negativo"))]
    pub peso: Option<f64>,
    #[validate(range(min = 0.0, message = "El alto no puede ser negativo"))]
    pub alto: Option<f64>,
    #[validate(range(min = 0.0, message = "El ancho no puede ser negativo"))]
    pub ancho: Option<f64>,
    #[validate(range(min = 0.0, message = "El largo no puede ser negativo"))]
    pub largo: Option<f64>,
    #[validate(
        required(message = "El valor es obligatorio"),
        range(min = 0.0, message = "El valor no puede ser negativo")
    )]
    pub valor: Option<f64>,
    pub fecha_compra: Option<NaiveDate>,
    pub fecha_baja: Option<NaiveDate>,
    #[serde(skip_deserializing)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_deserializing)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Activo {
    /// Overlays every field set in `patch` onto `self`.
    pub fn merge(self, patch: Activo) -> Activo {
        Activo {
            id: self.id,
            nombre: patch.nombre.or(self.nombre),
            descripcion: patch.descripcion.or(self.descripcion),
            tipo: patch.tipo.or(self.tipo),
            serial: patch.serial.or(self.serial),
            numero_inventario: patch.numero_inventario.or(self.numero_inventario),
            estado_actual: patch.estado_actual.or(self.estado_actual),
            color: patch.color.or(self.color),
            peso: patch.peso.or(self.peso),
            alto: patch.alto.or(self.alto),
            ancho: patch.ancho.or(self.ancho),
            largo: patch.largo.or(self.largo),
            valor: patch.valor.or(self.valor),
            fecha_compra: patch.fecha_compra.or(self.fecha_compra),
            fecha_baja: patch.fecha_baja.or(self.fecha_baja),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Reads a query value, treating a blank one (`?valor_min=`) as absent.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map(Some).map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Criterios {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub serial: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub numero_inventario: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub estado_actual: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub fecha_compra_desde: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub fecha_compra_hasta: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub valor_min: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub valor_max: Option<f64>,
}

impl Criterios {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.tipo.is_none()
            && self.serial.is_none()
            && self.numero_inventario.is_none()
            && self.estado_actual.is_none()
            && self.fecha_compra_desde.is_none()
            && self.fecha_compra_hasta.is_none()
            && self.valor_min.is_none()
            && self.valor_max.is_none()
    }
}

/// Escapes `ILIKE` metacharacters so `value` matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub async fn find_all<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<Activo>, sqlx::Error> {
    sqlx::query_as::<_, Activo>("SELECT * FROM activos ORDER BY id")
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch all activos: {}", err);
            err
        })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: i64) -> Result<Option<Activo>, sqlx::Error> {
    sqlx::query_as::<_, Activo>("SELECT * FROM activos WHERE id = $1")
        .bind(id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching activo with id {}: {}", id, err);
            err
        })
}

pub async fn find_many<'e, E: PgExecutor<'e>>(
    e: E,
    criterios: Criterios,
) -> Result<Vec<Activo>, sqlx::Error> {
    sqlx::query_as::<_, Activo>(
        "
        SELECT *
        FROM activos
        WHERE
            ($1::text IS NULL OR nombre ILIKE CONCAT('%', $1, '%') ESCAPE '\\')
            AND ($2::text IS NULL OR tipo = $2)
            AND ($3::text IS NULL OR serial = $3)
            AND ($4::text IS NULL OR numero_inventario = $4)
            AND ($5::text IS NULL OR estado_actual = $5)
            AND ($6::date IS NULL OR fecha_compra >= $6)
            AND ($7::date IS NULL OR fecha_compra <= $7)
            AND ($8::float8 IS NULL OR valor >= $8)
            AND ($9::float8 IS NULL OR valor <= $9)
        ORDER BY id
        ",
    )
    .bind(criterios.nombre.as_deref().map(escape_like))
    .bind(criterios.tipo)
    .bind(criterios.serial)
    .bind(criterios.numero_inventario)
    .bind(criterios.estado_actual)
    .bind(criterios.fecha_compra_desde)
    .bind(criterios.fecha_compra_hasta)
    .bind(criterios.valor_min)
    .bind(criterios.valor_max)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to search activos: {}", err);
        err
    })
}

/// Whether another activo already uses `serial` or `numero_inventario`.
pub async fn exists_duplicate<'e, E: PgExecutor<'e>>(
    e: E,
    serial: Option<&str>,
    numero_inventario: Option<&str>,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "
        SELECT EXISTS (
            SELECT 1
            FROM activos
            WHERE
                (serial = $1 OR numero_inventario = $2)
                AND ($3::bigint IS NULL OR id <> $3)
        )
        ",
    )
    .bind(serial)
    .bind(numero_inventario)
    .bind(exclude_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while checking for duplicate activos: {}", err);
        err
    })
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: Activo) -> Result<Activo, sqlx::Error> {
    sqlx::query_as::<_, Activo>(
        "
        INSERT INTO activos
        (nombre, descripcion, tipo, serial, numero_inventario, estado_actual, color,
         peso, alto, ancho, largo, valor, fecha_compra, fecha_baja)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        ",
    )
    .bind(payload.nombre)
    .bind(payload.descripcion)
    .bind(payload.tipo)
    .bind(payload.serial)
    .bind(payload.numero_inventario)
    .bind(payload.estado_actual)
    .bind(payload.color)
    .bind(payload.peso)
    .bind(payload.alto)
    .bind(payload.ancho)
    .bind(payload.largo)
    .bind(payload.valor)
    .bind(payload.fecha_compra)
    .bind(payload.fecha_baja)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create an activo: {}", err);
        err
    })
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: i64,
    payload: Activo,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "
        UPDATE activos SET
            nombre = COALESCE($1, nombre),
            descripcion = COALESCE($2, descripcion),
            tipo = COALESCE($3, tipo),
            serial = COALESCE($4, serial),
            numero_inventario = COALESCE($5, numero_inventario),
            estado_actual = COALESCE($6, estado_actual),
            color = COALESCE($7, color),
            peso = COALESCE($8, peso),
            alto = COALESCE($9, alto),
            ancho = COALESCE($10, ancho),
            largo = COALESCE($11, largo),
            valor = COALESCE($12, valor),
            fecha_compra = COALESCE($13, fecha_compra),
            fecha_baja = COALESCE($14, fecha_baja),
            updated_at = NOW()
        WHERE
            id = $15
        ",
    )
    .bind(payload.nombre)
    .bind(payload.descripcion)
    .bind(payload.tipo)
    .bind(payload.serial)
    .bind(payload.numero_inventario)
    .bind(payload.estado_actual)
    .bind(payload.color)
    .bind(payload.peso)
    .bind(payload.alto)
    .bind(payload.ancho)
    .bind(payload.largo)
    .bind(payload.valor)
    .bind(payload.fecha_compra)
    .bind(payload.fecha_baja)
    .bind(id)
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update an activo by id {}: {}",
            id,
            err
        );
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> Activo {
        Activo {
            id: Some(7),
            nombre: Some("Laptop".to_string()),
            serial: Some("SN-1".to_string()),
            valor: Some(1200.0),
            ..Default::default()
        }
    }

    #[test]
    fn merge_keeps_unset_fields_and_identity() {
        let merged = laptop().merge(Activo {
            id: Some(99),
            valor: Some(900.0),
            color: Some("gris".to_string()),
            ..Default::default()
        });

        assert_eq!(merged.id, Some(7));
        assert_eq!(merged.nombre.as_deref(), Some("Laptop"));
        assert_eq!(merged.serial.as_deref(), Some("SN-1"));
        assert_eq!(merged.valor, Some(900.0));
        assert_eq!(merged.color.as_deref(), Some("gris"));
    }

    #[test]
    fn minimal_record_is_valid() {
        let activo: Activo = serde_json::from_str(r#"{"nombre":"Laptop","valor":1200}"#).unwrap();
        assert!(activo.validate().is_ok());
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let errors = Activo::default().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("nombre"));
        assert!(fields.contains_key("valor"));
    }

    #[test]
    fn bounds_are_enforced() {
        let activo = Activo {
            nombre: Some(String::new()),
            valor: Some(-1.0),
            peso: Some(-0.5),
            color: Some("x".repeat(31)),
            ..Default::default()
        };
        let errors = activo.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["nombre", "valor", "peso", "color"] {
            assert!(fields.contains_key(field), "{field} should be rejected");
        }
    }

    #[test]
    fn server_managed_fields_are_not_read_from_input() {
        let activo: Activo = serde_json::from_str(
            r#"{"id":5,"nombre":"Silla","valor":10,"created_at":"2024-01-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(activo.id, None);
        assert_eq!(activo.created_at, None);
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("laptop"), "laptop");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\tmp"), "c:\\\\tmp");
    }

    #[test]
    fn blank_criteria_are_absent() {
        let criterios: Criterios = serde_json::from_value(serde_json::json!({
            "nombre": "",
            "valor_min": "",
            "fecha_compra_desde": "  ",
        }))
        .unwrap();
        assert!(criterios.is_empty());
    }

    #[test]
    fn criteria_values_are_parsed() {
        let criterios: Criterios = serde_json::from_value(serde_json::json!({
            "valor_min": "10.5",
            "fecha_compra_hasta": "2024-03-01",
        }))
        .unwrap();
        assert_eq!(criterios.valor_min, Some(10.5));
        assert_eq!(
            criterios.fecha_compra_hasta,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn unparsable_criteria_are_errors() {
        let result = serde_json::from_value::<Criterios>(serde_json::json!({ "valor_max": "mucho" }));
        assert!(result.is_err());
    }

    #[test]
    fn criteria_emptiness() {
        assert!(Criterios::default().is_empty());
        assert!(!Criterios {
            valor_max: Some(10.0),
            ..Default::default()
        }
        .is_empty());
    }
}
