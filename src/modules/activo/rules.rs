use super::repository::Activo;
use chrono::NaiveDate;

pub const FECHA_COMPRA_FUTURA: &str = "La fecha de compra no puede ser futura";
pub const FECHA_BAJA_ANTERIOR: &str = "La fecha de baja no puede ser anterior a la fecha de compra";

/// Business checks that go beyond per-field validation.
pub fn check(activo: &Activo, today: NaiveDate) -> Result<(), &'static str> {
    if let Some(fecha_compra) = activo.fecha_compra {
        if fecha_compra > today {
            return Err(FECHA_COMPRA_FUTURA);
        }
    }

    if let (Some(fecha_compra), Some(fecha_baja)) = (activo.fecha_compra, activo.fecha_baja) {
        if fecha_baja < fecha_compra {
            return Err(FECHA_BAJA_ANTERIOR);
        }
    }

    Ok(())
}
