pub mod activo;

mod router;
pub use router::get_router;
