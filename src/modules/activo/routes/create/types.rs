pub mod request {
    pub use crate::modules::activo::repository::Activo as Payload;
}

pub mod response {
    use crate::{modules::activo::service::Transaccion, utils::response::Verdict};

    pub use crate::utils::response::Failure as Error;

    pub type Success = Verdict<Transaccion>;

    pub type Response = Result<Success, Error>;
}
