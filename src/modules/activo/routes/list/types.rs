pub mod response {
    use crate::{modules::activo::repository::Activo, utils::response::Presence};

    pub use crate::utils::response::Failure as Error;

    pub type Success = Presence<Vec<Activo>>;

    pub type Response = Result<Success, Error>;
}
