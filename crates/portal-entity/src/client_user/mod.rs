pub mod model;

pub use model::ClientUser;
