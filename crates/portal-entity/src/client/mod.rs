pub mod model;

pub use model::{Client, CreateClient};
