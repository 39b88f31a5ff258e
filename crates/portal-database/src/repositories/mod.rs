//! Repository implementations for portal entities.

pub mod client;
pub mod client_user;
pub mod document;

pub use client::ClientRepository;
pub use client_user::ClientUserRepository;
pub use document::DocumentRepository;
