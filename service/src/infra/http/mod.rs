//! HTTP collaborator clients.

pub mod extract;
pub mod storage;

pub use self::{extract::Extractor, storage::Storage};
