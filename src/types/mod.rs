//! Core data types shared across the service

pub mod content;
pub mod request;
pub mod response;

pub use content::{DataType, NormalizedContent};
pub use request::AskRequest;
pub use response::{Answer, Service, UploadResponse};
