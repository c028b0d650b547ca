pub mod chat_api;
pub mod host_api;
pub mod media_api;
pub mod meeting_api;

pub use chat_api::FileUpload;
