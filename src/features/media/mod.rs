pub mod pipeline;
mod service;
mod storage_client;

pub use service::ImagePipeline;
pub use storage_client::StorageClient;
