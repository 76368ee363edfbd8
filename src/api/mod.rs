// Network side of the pipeline: HTTP port, response mapping, remote loader

pub mod client;
mod mapper;
pub mod remote_loader;

pub use client::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use remote_loader::RemoteFeedLoader;
