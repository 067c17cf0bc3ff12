pub mod error;
pub mod request;
pub mod tmdb;

use async_trait::async_trait;

pub use error::TmdbError;
pub use request::{Endpoint, RequestDescriptor};
pub use tmdb::{TmdbClient, TmdbPageResponse};

/// 电影数据源
///
/// 执行一个请求描述并返回分页结果。`TmdbClient` 是唯一的生产实现，
/// 测试中用内存实现替代。
#[async_trait]
pub trait MovieProvider: Send + Sync {
    async fn fetch_page(&self, request: &RequestDescriptor) -> Result<TmdbPageResponse, TmdbError>;
}
