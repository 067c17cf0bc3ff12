use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::TmdbError;
use super::request::RequestDescriptor;
use super::MovieProvider;
use crate::config::TmdbConfig;
use crate::models::movie::null_as_default;
use crate::models::{Movie, ResultPage};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// TMDB API客户端
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    /// 根据配置创建客户端（可选超时）
    pub fn from_config(config: &TmdbConfig) -> Result<Self, TmdbError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 构建完整请求 URL，`api_key` 位于首位
    pub fn build_url(&self, request: &RequestDescriptor) -> Result<Url, TmdbError> {
        let url = format!("{}{}", self.base_url, request.endpoint.path());
        let params = std::iter::once(("api_key", self.api_key.as_str()))
            .chain(request.params.iter().map(|(key, value)| (*key, value.as_str())));
        Ok(Url::parse_with_params(&url, params)?)
    }

    /// 执行一次 GET 并解析分页响应
    pub async fn get_page(
        &self,
        request: &RequestDescriptor,
    ) -> Result<TmdbPageResponse, TmdbError> {
        let url = self.build_url(request)?;
        tracing::debug!("GET {}{}", self.base_url, request.endpoint.path());

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TmdbError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let page: TmdbPageResponse = serde_json::from_str(&body)?;
        Ok(page)
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    async fn fetch_page(&self, request: &RequestDescriptor) -> Result<TmdbPageResponse, TmdbError> {
        self.get_page(request).await
    }
}

/// TMDB 分页响应（discover 与 search 共用）
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TmdbPageResponse {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: Option<u32>,
}

impl From<TmdbPageResponse> for ResultPage {
    fn from(response: TmdbPageResponse) -> Self {
        ResultPage::new(response.results, response.total_pages)
    }
}
