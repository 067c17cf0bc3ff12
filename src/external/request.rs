// 请求描述
//
// 由筛选状态推导出要请求的端点与查询参数，与网络传输分离

use url::form_urlencoded;

use crate::models::FilterState;

/// TMDB 端点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Discover,
    Search,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Discover => "/discover/movie",
            Endpoint::Search => "/search/movie",
        }
    }
}

/// 一次请求的端点与参数（不含 api_key）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub endpoint: Endpoint,
    pub params: Vec<(&'static str, String)>,
}

impl RequestDescriptor {
    /// discover 请求；未设置的筛选项以空值发送
    pub fn discover(filters: &FilterState) -> Self {
        let params = vec![
            ("language", filters.language.to_string()),
            ("sort_by", filters.sort_key.as_str().to_string()),
            ("include_adult", "false".to_string()),
            ("vote_average.gte", filters.min_rating.value().to_string()),
            ("with_genres", filters.genre_id.clone().unwrap_or_default()),
            (
                "primary_release_year",
                filters
                    .release_year
                    .map(|year| year.to_string())
                    .unwrap_or_default(),
            ),
            (
                "with_original_language",
                filters
                    .regional_language
                    .as_ref()
                    .map(|lang| lang.to_string())
                    .unwrap_or_default(),
            ),
            ("page", filters.page.to_string()),
        ];

        Self {
            endpoint: Endpoint::Discover,
            params,
        }
    }

    /// search 请求；只带检索词、语言和页码，其余筛选项不参与
    pub fn search(filters: &FilterState, term: &str) -> Self {
        let params = vec![
            ("query", term.to_string()),
            ("language", filters.language.to_string()),
            ("page", filters.page.to_string()),
        ];

        Self {
            endpoint: Endpoint::Search,
            params,
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn page(&self) -> Option<u32> {
        self.param("page").and_then(|page| page.parse().ok())
    }

    /// 按参数顺序编码的查询串
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(key, value)| (*key, value.as_str())))
            .finish()
    }
}
