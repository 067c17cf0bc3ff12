use serde::{Deserialize, Deserializer, Serialize};

/// 海报尺寸
pub const POSTER_SIZE: &str = "w200";

/// 无海报时使用的本地占位图
pub const PLACEHOLDER_POSTER: &str = "placeholder.jpg";

pub type MovieId = u64;

/// 电影基本信息（来自 TMDB，只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl Movie {
    /// 构建海报 URL：`<cdn-base>/w200<poster_path>`，没有海报时返回占位图
    pub fn poster_url(&self, image_base_url: &str) -> String {
        match self.poster_path.as_deref() {
            Some(path) if !path.is_empty() => {
                let base = image_base_url.trim_end_matches('/');
                if path.starts_with('/') {
                    format!("{}/{}{}", base, POSTER_SIZE, path)
                } else {
                    format!("{}/{}/{}", base, POSTER_SIZE, path)
                }
            }
            _ => PLACEHOLDER_POSTER.to_string(),
        }
    }
}

/// 一页结果，每次成功请求后整体替换
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub movies: Vec<Movie>,
    pub total_pages: u32,
}

impl ResultPage {
    pub fn new(movies: Vec<Movie>, total_pages: u32) -> Self {
        Self {
            movies,
            total_pages: total_pages.max(1),
        }
    }

    pub fn find(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == id)
    }
}

impl Default for ResultPage {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            total_pages: 1,
        }
    }
}

/// TMDB 的可选字段经常是 `null`，统一按默认值处理
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
