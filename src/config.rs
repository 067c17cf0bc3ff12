// 运行配置
//
// 从 `.env` 与环境变量读取：
// - TMDB_API_KEY（必填）
// - TMDB_BASE_URL / TMDB_IMAGE_BASE_URL
// - TMDB_LANGUAGE（默认 en）
// - TMDB_TIMEOUT_SECS（可选）
// - RESET_PAGE_ON_FILTER_CHANGE（默认 true）

use std::time::Duration;
use thiserror::Error;

use crate::external::tmdb::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
use crate::models::{catalog, LanguageCode};
use crate::services::PagePolicy;

/// 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// TMDB 连接配置
#[derive(Debug, Clone, PartialEq)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub timeout: Option<Duration>,
}

/// 应用配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub language: LanguageCode,
    pub page_policy: PagePolicy,
}

impl AppConfig {
    /// 从进程环境读取（调用方负责先加载 `.env`）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("TMDB_API_KEY").ok_or(ConfigError::Missing("TMDB_API_KEY"))?;
        let base_url = get("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let image_base_url =
            get("TMDB_IMAGE_BASE_URL").unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string());

        let urls = [("TMDB_BASE_URL", &base_url), ("TMDB_IMAGE_BASE_URL", &image_base_url)];
        for (key, value) in urls {
            if let Err(e) = url::Url::parse(value) {
                return Err(ConfigError::Invalid {
                    key,
                    value: value.clone(),
                    reason: e.to_string(),
                });
            }
        }

        let language = match get("TMDB_LANGUAGE") {
            Some(code) => {
                if catalog::find_display_language(&code).is_none() {
                    return Err(ConfigError::Invalid {
                        key: "TMDB_LANGUAGE",
                        value: code,
                        reason: "not a supported display language".to_string(),
                    });
                }
                LanguageCode::new(code.clone()).map_err(|e| ConfigError::Invalid {
                    key: "TMDB_LANGUAGE",
                    value: code,
                    reason: e.to_string(),
                })?
            }
            None => LanguageCode::english(),
        };

        let timeout = match get("TMDB_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    key: "TMDB_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: "expected a whole number of seconds".to_string(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        // 布尔值不区分大小写
        let reset = get("RESET_PAGE_ON_FILTER_CHANGE");
        let page_policy = match reset.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("true") | Some("1") => PagePolicy::ResetToFirst,
            Some("false") | Some("0") => PagePolicy::Keep,
            Some(_) => {
                return Err(ConfigError::Invalid {
                    key: "RESET_PAGE_ON_FILTER_CHANGE",
                    value: reset.unwrap_or_default(),
                    reason: "expected true or false".to_string(),
                })
            }
        };

        Ok(Self {
            tmdb: TmdbConfig {
                api_key,
                base_url,
                image_base_url,
                timeout,
            },
            language,
            page_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("TMDB_API_KEY", "abc")])).unwrap();

        assert_eq!(config.tmdb.api_key, "abc");
        assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tmdb.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(config.tmdb.timeout, None);
        assert_eq!(config.language.as_str(), "en");
        assert_eq!(config.page_policy, PagePolicy::ResetToFirst);
    }

    #[test]
    fn test_missing_api_key() {
        assert_eq!(
            AppConfig::from_lookup(lookup_from(&[])),
            Err(ConfigError::Missing("TMDB_API_KEY"))
        );
        assert_eq!(
            AppConfig::from_lookup(lookup_from(&[("TMDB_API_KEY", "  ")])),
            Err(ConfigError::Missing("TMDB_API_KEY"))
        );
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "abc"),
            ("TMDB_BASE_URL", "http://localhost:8080/3"),
            ("TMDB_LANGUAGE", "fr"),
            ("TMDB_TIMEOUT_SECS", "10"),
            ("RESET_PAGE_ON_FILTER_CHANGE", "false"),
        ]))
        .unwrap();

        assert_eq!(config.tmdb.base_url, "http://localhost:8080/3");
        assert_eq!(config.language.as_str(), "fr");
        assert_eq!(config.tmdb.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.page_policy, PagePolicy::Keep);
    }

    #[test]
    fn test_page_policy_ignores_case() {
        let policy = |value: &str| {
            AppConfig::from_lookup(lookup_from(&[
                ("TMDB_API_KEY", "abc"),
                ("RESET_PAGE_ON_FILTER_CHANGE", value),
            ]))
            .map(|config| config.page_policy)
        };

        assert_eq!(policy("TRUE"), Ok(PagePolicy::ResetToFirst));
        assert_eq!(policy("True"), Ok(PagePolicy::ResetToFirst));
        assert_eq!(policy("False"), Ok(PagePolicy::Keep));
        assert_eq!(policy(" FALSE "), Ok(PagePolicy::Keep));
        assert_eq!(
            policy("Nope"),
            Err(ConfigError::Invalid {
                key: "RESET_PAGE_ON_FILTER_CHANGE",
                value: "Nope".to_string(),
                reason: "expected true or false".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "abc"),
            ("TMDB_LANGUAGE", "hi"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TMDB_LANGUAGE", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "abc"),
            ("TMDB_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TMDB_TIMEOUT_SECS", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "abc"),
            ("TMDB_BASE_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TMDB_BASE_URL", .. }));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "abc"),
            ("RESET_PAGE_ON_FILTER_CHANGE", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "RESET_PAGE_ON_FILTER_CHANGE", .. }
        ));
    }
}
