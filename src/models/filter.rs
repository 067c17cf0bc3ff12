use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::catalog;
use super::validation::{NumberValidator, StringValidator, ValidationError, Validator};

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "release_date.desc")]
    ReleaseDateDesc,
    #[serde(rename = "release_date.asc")]
    ReleaseDateAsc,
    #[serde(rename = "vote_average.desc")]
    VoteAverageDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::PopularityDesc,
        SortKey::ReleaseDateDesc,
        SortKey::ReleaseDateAsc,
        SortKey::VoteAverageDesc,
    ];

    /// API `sort_by` 参数值
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "popularity.desc",
            SortKey::ReleaseDateDesc => "release_date.desc",
            SortKey::ReleaseDateAsc => "release_date.asc",
            SortKey::VoteAverageDesc => "vote_average.desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::PopularityDesc => "Most Popular",
            SortKey::ReleaseDateDesc => "Newest",
            SortKey::ReleaseDateAsc => "Oldest",
            SortKey::VoteAverageDesc => "Highest Rated",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    /// 接受 API 原始值或简写（popular / newest / oldest / top）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popularity.desc" | "popular" => Ok(SortKey::PopularityDesc),
            "release_date.desc" | "newest" => Ok(SortKey::ReleaseDateDesc),
            "release_date.asc" | "oldest" => Ok(SortKey::ReleaseDateAsc),
            "vote_average.desc" | "top" => Ok(SortKey::VoteAverageDesc),
            _ => Err(ValidationError::InvalidSortKey(s.to_string())),
        }
    }
}

/// 最低评分档位，只有 0 / 5 / 7 / 8 四档
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RatingBucket {
    #[default]
    Any,
    FivePlus,
    SevenPlus,
    EightPlus,
}

impl RatingBucket {
    pub const ALL: [RatingBucket; 4] = [
        RatingBucket::Any,
        RatingBucket::FivePlus,
        RatingBucket::SevenPlus,
        RatingBucket::EightPlus,
    ];

    /// API `vote_average.gte` 参数值
    pub fn value(&self) -> u8 {
        match self {
            RatingBucket::Any => 0,
            RatingBucket::FivePlus => 5,
            RatingBucket::SevenPlus => 7,
            RatingBucket::EightPlus => 8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingBucket::Any => "All Ratings",
            RatingBucket::FivePlus => "5+",
            RatingBucket::SevenPlus => "7+",
            RatingBucket::EightPlus => "8+",
        }
    }
}

impl TryFrom<u8> for RatingBucket {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        RatingBucket::ALL
            .into_iter()
            .find(|bucket| bucket.value() == value)
            .ok_or_else(|| ValidationError::InvalidRating(value.to_string()))
    }
}

impl FromStr for RatingBucket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('+');
        let value: u8 = trimmed
            .parse()
            .map_err(|_| ValidationError::InvalidRating(s.to_string()))?;
        RatingBucket::try_from(value)
    }
}

/// ISO 639-1 语言代码
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        StringValidator::validate_language_code(&code)?;
        Ok(Self(code))
    }

    pub fn english() -> Self {
        Self("en".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LanguageCode::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 四位数发行年份
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReleaseYear(i32);

impl ReleaseYear {
    /// 解析年份，并要求其位于年份选项之内
    pub fn parse(input: &str, current_year: i32) -> Result<Self, ValidationError> {
        let year = StringValidator::validate_year(input.trim())?;
        let options = catalog::year_options(current_year);
        let newest = current_year;
        let oldest = options.last().copied().unwrap_or(current_year);
        if year < oldest || year > newest {
            return Err(ValidationError::YearOutOfRange { year, oldest, newest });
        }
        Ok(Self(year))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ReleaseYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 当前筛选状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: String,
    pub genre_id: Option<String>,
    pub min_rating: RatingBucket,
    pub release_year: Option<ReleaseYear>,
    pub sort_key: SortKey,
    pub language: LanguageCode,
    pub regional_language: Option<LanguageCode>,
    pub page: u32,
}

impl FilterState {
    pub fn with_language(language: LanguageCode) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }
}

impl Default for FilterState {
    /// 默认：英语、按热度降序、不限评分、第一页
    fn default() -> Self {
        Self {
            search_term: String::new(),
            genre_id: None,
            min_rating: RatingBucket::Any,
            release_year: None,
            sort_key: SortKey::PopularityDesc,
            language: LanguageCode::english(),
            regional_language: None,
            page: 1,
        }
    }
}

impl Validator for FilterState {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        NumberValidator::validate_page(self.page)?;
        StringValidator::validate_language_code(self.language.as_str())?;

        if let Some(ref genre_id) = self.genre_id {
            if catalog::genre_name(genre_id).is_none() {
                return Err(ValidationError::UnknownGenre(genre_id.clone()));
            }
        }

        Ok(())
    }
}
