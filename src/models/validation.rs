use thiserror::Error;

/// 验证错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid language code: {0} (must be ISO 639-1 format)")]
    InvalidLanguageCode(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid year: {0} (must be a 4-digit year)")]
    InvalidYear(String),

    #[error("Year {year} is outside the selectable range {oldest}-{newest}")]
    YearOutOfRange { year: i32, oldest: i32, newest: i32 },

    #[error("Invalid rating: {0} (must be one of 0, 5, 7, 8)")]
    InvalidRating(String),

    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    #[error("Invalid page: {0} (must be 1 or greater)")]
    InvalidPage(u32),
}

/// 验证器trait
pub trait Validator {
    type Error;

    fn validate(&self) -> Result<(), Self::Error>;
}

/// 字符串验证工具
pub struct StringValidator;

impl StringValidator {
    /// ISO 639-1：两个小写 ASCII 字母
    pub fn validate_language_code(code: &str) -> Result<(), ValidationError> {
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::InvalidLanguageCode(code.to_string()));
        }
        Ok(())
    }

    pub fn validate_year(year: &str) -> Result<i32, ValidationError> {
        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidYear(year.to_string()));
        }
        year.parse()
            .map_err(|_| ValidationError::InvalidYear(year.to_string()))
    }
}

/// 数值验证工具
pub struct NumberValidator;

impl NumberValidator {
    pub fn validate_page(page: u32) -> Result<(), ValidationError> {
        if page == 0 {
            return Err(ValidationError::InvalidPage(page));
        }
        Ok(())
    }
}
