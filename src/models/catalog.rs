// 筛选项目录
//
// 固定的类型、语言与年份选项，与 TMDB 的取值保持一致

use chrono::Datelike;

/// 电影类型（TMDB genre id 与显示名称）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Genre {
    pub id: &'static str,
    pub name: &'static str,
}

/// 语言选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub const GENRES: &[Genre] = &[
    Genre { id: "28", name: "Action" },
    Genre { id: "12", name: "Adventure" },
    Genre { id: "16", name: "Animation" },
    Genre { id: "35", name: "Comedy" },
    Genre { id: "80", name: "Crime" },
    Genre { id: "99", name: "Documentary" },
    Genre { id: "18", name: "Drama" },
    Genre { id: "10751", name: "Family" },
    Genre { id: "14", name: "Fantasy" },
    Genre { id: "36", name: "History" },
    Genre { id: "27", name: "Horror" },
    Genre { id: "10402", name: "Music" },
    Genre { id: "9648", name: "Mystery" },
    Genre { id: "10749", name: "Romance" },
    Genre { id: "878", name: "Science Fiction" },
    Genre { id: "10770", name: "TV Movie" },
    Genre { id: "53", name: "Thriller" },
    Genre { id: "10752", name: "War" },
    Genre { id: "37", name: "Western" },
];

/// 界面显示语言（传给 API 的 `language` 参数）
pub const DISPLAY_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "it", name: "Italian" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "zh", name: "Chinese" },
];

/// 原声语言筛选（传给 API 的 `with_original_language` 参数）
pub const REGIONAL_LANGUAGES: &[Language] = &[
    Language { code: "hi", name: "Hindi" },
    Language { code: "ta", name: "Tamil" },
    Language { code: "te", name: "Telugu" },
    Language { code: "ml", name: "Malayalam" },
    Language { code: "kn", name: "Kannada" },
    Language { code: "mr", name: "Marathi" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "pa", name: "Punjabi" },
    Language { code: "gu", name: "Gujarati" },
    Language { code: "or", name: "Odia" },
];

/// 年份选项数量
pub const YEAR_OPTION_COUNT: i32 = 50;

/// 以 `current_year` 结尾的 50 个年份，降序
pub fn year_options(current_year: i32) -> Vec<i32> {
    (0..YEAR_OPTION_COUNT).map(|offset| current_year - offset).collect()
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// 按 id 或名称（忽略大小写）查找类型
pub fn find_genre(input: &str) -> Option<&'static Genre> {
    let input = input.trim();
    GENRES
        .iter()
        .find(|genre| genre.id == input || genre.name.eq_ignore_ascii_case(input))
}

pub fn genre_name(id: &str) -> Option<&'static str> {
    GENRES.iter().find(|genre| genre.id == id).map(|genre| genre.name)
}

pub fn find_display_language(code: &str) -> Option<&'static Language> {
    DISPLAY_LANGUAGES.iter().find(|lang| lang.code == code)
}

pub fn find_regional_language(code: &str) -> Option<&'static Language> {
    REGIONAL_LANGUAGES.iter().find(|lang| lang.code == code)
}
