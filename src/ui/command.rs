// 终端命令解析
//
// 每行一条命令，解析失败不会修改任何状态

use thiserror::Error;

use crate::models::{MovieId, RatingBucket, SortKey, ValidationError};

/// 命令解析错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help` for a list)")]
    Unknown(String),

    #[error("Missing argument for `{0}`")]
    MissingArgument(&'static str),

    #[error("Invalid movie id: {0}")]
    InvalidMovieId(String),

    #[error("Movie {0} is not in the current results")]
    MovieNotInResults(MovieId),

    #[error("Input is not valid UTF-8")]
    InvalidEncoding,

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// 用户命令
///
/// 年份与语言只做语法层面的解析，是否在可选范围内由 `Session` 判断。
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetTerm(String),
    Search(Option<String>),
    Genre(Option<String>),
    Rating(RatingBucket),
    Year(Option<String>),
    Sort(SortKey),
    Language(String),
    Region(Option<String>),
    Next,
    Previous,
    AddFavorite(MovieId),
    RemoveFavorite(MovieId),
    ShowInfo(MovieId),
    CloseInfo,
    ToggleTheme,
    Refresh,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let arg = if rest.is_empty() { None } else { Some(rest) };

        let command = match name.to_ascii_lowercase().as_str() {
            "term" => Command::SetTerm(rest.to_string()),
            "search" | "s" => Command::Search(arg.map(str::to_string)),
            "genre" => Command::Genre(optional(required(arg, "genre")?)),
            "rating" => Command::Rating(required(arg, "rating")?.parse()?),
            "year" => Command::Year(optional(required(arg, "year")?)),
            "sort" => Command::Sort(required(arg, "sort")?.parse()?),
            "lang" | "language" => Command::Language(required(arg, "lang")?.to_ascii_lowercase()),
            "region" => Command::Region(
                optional(required(arg, "region")?).map(|code| code.to_ascii_lowercase()),
            ),
            "next" | "n" => Command::Next,
            "prev" | "previous" | "p" => Command::Previous,
            "fav" => Command::AddFavorite(movie_id(required(arg, "fav")?)?),
            "unfav" => Command::RemoveFavorite(movie_id(required(arg, "unfav")?)?),
            "info" => Command::ShowInfo(movie_id(required(arg, "info")?)?),
            "close" => Command::CloseInfo,
            "theme" => Command::ToggleTheme,
            "refresh" => Command::Refresh,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn required<'a>(arg: Option<&'a str>, command: &'static str) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument(command))
}

/// `all` 表示清除该筛选项
fn optional(arg: &str) -> Option<String> {
    if arg.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(arg.to_string())
    }
}

fn movie_id(arg: &str) -> Result<MovieId, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidMovieId(arg.to_string()))
}
