// 终端渲染
//
// 纯函数：只读取会话状态并输出文本

use std::fmt::Write;

use crate::models::catalog;

use super::app::{Session, Theme};

pub const LOADING_TEXT: &str = "Loading movies...";

pub const HELP_TEXT: &str = "\
Commands:
  term <text>                 set the search term
  search [text]               search by title (uses the current page)
  genre <id|name|all>         filter by genre
  rating <0|5|7|8>            minimum rating
  year <yyyy|all>             release year
  sort <popular|newest|oldest|top>
  lang <code>                 display language (en, es, fr, de, it, ja, ko, pt, ru, zh)
  region <code|all>           original language (hi, ta, te, ml, kn, mr, bn, pa, gu, or)
  next | prev                 change page
  fav <id> | unfav <id>       manage favorites
  info <id> | close           movie details
  theme                       toggle light/dark mode
  refresh                     reload with current filters
  quit";

/// 渲染整个会话
pub fn render(session: &Session) -> String {
    let mut out = String::new();
    let controller = session.controller();
    let filters = controller.filters();

    let rule = match session.theme() {
        Theme::Light => "-",
        Theme::Dark => "=",
    }
    .repeat(60);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "Movie Recommendation System  [{} mode]",
        match session.theme() {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    );
    let _ = writeln!(out, "{}", rule);

    let genre = filters
        .genre_id
        .as_deref()
        .and_then(catalog::genre_name)
        .unwrap_or("All Genres");
    let year = filters
        .release_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "All Years".to_string());
    let language = catalog::find_display_language(filters.language.as_str())
        .map(|lang| lang.name)
        .unwrap_or(filters.language.as_str());
    let region = filters
        .regional_language
        .as_ref()
        .and_then(|code| catalog::find_regional_language(code.as_str()))
        .map(|lang| lang.name)
        .unwrap_or("All Regional Languages");

    let _ = writeln!(
        out,
        "Search: {:?} | Genre: {} | Rating: {} | Year: {} | Sort: {} | Language: {} | Region: {}",
        filters.search_term,
        genre,
        filters.min_rating.label(),
        year,
        filters.sort_key.label(),
        language,
        region
    );
    let _ = writeln!(out);

    if controller.is_loading() {
        let _ = writeln!(out, "{}", LOADING_TEXT);
    } else if let Some(message) = controller.error_message() {
        let _ = writeln!(out, "{}", message);
    } else if controller.results().movies.is_empty() {
        let _ = writeln!(out, "No movies found.");
    } else {
        for movie in &controller.results().movies {
            let heart = if session.favorites().contains(movie.id) { "♥" } else { "♡" };
            let _ = writeln!(
                out,
                "{} [{}] {}  Rating: {}  {}",
                heart,
                movie.id,
                movie.title,
                movie.vote_average,
                movie.poster_url(session.image_base_url())
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}  Page {} of {}  {}",
        if controller.can_go_previous() { "[Previous]" } else { "(Previous)" },
        filters.page,
        controller.results().total_pages,
        if controller.can_go_next() { "[Next]" } else { "(Next)" }
    );

    if let Some(movie) = session.detail().current() {
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ==", movie.title);
        let _ = writeln!(out, "{}", movie.overview);
        let _ = writeln!(out, "Release Date: {}", movie.release_date);
        let _ = writeln!(out, "(close)");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Favorites");
    if session.favorites().is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for movie in session.favorites().iter() {
        let _ = writeln!(out, "  [{}] {}", movie.id, movie.title);
    }

    if let Some(notice) = session.notice() {
        let _ = writeln!(out);
        let _ = writeln!(out, "! {}", notice);
    }

    out
}
