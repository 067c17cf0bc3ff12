use crate::external::{TmdbError, TmdbPageResponse};
use crate::models::{catalog, LanguageCode, ReleaseYear, ValidationError};
use crate::services::{DetailView, FavoritesStore, FetchTicket, FilterEvent, QueryController};

use super::command::{Command, CommandError};

/// 明暗主题，仅影响渲染
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// 命令处理后需要主循环执行的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(FetchTicket),
    ShowHelp,
    Quit,
}

impl From<Option<FetchTicket>> for Effect {
    fn from(ticket: Option<FetchTicket>) -> Self {
        ticket.map(Effect::Fetch).unwrap_or(Effect::None)
    }
}

/// 一次浏览会话的全部状态
#[derive(Debug, Clone)]
pub struct Session {
    controller: QueryController,
    favorites: FavoritesStore,
    detail: DetailView,
    theme: Theme,
    image_base_url: String,
    current_year: i32,
    notice: Option<String>,
}

impl Session {
    pub fn new(
        controller: QueryController,
        image_base_url: impl Into<String>,
        current_year: i32,
    ) -> Self {
        Self {
            controller,
            favorites: FavoritesStore::new(),
            detail: DetailView::default(),
            theme: Theme::default(),
            image_base_url: image_base_url.into(),
            current_year,
            notice: None,
        }
    }

    /// 启动时用默认筛选加载第一页
    pub fn start(&mut self) -> FetchTicket {
        self.controller.discover()
    }

    pub fn controller(&self) -> &QueryController {
        &self.controller
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn detail(&self) -> &DetailView {
        &self.detail
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// 处理一行原始输入
    ///
    /// 空行返回 `None`；编码错误和命令错误只写入提示，状态保持不变。
    pub fn handle_input(&mut self, raw: &[u8]) -> Option<Effect> {
        let result = match std::str::from_utf8(raw) {
            Ok(line) if line.trim().is_empty() => return None,
            Ok(line) => Command::parse(line).and_then(|command| self.handle(command)),
            Err(e) => {
                tracing::warn!("Ignoring input line: {}", e);
                Err(CommandError::InvalidEncoding)
            }
        };

        match result {
            Ok(effect) => Some(effect),
            Err(e) => {
                self.notice = Some(e.to_string());
                Some(Effect::None)
            }
        }
    }

    /// 处理一条命令
    ///
    /// 出错时状态保持不变，错误由调用方作为提示展示。
    pub fn handle(&mut self, command: Command) -> Result<Effect, CommandError> {
        self.notice = None;

        let effect: Effect = match command {
            Command::SetTerm(term) => {
                self.controller.apply(FilterEvent::SearchTermChanged(term)).into()
            }
            Command::Search(term) => {
                if let Some(term) = term {
                    self.controller.apply(FilterEvent::SearchTermChanged(term));
                }
                Effect::Fetch(self.controller.search())
            }
            Command::Genre(genre) => {
                let genre_id = match genre {
                    Some(input) => Some(
                        catalog::find_genre(&input)
                            .map(|genre| genre.id.to_string())
                            .ok_or(ValidationError::UnknownGenre(input))?,
                    ),
                    None => None,
                };
                self.controller.apply(FilterEvent::GenreChanged(genre_id)).into()
            }
            Command::Rating(rating) => {
                self.controller.apply(FilterEvent::MinRatingChanged(rating)).into()
            }
            Command::Year(year) => {
                let year = year
                    .map(|input| ReleaseYear::parse(&input, self.current_year))
                    .transpose()?;
                self.controller.apply(FilterEvent::ReleaseYearChanged(year)).into()
            }
            Command::Sort(sort) => {
                self.controller.apply(FilterEvent::SortKeyChanged(sort)).into()
            }
            Command::Language(code) => {
                if catalog::find_display_language(&code).is_none() {
                    return Err(ValidationError::UnsupportedLanguage(code).into());
                }
                let language = LanguageCode::new(code)?;
                self.controller.apply(FilterEvent::LanguageChanged(language)).into()
            }
            Command::Region(code) => {
                let language = match code {
                    Some(code) => {
                        if catalog::find_regional_language(&code).is_none() {
                            return Err(ValidationError::UnsupportedLanguage(code).into());
                        }
                        Some(LanguageCode::new(code)?)
                    }
                    None => None,
                };
                self.controller.apply(FilterEvent::RegionalLanguageChanged(language)).into()
            }
            Command::Next => {
                if !self.controller.can_go_next() {
                    self.notice = Some("Already on the last page".to_string());
                }
                self.controller.next_page().into()
            }
            Command::Previous => {
                if !self.controller.can_go_previous() {
                    self.notice = Some("Already on the first page".to_string());
                }
                self.controller.previous_page().into()
            }
            Command::AddFavorite(id) => {
                let movie = self
                    .controller
                    .results()
                    .find(id)
                    .cloned()
                    .ok_or(CommandError::MovieNotInResults(id))?;
                if !self.favorites.add(movie) {
                    self.notice = Some(format!("Movie {} is already a favorite", id));
                }
                Effect::None
            }
            Command::RemoveFavorite(id) => {
                self.favorites.remove(id);
                Effect::None
            }
            Command::ShowInfo(id) => {
                let movie = self
                    .controller
                    .results()
                    .find(id)
                    .cloned()
                    .ok_or(CommandError::MovieNotInResults(id))?;
                self.detail.show(movie);
                Effect::None
            }
            Command::CloseInfo => {
                self.detail.close();
                Effect::None
            }
            Command::ToggleTheme => {
                self.theme = self.theme.toggled();
                Effect::None
            }
            Command::Refresh => Effect::Fetch(self.controller.discover()),
            Command::Help => Effect::ShowHelp,
            Command::Quit => Effect::Quit,
        };

        Ok(effect)
    }

    /// 请求完成，交给查询控制器处理
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<TmdbPageResponse, TmdbError>,
    ) -> bool {
        self.controller.complete(ticket, result)
    }
}
