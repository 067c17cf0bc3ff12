// 查询控制器
//
// 持有筛选 / 排序 / 分页 / 语言状态，推导请求描述并处理响应：
// - 筛选事件自动触发 discover
// - 检索只在提交时触发 search
// - 每个请求分配递增的请求 id，过期响应直接丢弃

use crate::external::{
    Endpoint, MovieProvider, RequestDescriptor, TmdbError, TmdbPageResponse,
};
use crate::models::{FilterState, NumberValidator, ResultPage, ValidationError, Validator};

use super::events::FilterEvent;

pub const DISCOVER_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";
pub const SEARCH_ERROR_MESSAGE: &str = "Search failed. Please try again later.";

/// 筛选变更时的页码策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagePolicy {
    /// 任一筛选项变化时回到第一页
    #[default]
    ResetToFirst,
    /// 保持当前页码
    Keep,
}

/// 可恢复的请求错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    DiscoverFetchFailed,
    SearchFetchFailed,
}

impl QueryError {
    pub fn for_endpoint(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Discover => QueryError::DiscoverFetchFailed,
            Endpoint::Search => QueryError::SearchFetchFailed,
        }
    }

    /// 展示给用户的固定文案
    pub fn message(&self) -> &'static str {
        match self {
            QueryError::DiscoverFetchFailed => DISCOVER_ERROR_MESSAGE,
            QueryError::SearchFetchFailed => SEARCH_ERROR_MESSAGE,
        }
    }
}

/// 已派发的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: u64,
    pub request: RequestDescriptor,
}

/// 查询控制器
#[derive(Debug, Clone)]
pub struct QueryController {
    filters: FilterState,
    results: ResultPage,
    loading: bool,
    error: Option<QueryError>,
    page_policy: PagePolicy,
    next_request_id: u64,
    latest_request_id: Option<u64>,
}

impl Default for QueryController {
    fn default() -> Self {
        Self::new(FilterState::default(), PagePolicy::default())
    }
}

impl QueryController {
    pub fn new(filters: FilterState, page_policy: PagePolicy) -> Self {
        Self {
            filters,
            results: ResultPage::default(),
            loading: false,
            error: None,
            page_policy,
            next_request_id: 1,
            latest_request_id: None,
        }
    }

    /// 校验初始筛选状态后创建控制器
    pub fn try_new(filters: FilterState, page_policy: PagePolicy) -> Result<Self, ValidationError> {
        filters.validate()?;
        Ok(Self::new(filters, page_policy))
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn results(&self) -> &ResultPage {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<QueryError> {
        self.error
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|e| e.message())
    }

    pub fn page_policy(&self) -> PagePolicy {
        self.page_policy
    }

    /// 应用筛选事件
    ///
    /// 值没有变化时返回 `None`；否则更新状态，需要时派发 discover。
    pub fn apply(&mut self, event: FilterEvent) -> Option<FetchTicket> {
        if !self.update(&event) {
            return None;
        }

        let reset = event.resets_page() && self.page_policy == PagePolicy::ResetToFirst;
        if reset && self.filters.page != 1 {
            tracing::debug!(
                "Filters changed on page {}, resetting to page 1",
                self.filters.page
            );
            self.filters.page = 1;
        }

        if event.triggers_discover() {
            Some(self.discover())
        } else {
            None
        }
    }

    fn update(&mut self, event: &FilterEvent) -> bool {
        let filters = &mut self.filters;
        match event {
            FilterEvent::SearchTermChanged(term) => replace(&mut filters.search_term, term.clone()),
            FilterEvent::GenreChanged(genre) => replace(&mut filters.genre_id, genre.clone()),
            FilterEvent::MinRatingChanged(rating) => replace(&mut filters.min_rating, *rating),
            FilterEvent::ReleaseYearChanged(year) => replace(&mut filters.release_year, *year),
            FilterEvent::SortKeyChanged(sort) => replace(&mut filters.sort_key, *sort),
            FilterEvent::LanguageChanged(lang) => replace(&mut filters.language, lang.clone()),
            FilterEvent::RegionalLanguageChanged(lang) => {
                replace(&mut filters.regional_language, lang.clone())
            }
            FilterEvent::PageChanged(page) => {
                if let Err(e) = NumberValidator::validate_page(*page) {
                    tracing::warn!("Ignoring page change: {}", e);
                    return false;
                }
                replace(&mut filters.page, *page)
            }
        }
    }

    /// 用当前筛选状态派发 discover
    pub fn discover(&mut self) -> FetchTicket {
        let request = RequestDescriptor::discover(&self.filters);
        self.begin(request)
    }

    /// 用当前检索词派发 search
    pub fn search(&mut self) -> FetchTicket {
        let request = RequestDescriptor::search(&self.filters, &self.filters.search_term);
        self.begin(request)
    }

    pub fn can_go_previous(&self) -> bool {
        self.filters.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.filters.page < self.results.total_pages
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if !self.can_go_next() {
            return None;
        }
        self.apply(FilterEvent::PageChanged(self.filters.page + 1))
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        if !self.can_go_previous() {
            return None;
        }
        self.apply(FilterEvent::PageChanged(self.filters.page - 1))
    }

    fn begin(&mut self, request: RequestDescriptor) -> FetchTicket {
        let id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_request_id = Some(id);
        self.loading = true;
        self.error = None;

        tracing::debug!(
            "Dispatching request #{} {} ?{}",
            id,
            request.endpoint.path(),
            request.query_string()
        );

        FetchTicket { id, request }
    }

    /// 处理请求结果，返回结果是否被采用
    ///
    /// 只有最新派发的请求会更新状态；更早的响应即使晚到也会被丢弃。
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<TmdbPageResponse, TmdbError>,
    ) -> bool {
        if self.latest_request_id != Some(ticket.id) {
            tracing::debug!(
                "Discarding stale response #{} (latest is {:?})",
                ticket.id,
                self.latest_request_id
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(response) => {
                self.results = ResultPage::from(response);
                self.error = None;
                tracing::debug!(
                    "Request #{} returned {} movies ({} pages)",
                    ticket.id,
                    self.results.movies.len(),
                    self.results.total_pages
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Request #{} to {} failed: {}",
                    ticket.id,
                    ticket.request.endpoint.path(),
                    e
                );
                self.results.movies.clear();
                self.error = Some(QueryError::for_endpoint(ticket.request.endpoint));
            }
        }
        true
    }

    /// 执行请求并处理结果
    pub async fn run<P>(&mut self, provider: &P, ticket: FetchTicket) -> bool
    where
        P: MovieProvider + ?Sized,
    {
        let result = provider.fetch_page(&ticket.request).await;
        self.complete(&ticket, result)
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Movie, RatingBucket, SortKey};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: String::new(),
            release_date: "2020-01-01".to_string(),
            vote_average: 7.0,
            poster_path: None,
        }
    }

    fn page(ids: &[u64], total_pages: u32) -> TmdbPageResponse {
        TmdbPageResponse {
            page: Some(1),
            results: ids.iter().copied().map(movie).collect(),
            total_pages,
            total_results: Some(ids.len() as u32),
        }
    }

    /// 记录请求并返回预设结果
    struct FakeProvider {
        requests: Mutex<Vec<RequestDescriptor>>,
        response: Option<TmdbPageResponse>,
    }

    impl FakeProvider {
        fn ok(response: TmdbPageResponse) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                response: Some(response),
            }
        }

        fn failing() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                response: None,
            }
        }
    }

    #[async_trait]
    impl MovieProvider for FakeProvider {
        async fn fetch_page(
            &self,
            request: &RequestDescriptor,
        ) -> Result<TmdbPageResponse, TmdbError> {
            self.requests.lock().unwrap().push(request.clone());
            self.response.clone().ok_or(TmdbError::Status(500))
        }
    }

    #[test]
    fn test_initial_discover_uses_defaults() {
        let mut controller = QueryController::default();
        let ticket = controller.discover();

        assert!(controller.is_loading());
        assert!(ticket.request.query_string().ends_with(
            "vote_average.gte=0&with_genres=&primary_release_year=&with_original_language=&page=1"
        ));
    }

    #[test]
    fn test_genre_change_dispatches_discover() {
        let mut controller = QueryController::default();
        let ticket = controller
            .apply(FilterEvent::GenreChanged(Some("28".to_string())))
            .expect("genre change should fetch");

        assert_eq!(ticket.request.endpoint, Endpoint::Discover);
        assert_eq!(ticket.request.param("with_genres"), Some("28"));
    }

    #[test]
    fn test_unchanged_value_does_not_fetch() {
        let mut controller = QueryController::default();
        assert!(controller.apply(FilterEvent::SortKeyChanged(SortKey::PopularityDesc)).is_none());
        assert!(controller.apply(FilterEvent::MinRatingChanged(RatingBucket::Any)).is_none());
        assert!(controller.apply(FilterEvent::PageChanged(1)).is_none());
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_search_term_change_does_not_fetch() {
        let mut controller = QueryController::default();
        assert!(controller
            .apply(FilterEvent::SearchTermChanged("Matrix".to_string()))
            .is_none());
        assert_eq!(controller.filters().search_term, "Matrix");
    }

    #[test]
    fn test_search_uses_term_and_current_page_only() {
        let mut controller = QueryController::new(
            FilterState {
                genre_id: Some("28".to_string()),
                min_rating: RatingBucket::EightPlus,
                page: 3,
                ..FilterState::default()
            },
            PagePolicy::ResetToFirst,
        );
        controller.apply(FilterEvent::SearchTermChanged("Matrix".to_string()));
        let ticket = controller.search();

        assert_eq!(ticket.request.endpoint, Endpoint::Search);
        assert_eq!(ticket.request.query_string(), "query=Matrix&language=en&page=3");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut controller = QueryController::new(
            FilterState { page: 9, ..FilterState::default() },
            PagePolicy::ResetToFirst,
        );
        let ticket = controller
            .apply(FilterEvent::MinRatingChanged(RatingBucket::SevenPlus))
            .unwrap();

        assert_eq!(controller.filters().page, 1);
        assert_eq!(ticket.request.page(), Some(1));
    }

    #[test]
    fn test_filter_change_keeps_page_when_configured() {
        let mut controller = QueryController::new(
            FilterState { page: 9, ..FilterState::default() },
            PagePolicy::Keep,
        );
        let ticket = controller
            .apply(FilterEvent::MinRatingChanged(RatingBucket::SevenPlus))
            .unwrap();

        assert_eq!(controller.filters().page, 9);
        assert_eq!(ticket.request.page(), Some(9));
    }

    #[test]
    fn test_pagination_bounds() {
        let mut controller = QueryController::default();
        let ticket = controller.discover();
        controller.complete(&ticket, Ok(page(&[1, 2], 5)));

        assert!(!controller.can_go_previous());
        assert!(controller.previous_page().is_none());
        assert_eq!(controller.filters().page, 1);

        for expected in 2..=5 {
            let ticket = controller.next_page().expect("next page");
            assert_eq!(ticket.request.page(), Some(expected));
            controller.complete(&ticket, Ok(page(&[1], 5)));
        }

        assert_eq!(controller.filters().page, 5);
        assert!(!controller.can_go_next());
        assert!(controller.next_page().is_none());

        let ticket = controller.previous_page().expect("previous page");
        assert_eq!(ticket.request.endpoint, Endpoint::Discover);
        assert_eq!(ticket.request.page(), Some(4));
        assert_eq!(controller.filters().page, 4);
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let mut controller = QueryController::default();
        assert!(controller.apply(FilterEvent::PageChanged(0)).is_none());
        assert_eq!(controller.filters().page, 1);
    }

    #[test]
    fn test_try_new_validates_initial_filters() {
        assert!(QueryController::try_new(FilterState::default(), PagePolicy::Keep).is_ok());

        let result = QueryController::try_new(
            FilterState { page: 0, ..FilterState::default() },
            PagePolicy::ResetToFirst,
        );
        assert_eq!(result.err(), Some(ValidationError::InvalidPage(0)));

        let result = QueryController::try_new(
            FilterState { genre_id: Some("4242".to_string()), ..FilterState::default() },
            PagePolicy::ResetToFirst,
        );
        assert_eq!(result.err(), Some(ValidationError::UnknownGenre("4242".to_string())));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut controller = QueryController::default();
        let slow = controller.discover();
        let fast = controller
            .apply(FilterEvent::GenreChanged(Some("35".to_string())))
            .unwrap();
        assert!(fast.id > slow.id);

        assert!(controller.complete(&fast, Ok(page(&[35], 2))));
        assert!(!controller.complete(&slow, Ok(page(&[1, 2, 3], 9))));

        assert_eq!(controller.results().movies.len(), 1);
        assert_eq!(controller.results().movies[0].id, 35);
        assert_eq!(controller.results().total_pages, 2);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_loading_stays_on_until_latest_completes() {
        let mut controller = QueryController::default();
        let first = controller.discover();
        let _second = controller.discover();

        controller.complete(&first, Ok(page(&[1], 1)));
        assert!(controller.is_loading());
    }

    #[tokio::test]
    async fn test_run_success_clears_error_and_loading() {
        let provider = FakeProvider::ok(page(&[603, 604], 5));
        let mut controller = QueryController::default();

        let ticket = controller.discover();
        assert!(controller.run(&provider, ticket).await);

        assert!(!controller.is_loading());
        assert!(controller.error().is_none());
        assert_eq!(controller.results().movies.len(), 2);
        assert_eq!(controller.results().total_pages, 5);
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_discover_failure() {
        let provider = FakeProvider::failing();
        let mut controller = QueryController::default();

        let ticket = controller.discover();
        controller.run(&provider, ticket).await;

        assert!(!controller.is_loading());
        assert_eq!(controller.error(), Some(QueryError::DiscoverFetchFailed));
        assert_eq!(controller.error_message(), Some(DISCOVER_ERROR_MESSAGE));
        assert!(controller.results().movies.is_empty());
    }

    #[tokio::test]
    async fn test_run_search_failure_clears_previous_results() {
        let mut controller = QueryController::default();
        let ticket = controller.discover();
        controller.run(&FakeProvider::ok(page(&[1, 2], 3)), ticket).await;

        controller.apply(FilterEvent::SearchTermChanged("Matrix".to_string()));
        let ticket = controller.search();
        controller.run(&FakeProvider::failing(), ticket).await;

        assert!(!controller.is_loading());
        assert_eq!(controller.error_message(), Some(SEARCH_ERROR_MESSAGE));
        assert!(controller.results().movies.is_empty());

        // 新请求开始时清除错误
        controller.discover();
        assert!(controller.error().is_none());
    }
}
