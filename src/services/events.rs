use crate::models::{LanguageCode, RatingBucket, ReleaseYear, SortKey};

/// 筛选变更事件
///
/// 每次用户修改筛选状态都会产生一个事件，由 `QueryController::apply` 处理。
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    SearchTermChanged(String),
    GenreChanged(Option<String>),
    MinRatingChanged(RatingBucket),
    ReleaseYearChanged(Option<ReleaseYear>),
    SortKeyChanged(SortKey),
    LanguageChanged(LanguageCode),
    RegionalLanguageChanged(Option<LanguageCode>),
    PageChanged(u32),
}

impl FilterEvent {
    /// 是否触发自动 discover（检索词只在提交时生效）
    pub fn triggers_discover(&self) -> bool {
        !matches!(self, FilterEvent::SearchTermChanged(_))
    }

    /// 是否属于会让结果集从第一页开始的筛选变更
    pub fn resets_page(&self) -> bool {
        self.triggers_discover() && !matches!(self, FilterEvent::PageChanged(_))
    }
}
