use crate::models::Movie;

/// 当前查看详情的电影，同一时间只有一个
#[derive(Debug, Clone, Default)]
pub struct DetailView {
    current: Option<Movie>,
}

impl DetailView {
    /// 打开详情，替换已打开的电影
    pub fn show(&mut self, movie: Movie) {
        self.current = Some(movie);
    }

    pub fn close(&mut self) -> Option<Movie> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Movie> {
        self.current.as_ref()
    }
}
