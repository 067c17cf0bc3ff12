use crate::models::{Movie, MovieId};

/// 收藏列表，按 id 去重，保持加入顺序
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    movies: Vec<Movie>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加到收藏；已存在相同 id 时不做任何改动
    pub fn add(&mut self, movie: Movie) -> bool {
        if self.contains(movie.id) {
            return false;
        }
        tracing::debug!("Added movie {} to favorites", movie.id);
        self.movies.push(movie);
        true
    }

    /// 从收藏移除
    pub fn remove(&mut self, id: MovieId) -> bool {
        let before = self.movies.len();
        self.movies.retain(|movie| movie.id != id);
        before != self.movies.len()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.iter().any(|movie| movie.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
