pub mod detail_view;
pub mod events;
pub mod favorites;
pub mod query_controller;

pub use detail_view::DetailView;
pub use events::FilterEvent;
pub use favorites::FavoritesStore;
pub use query_controller::{
    FetchTicket, PagePolicy, QueryController, QueryError, DISCOVER_ERROR_MESSAGE,
    SEARCH_ERROR_MESSAGE,
};
