pub mod catalog;
pub mod filter;
pub mod movie;
pub mod validation;

pub use catalog::{Genre, Language};
pub use filter::{FilterState, LanguageCode, RatingBucket, ReleaseYear, SortKey};
pub use movie::{Movie, MovieId, ResultPage, PLACEHOLDER_POSTER, POSTER_SIZE};
pub use validation::{NumberValidator, StringValidator, ValidationError, Validator};
