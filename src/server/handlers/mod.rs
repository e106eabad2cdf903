//! API endpoint handlers.

mod api;
mod repositories;
mod saved;
mod search;

pub use api::{health, not_found};
pub use repositories::{
    repository_clones, repository_contents, repository_contents_path, repository_detail,
    repository_languages, repository_views,
};
pub use saved::{saved_repositories, search_history};
pub use search::search_repositories;
