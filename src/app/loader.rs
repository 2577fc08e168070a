use std::sync::Arc;

use crate::api::MovieCatalogClient;
use crate::app::models::*;
use crate::app::state::HomeAction;

// A wrapper around the catalog API turning page fetches into actions
#[derive(Clone)]
pub struct PageLoader {
    api: Arc<dyn MovieCatalogClient + Send + Sync>,
}

impl PageLoader {
    pub fn new(api: Arc<dyn MovieCatalogClient + Send + Sync>) -> Self {
        Self { api }
    }

    // Any error is logged and reported as a failed load, callers never see it
    pub async fn query(&self, list: MovieListKind, page: u32) -> HomeAction {
        match self.api.get_movie_list(list, page).await {
            Ok(result) if result.page.checked_add(1).is_none() => {
                error!(
                    "Catalog API error ({} page {}): page {} out of range",
                    list, page, result.page
                );
                HomeAction::LoadFailed(list)
            }
            Ok(result) => {
                debug!(
                    "loaded {} page {} ({} movies)",
                    list,
                    result.page,
                    result.results.len()
                );
                let page = result.page;
                let total_pages = result.total_pages;
                HomeAction::AppendMovies {
                    list,
                    page,
                    total_pages,
                    movies: result.into_iter().map(Movie::from).collect(),
                }
            }
            Err(err) => {
                error!("Catalog API error ({} page {}): {}", list, page, err);
                HomeAction::LoadFailed(list)
            }
        }
    }
}
