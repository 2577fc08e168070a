use futures::future::BoxFuture;
use futures::FutureExt;

use super::client::{MovieListPage, TmdbApiError, TmdbClient};
use crate::app::models::MovieListKind;

pub type TmdbResult<T> = Result<T, TmdbApiError>;

/// The remote catalog as seen by the reducer.
///
/// Implementations fetch one page of a movie list; any failure (network,
/// status, parsing) is reported as a [`TmdbApiError`].
pub trait MovieCatalogClient {
    fn get_movie_list(
        &self,
        list: MovieListKind,
        page: u32,
    ) -> BoxFuture<'_, TmdbResult<MovieListPage>>;
}

impl MovieCatalogClient for TmdbClient {
    fn get_movie_list(
        &self,
        list: MovieListKind,
        page: u32,
    ) -> BoxFuture<'_, TmdbResult<MovieListPage>> {
        async move {
            let request = TmdbClient::get_movie_list(self, list, page)?;
            request.send().await
        }
        .boxed()
    }
}
