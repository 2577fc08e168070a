mod api_models;
mod catalog_client;
mod client;

pub use api_models::{MovieListPage, RemoteMovie};
pub use catalog_client::{MovieCatalogClient, TmdbResult};
pub use client::{TmdbApiError, TmdbClient, TMDB_HOST};
