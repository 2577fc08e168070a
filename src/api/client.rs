use isahc::config::Configurable;
use isahc::http::{method::Method, request::Builder, StatusCode, Uri};
use isahc::{AsyncReadResponseExt, HttpClient, Request};
use serde::de::DeserializeOwned;
use serde_json::from_str;
use std::marker::PhantomData;
use std::time::Duration;
use thiserror::Error;

pub use super::api_models::*;
use crate::app::models::MovieListKind;

pub const TMDB_HOST: &str = "api.themoviedb.org";

const API_VERSION: &str = "3";

pub(crate) struct TmdbRequest<'a, Response> {
    client: &'a TmdbClient,
    request: Builder,
    _type: PhantomData<Response>,
}

impl<'a, R> TmdbRequest<'a, R>
where
    R: DeserializeOwned,
{
    fn method(mut self, method: Method) -> Self {
        self.request = self.request.method(method);
        self
    }

    fn uri(mut self, path: String, query: Option<&str>) -> Result<Self, TmdbApiError> {
        let path_and_query = match query {
            None => format!("/{API_VERSION}{path}"),
            Some(query) => format!("/{API_VERSION}{path}?{query}"),
        };
        let uri = Uri::builder()
            .scheme("https")
            .authority(&self.client.host[..])
            .path_and_query(&path_and_query[..])
            .build()?;
        self.request = self.request.uri(uri);
        Ok(self)
    }

    pub(crate) async fn send(self) -> Result<R, TmdbApiError> {
        let Self {
            client, request, ..
        } = self;
        let response = client.send_req(request.body(())?).await?;
        Ok(from_str(&response)?)
    }
}

#[derive(Error, Debug)]
pub enum TmdbApiError {
    #[error("No API key")]
    NoApiKey,
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error("Request rate exceeded")]
    TooManyRequests,
    #[error("Request failed ({0}): {1}")]
    BadStatus(u16, String),
    #[error(transparent)]
    ClientError(#[from] isahc::Error),
    #[error(transparent)]
    HttpError(#[from] isahc::http::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    ParseError(#[from] serde_json::Error),
}

pub struct TmdbClient {
    api_key: Option<String>,
    language: String,
    host: String,
    client: HttpClient,
}

impl TmdbClient {
    pub fn new(
        api_key: Option<String>,
        language: String,
        host: String,
        timeout: Option<Duration>,
    ) -> Result<Self, TmdbApiError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            api_key,
            language,
            host,
            client,
        })
    }

    pub(crate) fn request<T>(&self) -> TmdbRequest<'_, T> {
        TmdbRequest {
            client: self,
            request: Builder::new(),
            _type: PhantomData,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send_req(&self, request: Request<()>) -> Result<String, TmdbApiError> {
        debug!("{} {}", request.method(), request.uri().path());
        let mut result = self.client.send_async(request).await?;

        match result.status() {
            s if s.is_success() => Ok(result.text().await?),
            StatusCode::UNAUTHORIZED => Err(TmdbApiError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(TmdbApiError::TooManyRequests),
            s => Err(TmdbApiError::BadStatus(
                s.as_u16(),
                result
                    .text()
                    .await
                    .unwrap_or_else(|_| "(no details available)".to_string()),
            )),
        }
    }
}

impl TmdbClient {
    pub(crate) fn get_movie_list(
        &self,
        list: MovieListKind,
        page: u32,
    ) -> Result<TmdbRequest<'_, MovieListPage>, TmdbApiError> {
        let api_key = self.api_key.as_deref().ok_or(TmdbApiError::NoApiKey)?;
        let query = MovieListQuery {
            page,
            api_key,
            language: &self.language,
        }
        .into_query_string();

        self.request()
            .method(Method::GET)
            .uri(format!("/movie/{}", list.path_segment()), Some(&query))
    }
}
