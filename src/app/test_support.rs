use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::api::{MovieCatalogClient, MovieListPage, RemoteMovie, TmdbApiError, TmdbResult};
use crate::app::models::*;

pub fn remote_movie(id: u64) -> RemoteMovie {
    RemoteMovie {
        id,
        title: Some(format!("Movie {id}")),
        original_title: None,
        poster_path: Some(format!("/{id}.jpg")),
        adult: Some(false),
        overview: None,
        release_date: None,
    }
}

pub fn movie(id: u64) -> Movie {
    remote_movie(id).into()
}

pub fn page_of(page: u32, ids: &[u64]) -> MovieListPage {
    MovieListPage {
        page,
        results: ids.iter().copied().map(remote_movie).collect(),
        total_pages: None,
    }
}

pub enum Reply {
    Ready(TmdbResult<MovieListPage>),
    Gated(oneshot::Receiver<MovieListPage>),
}

impl Reply {
    pub fn ready(page: MovieListPage) -> Self {
        Self::Ready(Ok(page))
    }

    pub fn failed(err: TmdbApiError) -> Self {
        Self::Ready(Err(err))
    }

    pub fn gated(gate: oneshot::Receiver<MovieListPage>) -> Self {
        Self::Gated(gate)
    }
}

// Answers requests with canned replies, in order
pub struct ScriptedCatalog {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<(MovieListKind, u32)>>,
}

impl ScriptedCatalog {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn requests(&self) -> Vec<(MovieListKind, u32)> {
        self.requests.lock().clone()
    }
}

impl MovieCatalogClient for ScriptedCatalog {
    fn get_movie_list(
        &self,
        list: MovieListKind,
        page: u32,
    ) -> BoxFuture<'_, TmdbResult<MovieListPage>> {
        self.requests.lock().push((list, page));
        let reply = self.replies.lock().pop_front();
        async move {
            match reply {
                Some(Reply::Ready(result)) => result,
                Some(Reply::Gated(gate)) => gate
                    .await
                    .map_err(|_| TmdbApiError::BadStatus(499, "gate dropped".to_string())),
                None => Err(TmdbApiError::BadStatus(404, "no scripted reply".to_string())),
            }
        }
        .boxed()
    }
}
