use form_urlencoded::Serializer;
use serde::Deserialize;

use crate::app::models::*;

pub struct MovieListQuery<'a> {
    pub page: u32,
    pub api_key: &'a str,
    pub language: &'a str,
}

impl<'a> MovieListQuery<'a> {
    pub fn into_query_string(self) -> String {
        Serializer::new(String::new())
            .append_pair("page", &self.page.to_string()[..])
            .append_pair("api_key", self.api_key)
            .append_pair("language", self.language)
            .finish()
    }
}

// One page of a TMDB movie list
#[derive(Deserialize, Debug, Clone)]
pub struct MovieListPage {
    pub page: u32,
    #[serde(default)]
    pub results: Vec<RemoteMovie>,
    pub total_pages: Option<u32>,
}

impl IntoIterator for MovieListPage {
    type Item = RemoteMovie;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct RemoteMovie {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub poster_path: Option<String>,
    pub adult: Option<bool>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
}

impl From<RemoteMovie> for Movie {
    fn from(movie: RemoteMovie) -> Self {
        let RemoteMovie {
            id,
            title,
            original_title,
            poster_path,
            adult,
            overview,
            release_date,
        } = movie;
        Self {
            id,
            title,
            original_title,
            poster_path,
            is_adult: adult,
            overview,
            // TMDB sends "" for unknown release dates
            release_date: release_date.filter(|date| !date.is_empty()),
        }
    }
}
