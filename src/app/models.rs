use serde::Deserialize;
use std::fmt;

const POSTER_HOST: &str = "https://image.tmdb.org/t/p";

pub const DEFAULT_POSTER_SIZE: &str = "w500";

// The TMDB movie lists that can be paged through
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieListKind {
    Upcoming,
    Popular,
    TopRated,
    NowPlaying,
}

impl MovieListKind {
    pub const ALL: [MovieListKind; 4] = [
        Self::Upcoming,
        Self::Popular,
        Self::TopRated,
        Self::NowPlaying,
    ];

    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::NowPlaying => "now_playing",
        }
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.path_segment() == segment)
    }
}

impl fmt::Display for MovieListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub poster_path: Option<String>,
    pub is_adult: Option<bool>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
}

impl Movie {
    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|path| format!("{POSTER_HOST}/{size}{path}"))
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.original_title.as_deref())
            .unwrap_or("(untitled)")
    }
}
