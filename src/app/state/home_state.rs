use super::{PagedList, UpdatableState};
use crate::app::models::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Failed,
    Loading,
}

#[derive(Clone, Debug)]
pub enum HomeAction {
    SetSearchText(String),
    AppendMovies {
        list: MovieListKind,
        page: u32,
        movies: Vec<Movie>,
        total_pages: Option<u32>,
    },
    LoadFailed(MovieListKind),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HomeEvent {
    SearchTextUpdated,
    MoviesAppended(MovieListKind, usize),
    LoadFailed(MovieListKind),
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct MovieLists {
    pub upcoming: PagedList<Movie>,
    pub popular: PagedList<Movie>,
    pub top_rated: PagedList<Movie>,
    pub now_playing: PagedList<Movie>,
}

impl MovieLists {
    pub fn get(&self, list: MovieListKind) -> &PagedList<Movie> {
        match list {
            MovieListKind::Upcoming => &self.upcoming,
            MovieListKind::Popular => &self.popular,
            MovieListKind::TopRated => &self.top_rated,
            MovieListKind::NowPlaying => &self.now_playing,
        }
    }

    pub fn get_mut(&mut self, list: MovieListKind) -> &mut PagedList<Movie> {
        match list {
            MovieListKind::Upcoming => &mut self.upcoming,
            MovieListKind::Popular => &mut self.popular,
            MovieListKind::TopRated => &mut self.top_rated,
            MovieListKind::NowPlaying => &mut self.now_playing,
        }
    }
}

/// Everything the home screen renders.
///
/// Snapshots are never modified once published: the reducer clones the
/// current snapshot, applies one [`HomeAction`] to the clone and hands the
/// result to the store.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct HomeState {
    pub load_status: LoadStatus,
    pub search_text: String,
    pub lists: MovieLists,
}

impl HomeState {
    pub fn list(&self, list: MovieListKind) -> &PagedList<Movie> {
        self.lists.get(list)
    }
}

impl UpdatableState for HomeState {
    type Action = HomeAction;
    type Event = HomeEvent;

    fn update_with(&mut self, action: Self::Action) -> Vec<Self::Event> {
        match action {
            HomeAction::SetSearchText(text) => {
                self.search_text = text;
                vec![HomeEvent::SearchTextUpdated]
            }
            HomeAction::AppendMovies {
                list,
                page,
                movies,
                total_pages,
            } => {
                self.load_status = LoadStatus::Idle;
                let index = self.lists.get_mut(list).append_page(page, movies, total_pages);
                vec![HomeEvent::MoviesAppended(list, index)]
            }
            HomeAction::LoadFailed(list) => {
                self.load_status = LoadStatus::Failed;
                vec![HomeEvent::LoadFailed(list)]
            }
        }
    }
}
