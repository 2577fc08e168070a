use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

use crate::app::models::MovieListKind;
use crate::app::state::{HomeAction, HomeEvent, UpdatableState};
use crate::app::{PageLoader, StateStore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HomeIntent {
    UpdateSearchText(String),
    FetchList(MovieListKind),
}

// Marks a list as being fetched for as long as it's alive
struct InFlight<'a> {
    lists: &'a Mutex<HashSet<MovieListKind>>,
    list: MovieListKind,
}

impl<'a> InFlight<'a> {
    fn acquire(lists: &'a Mutex<HashSet<MovieListKind>>, list: MovieListKind) -> Option<Self> {
        if lists.lock().insert(list) {
            Some(Self { lists, list })
        } else {
            None
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.lists.lock().remove(&self.list);
    }
}

/// Turns intents into state replacements.
///
/// At most one fetch per list is in flight: a `FetchList` for a list that is
/// already loading is dropped. Fetch results are applied to whatever state is
/// current when they complete.
pub struct HomeReducer {
    store: Arc<StateStore>,
    loader: PageLoader,
    in_flight: Mutex<HashSet<MovieListKind>>,
}

impl HomeReducer {
    pub fn new(store: Arc<StateStore>, loader: PageLoader) -> Self {
        Self {
            store,
            loader,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub async fn handle_intent(&self, intent: HomeIntent) -> Vec<HomeEvent> {
        match intent {
            HomeIntent::UpdateSearchText(text) => self.apply(HomeAction::SetSearchText(text)),
            HomeIntent::FetchList(list) => self.fetch_list(list).await,
        }
    }

    pub async fn load_initial(&self, lists: &[MovieListKind]) -> Vec<HomeEvent> {
        join_all(
            lists
                .iter()
                .map(|&list| self.handle_intent(HomeIntent::FetchList(list))),
        )
        .await
        .into_iter()
        .flatten()
        .collect()
    }

    async fn fetch_list(&self, list: MovieListKind) -> Vec<HomeEvent> {
        let _in_flight = match InFlight::acquire(&self.in_flight, list) {
            Some(guard) => guard,
            None => {
                debug!("{} is already loading, ignoring fetch", list);
                return vec![];
            }
        };

        let page = self.store.current().list(list).next_page;
        let action = self.loader.query(list, page).await;
        self.apply(action)
    }

    fn apply(&self, action: HomeAction) -> Vec<HomeEvent> {
        let events = self.store.update(|state| {
            let mut next = state.clone();
            let events = next.update_with(action);
            (next, events)
        });
        debug!("events: {:?}", &events);
        events
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::api::{MovieListPage, TmdbApiError};
    use crate::app::state::{HomeState, LoadStatus};
    use crate::app::test_support::*;
    use futures::channel::oneshot;

    fn make_reducer(api: Arc<ScriptedCatalog>) -> HomeReducer {
        HomeReducer::new(Arc::new(StateStore::default()), PageLoader::new(api))
    }

    #[tokio::test]
    async fn test_fetch_then_fail() {
        let api = Arc::new(ScriptedCatalog::new(vec![
            Reply::ready(page_of(1, &[10, 11])),
            Reply::failed(TmdbApiError::TooManyRequests),
        ]));
        let reducer = make_reducer(Arc::clone(&api));

        let events = reducer
            .handle_intent(HomeIntent::FetchList(MovieListKind::Upcoming))
            .await;
        assert_eq!(
            events,
            vec![HomeEvent::MoviesAppended(MovieListKind::Upcoming, 0)]
        );

        let state = reducer.store().current();
        assert_eq!(state.load_status, LoadStatus::Idle);
        assert_eq!(
            state.list(MovieListKind::Upcoming).items,
            vec![movie(10), movie(11)]
        );
        assert_eq!(state.list(MovieListKind::Upcoming).next_page, 2);

        reducer
            .handle_intent(HomeIntent::FetchList(MovieListKind::Upcoming))
            .await;
        let failed = reducer.store().current();
        assert_eq!(failed.load_status, LoadStatus::Failed);
        assert_eq!(failed.lists, state.lists);

        assert_eq!(
            api.requests(),
            vec![(MovieListKind::Upcoming, 1), (MovieListKind::Upcoming, 2)]
        );
    }

    #[tokio::test]
    async fn test_pages_accumulate() {
        let api = Arc::new(ScriptedCatalog::new(vec![
            Reply::ready(page_of(1, &[1, 2, 3])),
            Reply::ready(page_of(2, &[])),
            Reply::ready(page_of(3, &[4, 5])),
        ]));
        let reducer = make_reducer(Arc::clone(&api));

        for _ in 0..3 {
            reducer
                .handle_intent(HomeIntent::FetchList(MovieListKind::Popular))
                .await;
        }

        let state = reducer.store().current();
        let popular = state.list(MovieListKind::Popular);
        assert_eq!(popular.len(), 5);
        assert_eq!(popular.next_page, 4);
        assert_eq!(
            popular.items.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert!(state.list(MovieListKind::Upcoming).is_empty());
    }

    #[tokio::test]
    async fn test_next_page_follows_response() {
        let api = Arc::new(ScriptedCatalog::new(vec![Reply::ready(page_of(5, &[1]))]));
        let reducer = make_reducer(api);

        reducer
            .handle_intent(HomeIntent::FetchList(MovieListKind::TopRated))
            .await;
        assert_eq!(
            reducer.store().current().list(MovieListKind::TopRated).next_page,
            6
        );
    }

    #[tokio::test]
    async fn test_update_search_text() {
        let api = Arc::new(ScriptedCatalog::new(vec![]));
        let reducer = make_reducer(Arc::clone(&api));

        let events = reducer
            .handle_intent(HomeIntent::UpdateSearchText("batman".to_string()))
            .await;
        assert_eq!(events, vec![HomeEvent::SearchTextUpdated]);
        assert_eq!(
            *reducer.store().current(),
            HomeState {
                search_text: "batman".to_string(),
                ..Default::default()
            }
        );
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_fetches_are_single_flight() {
        let (release, gate) = oneshot::channel::<MovieListPage>();
        let api = Arc::new(ScriptedCatalog::new(vec![
            Reply::gated(gate),
            Reply::ready(page_of(2, &[3])),
        ]));
        let reducer = make_reducer(Arc::clone(&api));

        let first = reducer.handle_intent(HomeIntent::FetchList(MovieListKind::Upcoming));
        let second = async {
            let events = reducer
                .handle_intent(HomeIntent::FetchList(MovieListKind::Upcoming))
                .await;
            release.send(page_of(1, &[1, 2])).unwrap();
            events
        };
        let (first, second) = futures::join!(first, second);

        assert_eq!(
            first,
            vec![HomeEvent::MoviesAppended(MovieListKind::Upcoming, 0)]
        );
        assert!(second.is_empty());
        assert_eq!(api.requests(), vec![(MovieListKind::Upcoming, 1)]);

        let state = reducer.store().current();
        assert_eq!(state.list(MovieListKind::Upcoming).len(), 2);
        assert_eq!(state.list(MovieListKind::Upcoming).next_page, 2);

        // The list is free again once the first fetch has landed
        reducer
            .handle_intent(HomeIntent::FetchList(MovieListKind::Upcoming))
            .await;
        assert_eq!(
            api.requests(),
            vec![(MovieListKind::Upcoming, 1), (MovieListKind::Upcoming, 2)]
        );
        assert_eq!(reducer.store().current().list(MovieListKind::Upcoming).len(), 3);
    }

    #[tokio::test]
    async fn test_out_of_range_page_fails_the_load() {
        let api = Arc::new(ScriptedCatalog::new(vec![
            Reply::ready(page_of(1, &[1])),
            Reply::ready(page_of(u32::MAX, &[2])),
        ]));
        let reducer = make_reducer(api);

        reducer
            .handle_intent(HomeIntent::FetchList(MovieListKind::Popular))
            .await;
        let before = reducer.store().current();

        let events = reducer
            .handle_intent(HomeIntent::FetchList(MovieListKind::Popular))
            .await;
        assert_eq!(events, vec![HomeEvent::LoadFailed(MovieListKind::Popular)]);

        let state = reducer.store().current();
        assert_eq!(state.load_status, LoadStatus::Failed);
        assert_eq!(state.lists, before.lists);
        assert_eq!(state.list(MovieListKind::Popular).next_page, 2);
    }

    #[tokio::test]
    async fn test_load_initial_fetches_each_list() {
        let api = Arc::new(ScriptedCatalog::new(vec![
            Reply::ready(page_of(1, &[1])),
            Reply::ready(page_of(1, &[2, 3])),
        ]));
        let reducer = make_reducer(Arc::clone(&api));

        let events = reducer
            .load_initial(&[MovieListKind::Upcoming, MovieListKind::Popular])
            .await;
        assert_eq!(events.len(), 2);

        let mut requests = api.requests();
        requests.sort();
        assert_eq!(
            requests,
            vec![(MovieListKind::Upcoming, 1), (MovieListKind::Popular, 1)]
        );

        let state = reducer.store().current();
        let loaded = state.list(MovieListKind::Upcoming).len() + state.list(MovieListKind::Popular).len();
        assert_eq!(loaded, 3);
    }
}
