use futures::future::{AbortHandle, Abortable};
use std::sync::Arc;

use crate::api::MovieCatalogClient;
use crate::app::models::MovieListKind;
use crate::app::state::HomeState;
use crate::app::{
    DispatchLoop, Dispatcher, HomeIntent, HomeReducer, PageLoader, StateObserver, StateStore,
    SubscriptionId,
};

/// One home screen's worth of state and the loop feeding it.
///
/// The dispatch loop is spawned on the current tokio runtime, so `start`
/// must be called from within one. Dropping the session (or calling
/// [`HomeSession::close`]) aborts the loop: fetches still in flight are
/// dropped and their results never reach the store.
pub struct HomeSession {
    store: Arc<StateStore>,
    dispatcher: Dispatcher,
    abort_handle: AbortHandle,
}

impl HomeSession {
    pub fn start(
        api: Arc<dyn MovieCatalogClient + Send + Sync>,
        lists: &[MovieListKind],
    ) -> Self {
        let store = Arc::new(StateStore::new(HomeState::default()));
        let reducer = Arc::new(HomeReducer::new(Arc::clone(&store), PageLoader::new(api)));

        let dispatch_loop = DispatchLoop::new();
        let dispatcher = dispatch_loop.make_dispatcher();

        let (abort_handle, registration) = AbortHandle::new_pair();
        let run = dispatch_loop.attach(move |intent| {
            let reducer = Arc::clone(&reducer);
            async move {
                reducer.handle_intent(intent).await;
            }
        });
        tokio::spawn(Abortable::new(run, registration));

        let session = Self {
            store,
            dispatcher,
            abort_handle,
        };
        for &list in lists {
            session.submit_intent(HomeIntent::FetchList(list));
        }
        info!("home session started ({} lists)", lists.len());
        session
    }

    pub fn submit_intent(&self, intent: HomeIntent) -> Option<()> {
        if self.is_closed() {
            debug!("session closed, dropping intent {:?}", intent);
            return None;
        }
        self.dispatcher.dispatch(intent)
    }

    pub fn current(&self) -> Arc<HomeState> {
        self.store.current()
    }

    pub fn subscribe<O>(&self, observer: O) -> SubscriptionId
    where
        O: StateObserver + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn is_closed(&self) -> bool {
        self.abort_handle.is_aborted()
    }

    pub fn close(&self) {
        if !self.abort_handle.is_aborted() {
            debug!("closing home session");
            self.abort_handle.abort();
        }
    }
}

impl Drop for HomeSession {
    fn drop(&mut self) {
        self.close();
    }
}
