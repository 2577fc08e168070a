use parking_lot::{Mutex, ReentrantMutex, RwLock};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::app::state::HomeState;

pub trait StateObserver: Send + Sync {
    fn on_state_changed(&self, state: &HomeState);
}

impl<F> StateObserver for F
where
    F: Fn(&HomeState) + Send + Sync,
{
    fn on_state_changed(&self, state: &HomeState) {
        self(state)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct WriteQueue {
    notifying: bool,
    pending: VecDeque<HomeState>,
}

// Clears the queue even if an observer panics mid-notification
struct Notifying<'a>(&'a RefCell<WriteQueue>);

impl Drop for Notifying<'_> {
    fn drop(&mut self) {
        let mut queue = self.0.borrow_mut();
        queue.notifying = false;
        queue.pending.clear();
    }
}

/// Holds the current [`HomeState`] snapshot and notifies observers on every
/// replacement.
///
/// Writes (`replace`, `update`, `subscribe`) are serialized; the lock is
/// reentrant so an observer may call back into the store while it is being
/// notified. A replacement made from inside an observer is queued and
/// published once every observer has seen the current one, so all observers
/// see snapshots in the same order.
pub struct StateStore {
    state: RwLock<Arc<HomeState>>,
    observers: Mutex<Vec<(SubscriptionId, Arc<dyn StateObserver>)>>,
    next_id: AtomicU64,
    write: ReentrantMutex<RefCell<WriteQueue>>,
}

impl StateStore {
    pub fn new(initial: HomeState) -> Self {
        Self {
            state: RwLock::new(Arc::new(initial)),
            observers: Mutex::new(vec![]),
            next_id: AtomicU64::new(0),
            write: ReentrantMutex::new(RefCell::new(WriteQueue::default())),
        }
    }

    pub fn current(&self) -> Arc<HomeState> {
        Arc::clone(&self.state.read())
    }

    pub fn replace(&self, new_state: HomeState) {
        let write = self.write.lock();
        self.publish(&write, new_state);
    }

    // Read-modify-replace, with no other write in between
    pub fn update<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&HomeState) -> (HomeState, R),
    {
        let write = self.write.lock();
        // Nested updates build on the last queued snapshot
        let queued = write.borrow().pending.back().cloned();
        let latest = queued.map(Arc::new).unwrap_or_else(|| self.current());
        let (new_state, result) = f(&latest);
        self.publish(&write, new_state);
        result
    }

    pub fn subscribe<O>(&self, observer: O) -> SubscriptionId
    where
        O: StateObserver + 'static,
    {
        let _write = self.write.lock();
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let observer: Arc<dyn StateObserver> = Arc::new(observer);
        self.observers.lock().push((id, Arc::clone(&observer)));
        observer.on_state_changed(&self.current());
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock();
        let len = observers.len();
        observers.retain(|(other, _)| *other != id);
        observers.len() != len
    }

    fn publish(&self, queue: &RefCell<WriteQueue>, new_state: HomeState) {
        {
            let mut queue = queue.borrow_mut();
            if queue.notifying {
                queue.pending.push_back(new_state);
                return;
            }
            queue.notifying = true;
        }

        let _notifying = Notifying(queue);
        let mut next = Some(new_state);
        while let Some(state) = next {
            self.swap_and_notify(state);
            next = queue.borrow_mut().pending.pop_front();
        }
    }

    fn swap_and_notify(&self, new_state: HomeState) {
        let new_state = Arc::new(new_state);
        *self.state.write() = Arc::clone(&new_state);

        let observers: Vec<Arc<dyn StateObserver>> = self
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer.on_state_changed(&new_state);
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(HomeState::default())
    }
}
