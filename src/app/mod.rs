pub mod dispatch;
pub use dispatch::{DispatchLoop, Dispatcher};

pub mod models;

pub mod state;
pub use state::{HomeAction, HomeEvent, HomeState, LoadStatus, PagedList, UpdatableState};

mod store;
pub use store::{StateObserver, StateStore, SubscriptionId};

mod loader;
pub use loader::PageLoader;

mod reducer;
pub use reducer::{HomeIntent, HomeReducer};

mod session;
pub use session::HomeSession;

#[cfg(test)]
mod test_support;
