use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::future::Future;
use futures::stream::StreamExt;

use super::HomeIntent;

#[derive(Clone)]
pub struct Dispatcher {
    sender: UnboundedSender<HomeIntent>,
}

impl Dispatcher {
    fn new(sender: UnboundedSender<HomeIntent>) -> Self {
        Self { sender }
    }

    // Fire and forget: the outcome is only visible through the store
    pub fn dispatch(&self, intent: HomeIntent) -> Option<()> {
        match self.sender.unbounded_send(intent) {
            Ok(()) => Some(()),
            Err(err) => {
                debug!("dropping intent {:?}: loop is gone", err.into_inner());
                None
            }
        }
    }
}

pub struct DispatchLoop {
    receiver: UnboundedReceiver<HomeIntent>,
    sender: UnboundedSender<HomeIntent>,
}

impl DispatchLoop {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded::<HomeIntent>();
        Self { receiver, sender }
    }

    pub fn make_dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.sender.clone())
    }

    // Intents are handled concurrently, so a pending fetch never holds up the others
    pub async fn attach<H, F>(self, handler: H)
    where
        H: Fn(HomeIntent) -> F,
        F: Future<Output = ()>,
    {
        let Self { receiver, sender } = self;
        // Only dispatchers keep the loop alive
        drop(sender);
        receiver.for_each_concurrent(None, handler).await;
    }
}

impl Default for DispatchLoop {
    fn default() -> Self {
        Self::new()
    }
}
