mod home_state;
mod pagination;

pub use home_state::*;
pub use pagination::*;

pub trait UpdatableState {
    type Action;
    type Event;

    fn update_with(&mut self, action: Self::Action) -> Vec<Self::Event>;
}
