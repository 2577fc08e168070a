#[macro_use]
extern crate log;

pub mod api;
pub mod app;
pub mod settings;
