pub mod actions;
pub mod app;
