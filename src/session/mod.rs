pub mod config;
pub mod main_loop;
pub mod message;
pub mod store;
pub mod theme;
