pub mod app;
pub mod domain;
pub mod logging;
pub mod repo;
pub mod store;
pub mod ui;
pub mod view;
