pub mod app;
pub mod pages;

pub use app::{Route, TuiApp};
