pub mod app;
pub mod camera_controls;
pub mod download_link;

pub use app::{App, AppProps};
