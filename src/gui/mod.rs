//! GUI module - User interface components

mod app;
mod details_view;
mod env_list_view;
mod toolbar;

pub use app::GuvApp;
pub use details_view::DetailsView;
pub use env_list_view::EnvListView;
pub use toolbar::{Toolbar, ToolbarAction};
