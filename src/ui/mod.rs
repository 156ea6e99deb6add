mod dashboard;
mod gallery;
mod theme;

pub use dashboard::{render as render_dashboard, DashboardState};
pub use gallery::render as render_gallery;
pub use theme::apply_theme;
