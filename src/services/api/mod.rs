pub mod dashboard;
pub mod http;

pub use dashboard::DashboardClient;
pub use http::ApiClientConfig;
