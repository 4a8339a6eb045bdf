mod error;
pub use error::ApiError;

mod routes;
pub use routes::{ROUTES, RouteInfo};

mod http;
pub use http::InfoApi;

pub use axum;
