pub mod auth;

pub use auth::authorize_middleware;
