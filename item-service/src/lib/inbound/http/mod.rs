pub mod handlers;
pub mod middleware;
pub mod principal;
pub mod router;
