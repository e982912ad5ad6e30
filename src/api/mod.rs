pub mod handlers;
pub mod models;
pub mod openapi;
pub mod session;
pub mod state;
