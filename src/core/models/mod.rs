pub mod patient;
pub mod post;
pub mod session;
pub mod user;
