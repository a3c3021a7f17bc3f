pub mod admin;
pub mod enrollment;
pub mod health;
pub mod me;
pub mod session;
