pub mod admin;
pub mod claims;
pub mod enrollment;
