pub mod home;
pub mod user;
