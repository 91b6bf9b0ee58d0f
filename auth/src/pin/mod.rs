pub mod argon2;
pub mod errors;

pub use argon2::PinHasher;
pub use errors::PinError;
