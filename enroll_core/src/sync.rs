/// Things that can go wrong in the API
pub mod error;
pub use error::Error;

/// A client for the registration server
pub mod client;
pub use client::Client;

/// Register for a course
pub mod register;
