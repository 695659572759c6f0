//! Authentication schemes, credential material, OAuth token state, and the authorization
//! resolver that turns them into request headers.

pub mod config;
pub mod resolver;
pub mod secret;
pub mod token;

pub use config::*;
pub use secret::*;
pub use token::*;
