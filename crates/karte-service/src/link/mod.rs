//! Report link issuance and validation.

pub mod service;
pub mod token;

pub use service::{LinkService, LinkStatus};
pub use token::LinkTokenGenerator;
