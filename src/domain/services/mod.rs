//! Domain services.

mod user_domain;

pub use user_domain::UserDomain;
