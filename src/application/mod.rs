//! Application layer with use cases, forms, and DTOs.

/// Data transfer objects.
pub mod dto;
/// Input forms and validation.
pub mod forms;
/// Aggregations over fetched data.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginRequest, LoginResponse, Session, TokenSource};
pub use use_cases::{
    JobsitesUseCase, LoginUseCase, ResolveTokenUseCase, ResolvedToken, SessionUseCase,
    TimeRecordsUseCase, UsersUseCase,
};
