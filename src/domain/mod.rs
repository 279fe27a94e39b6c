//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;
/// Permission evaluation.
pub mod services;

pub use entities::{AuthToken, Jobsite, RecordStatus, Role, RoleName, TimeRecord, User};
pub use errors::{ActionError, ApiError, ValidationErrors};
pub use ports::{AuthPort, DirectoryPort, JobsitePort, TimeRecordPort, TokenStoragePort};
pub use services::UserDomain;
