//! Domain error types.

mod action_error;
mod api_error;
mod secret_error;
mod validation_error;

pub use action_error::ActionError;
pub use api_error::ApiError;
pub use secret_error::SecretError;
pub use validation_error::ValidationErrors;
