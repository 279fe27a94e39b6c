//! Use case implementations.

mod jobsites_use_case;
mod login_use_case;
mod resolve_token_use_case;
mod session_use_case;
mod time_records_use_case;
mod users_use_case;

pub use jobsites_use_case::JobsitesUseCase;
pub use login_use_case::LoginUseCase;
pub use resolve_token_use_case::{ResolveTokenUseCase, ResolvedToken};
pub use session_use_case::SessionUseCase;
pub use time_records_use_case::TimeRecordsUseCase;
pub use users_use_case::UsersUseCase;
