mod auth_port;
mod directory_port;
mod jobsite_port;
mod time_record_port;
mod token_storage_port;

pub use auth_port::{AuthPort, Credentials, LoginGrant};
pub use directory_port::{DirectoryPort, UserDraft};
pub use jobsite_port::{JobsiteDraft, JobsitePort};
pub use time_record_port::{
    Review, ReviewDecision, TimeRecordDraft, TimeRecordFilter, TimeRecordPort,
};
pub use token_storage_port::TokenStoragePort;
