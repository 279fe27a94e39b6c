//! Domain entity definitions.

mod id;
mod jobsite;
mod permissions;
mod role;
mod time_record;
mod token;
mod user;

pub use id::{JobsiteId, RoleId, TimeRecordId, UserId};
pub use jobsite::Jobsite;
pub use permissions::Permissions;
pub use role::{Role, RoleName};
pub use time_record::{RecordStatus, TimeRecord, round_hours, shift_hours};
pub use token::AuthToken;
pub use user::User;
