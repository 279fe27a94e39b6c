//! Input forms with field-level validation.

mod fields;
mod jobsite_form;
mod login_form;
mod review_form;
mod time_record_form;
mod user_form;

pub use fields::{is_valid_email, parse_date, parse_time};
pub use jobsite_form::JobsiteForm;
pub use login_form::LoginForm;
pub use review_form::ReviewForm;
pub use time_record_form::TimeRecordForm;
pub use user_form::{FormMode, UserForm, parse_roles};
