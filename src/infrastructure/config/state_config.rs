use serde::{Deserialize, Serialize};

use crate::domain::entities::JobsiteId;

/// Values remembered between runs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Jobsite the last time record was logged against.
    #[serde(default)]
    pub last_jobsite_id: Option<JobsiteId>,

    /// Email of the last successful login.
    #[serde(default)]
    pub last_email: Option<String>,
}
