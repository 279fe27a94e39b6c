use serde::{Deserialize, Serialize};

use super::{JobsiteId, UserId};

/// Physical work location employees clock time against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Jobsite {
    pub id: JobsiteId,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub supervisor_ids: Vec<UserId>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Jobsite {
    #[must_use]
    pub fn new(id: impl Into<JobsiteId>, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: city.into(),
            address: None,
            supervisor_ids: Vec::new(),
            active: true,
        }
    }

    #[must_use]
    pub fn with_supervisors(mut self, supervisors: impl IntoIterator<Item = UserId>) -> Self {
        self.supervisor_ids = supervisors.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub fn is_supervised_by(&self, user_id: UserId) -> bool {
        self.supervisor_ids.contains(&user_id)
    }

    /// `name (city)` label used in listings.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supervision() {
        let site = Jobsite::new(1_u64, "Harbor Tower", "Oakland").with_supervisors([UserId(4)]);
        assert!(site.is_supervised_by(UserId(4)));
        assert!(!site.is_supervised_by(UserId(5)));
        assert_eq!(site.label(), "Harbor Tower (Oakland)");
    }

    #[test]
    fn test_deserialize_mixed_ids() {
        let site: Jobsite = serde_json::from_str(
            r#"{"id":3,"name":"Depot","city":"Reno","supervisor_ids":["8",9]}"#,
        )
        .unwrap();
        assert_eq!(site.supervisor_ids, vec![UserId(8), UserId(9)]);
        assert!(site.active);
        assert_eq!(site.address, None);
    }
}
