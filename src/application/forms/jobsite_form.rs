use super::fields::{max_chars, optional, parse_id_list, required};
use crate::domain::entities::{Jobsite, UserId};
use crate::domain::errors::ValidationErrors;
use crate::domain::ports::JobsiteDraft;

const NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobsiteForm {
    pub name: String,
    pub city: String,
    pub address: String,
    /// Comma separated user ids.
    pub supervisor_ids: String,
}

impl JobsiteForm {
    #[must_use]
    pub fn from_jobsite(jobsite: &Jobsite) -> Self {
        Self {
            name: jobsite.name.clone(),
            city: jobsite.city.clone(),
            address: jobsite.address.clone().unwrap_or_default(),
            supervisor_ids: jobsite
                .supervisor_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// # Errors
    /// Returns every failing field.
    pub fn validate(&self) -> Result<JobsiteDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required(&mut errors, "name", &self.name);
        if let Some(name) = name {
            max_chars(&mut errors, "name", name, NAME_MAX_CHARS);
        }

        let city = required(&mut errors, "city", &self.city);
        if let Some(city) = city {
            max_chars(&mut errors, "city", city, NAME_MAX_CHARS);
        }

        let mut supervisor_ids = match parse_id_list(&self.supervisor_ids) {
            Ok(ids) => ids.into_iter().map(UserId).collect::<Vec<_>>(),
            Err(message) => {
                errors.add("supervisor_ids", message);
                Vec::new()
            }
        };
        supervisor_ids.sort_unstable();
        supervisor_ids.dedup();

        let draft = JobsiteDraft {
            name: name.unwrap_or_default().to_string(),
            city: city.unwrap_or_default().to_string(),
            address: optional(&self.address).map(str::to_string),
            supervisor_ids,
        };
        errors.into_result(draft)
    }
}
