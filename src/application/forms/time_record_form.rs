//! Time entry form.

use chrono::NaiveDate;

use super::fields::{max_chars, optional, parse_date, parse_hours, parse_id, parse_time, required};
use crate::domain::entities::{JobsiteId, TimeRecord, UserId};
use crate::domain::errors::ValidationErrors;
use crate::domain::ports::TimeRecordDraft;

const NOTES_MAX_CHARS: usize = 500;

/// Raw time entry input, one string per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRecordForm {
    pub jobsite_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub break_hours: String,
    pub notes: String,
}

impl TimeRecordForm {
    /// Prefills the form from an existing record for editing.
    #[must_use]
    pub fn from_record(record: &TimeRecord) -> Self {
        Self {
            jobsite_id: record.jobsite_id.to_string(),
            date: record.date.format("%Y-%m-%d").to_string(),
            start_time: record.start_time.format("%H:%M").to_string(),
            end_time: record.end_time.format("%H:%M").to_string(),
            break_hours: record.break_hours.to_string(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    /// Validates the form into a draft owned by `employee_id`.
    ///
    /// `today` bounds the date; entries for future days are rejected.
    ///
    /// # Errors
    /// Returns every failing field.
    pub fn validate(
        &self,
        employee_id: UserId,
        today: NaiveDate,
    ) -> Result<TimeRecordDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let jobsite_id = required(&mut errors, "jobsite_id", &self.jobsite_id).and_then(|raw| {
            let parsed = parse_id(raw);
            if parsed.is_none() {
                errors.add("jobsite_id", "must be a positive number");
            }
            parsed
        });

        let date = required(&mut errors, "date", &self.date).and_then(|raw| {
            match parse_date(raw) {
                Some(date) if date > today => {
                    errors.add("date", "must not be in the future");
                    None
                }
                Some(date) => Some(date),
                None => {
                    errors.add("date", "must be a date in YYYY-MM-DD format");
                    None
                }
            }
        });

        let start_time = required(&mut errors, "start_time", &self.start_time).and_then(|raw| {
            let parsed = parse_time(raw);
            if parsed.is_none() {
                errors.add("start_time", "must be a time such as 07:30 or 7:30 am");
            }
            parsed
        });

        let end_time = required(&mut errors, "end_time", &self.end_time).and_then(|raw| {
            let parsed = parse_time(raw);
            if parsed.is_none() {
                errors.add("end_time", "must be a time such as 16:00 or 4:00 pm");
            }
            parsed
        });

        if let (Some(start), Some(end)) = (start_time, end_time)
            && end <= start
        {
            errors.add("end_time", "must be after start time");
        }

        let break_hours = parse_hours(&self.break_hours);
        match (break_hours, start_time, end_time) {
            (None, _, _) => errors.add("break_hours", "must be a non-negative number"),
            (Some(hours), Some(start), Some(end)) if end > start => {
                #[allow(clippy::cast_precision_loss)]
                let shift = (end - start).num_minutes() as f64 / 60.0;
                if hours >= shift {
                    errors.add("break_hours", "must be shorter than the shift");
                }
            }
            _ => {}
        }

        let notes = optional(&self.notes);
        if let Some(notes) = notes {
            max_chars(&mut errors, "notes", notes, NOTES_MAX_CHARS);
        }

        match (jobsite_id, date, start_time, end_time, break_hours) {
            (Some(jobsite_id), Some(date), Some(start_time), Some(end_time), Some(break_hours))
                if errors.is_empty() =>
            {
                Ok(TimeRecordDraft {
                    employee_id,
                    jobsite_id: JobsiteId(jobsite_id),
                    date,
                    start_time,
                    end_time,
                    break_hours,
                    notes: notes.map(str::to_string),
                })
            }
            _ => Err(errors),
        }
    }
}
