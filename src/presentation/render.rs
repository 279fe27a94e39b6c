//! Text rendering of entities for terminal output.

use std::collections::HashMap;
use std::fmt::Write as _;

use super::table::{Align, Table};
use crate::application::dto::Session;
use crate::application::services::HoursSummary;
use crate::domain::entities::{
    Jobsite, JobsiteId, Permissions, Role, RoleName, TimeRecord, User,
};
use crate::infrastructure::config::DisplayConfig;

const NOTES_WIDTH: usize = 32;

#[must_use]
pub fn role_list(roles: &[RoleName]) -> String {
    if roles.is_empty() {
        return "none".to_string();
    }
    roles
        .iter()
        .map(RoleName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn hours(value: f64) -> String {
    format!("{value:.2}")
}

#[must_use]
pub fn whoami(session: &Session) -> String {
    let user = &session.user;
    let domain = session.domain();

    let capabilities: Vec<&str> = [
        (domain.can_log_time(), "log time"),
        (
            domain.permissions().contains(Permissions::REVIEW_TIME),
            "review time",
        ),
        (domain.can_view_all_time(), "view all time"),
        (domain.can_manage_jobsites(), "manage jobsites"),
        (domain.can_manage_users(), "manage users"),
        (domain.can_manage_roles(), "assign roles"),
    ]
    .into_iter()
    .filter_map(|(allowed, label)| allowed.then_some(label))
    .collect();

    let mut out = String::new();
    let _ = writeln!(out, "User:   #{} {}", user.id(), user.full_name());
    let _ = writeln!(out, "Email:  {}", user.email());
    let _ = writeln!(out, "Roles:  {}", role_list(user.roles()));
    if !user.is_active() {
        let _ = writeln!(out, "Status: inactive");
    }
    let _ = writeln!(
        out,
        "Can:    {}",
        if capabilities.is_empty() {
            "nothing".to_string()
        } else {
            capabilities.join(", ")
        }
    );
    let _ = writeln!(out, "Token:  {} ({})", session.token.masked(), session.source);
    out
}

#[must_use]
pub fn roles_table(roles: &[Role]) -> String {
    let mut table = Table::new(["ID", "ROLE", "DESCRIPTION"]).align(0, Align::Right);
    for role in roles {
        table.push([
            role.id.to_string(),
            role.name.to_string(),
            role.description.clone().unwrap_or_default(),
        ]);
    }
    table.to_string()
}

#[must_use]
pub fn jobsites_table(sites: &[Jobsite]) -> String {
    if sites.is_empty() {
        return "No jobsites.\n".to_string();
    }

    let mut table = Table::new(["ID", "NAME", "CITY", "ADDRESS", "SUPERVISORS", "ACTIVE"])
        .align(0, Align::Right)
        .max_width(3, NOTES_WIDTH);
    for site in sites {
        table.push([
            site.id.to_string(),
            site.name.clone(),
            site.city.clone(),
            site.address.clone().unwrap_or_default(),
            site.supervisor_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
            yes_no(site.active).to_string(),
        ]);
    }
    table.to_string()
}

#[must_use]
pub fn users_table(users: &[User]) -> String {
    let mut table =
        Table::new(["ID", "NAME", "EMAIL", "ROLES", "ACTIVE"]).align(0, Align::Right);
    for user in users {
        table.push([
            user.id().to_string(),
            user.full_name(),
            user.email().to_string(),
            role_list(user.roles()),
            yes_no(user.is_active()).to_string(),
        ]);
    }
    table.to_string()
}

/// Record listing followed by the hour total of non-denied records.
#[must_use]
pub fn records_table(records: &[TimeRecord], sites: &[Jobsite], display: &DisplayConfig) -> String {
    if records.is_empty() {
        return "No time records.\n".to_string();
    }

    let names: HashMap<JobsiteId, &str> = sites
        .iter()
        .map(|site| (site.id, site.name.as_str()))
        .collect();

    let mut table = Table::new([
        "ID", "DATE", "EMPLOYEE", "JOBSITE", "START", "END", "BREAK", "HOURS", "STATUS", "NOTES",
    ])
    .align(0, Align::Right)
    .align(2, Align::Right)
    .align(6, Align::Right)
    .align(7, Align::Right)
    .max_width(9, NOTES_WIDTH);

    for record in records {
        let jobsite = names
            .get(&record.jobsite_id)
            .map_or_else(|| format!("#{}", record.jobsite_id), |name| (*name).to_string());
        table.push([
            record.id.to_string(),
            record.date.format(&display.date_format).to_string(),
            record.employee_id.to_string(),
            jobsite,
            record.start_time.format(&display.time_format).to_string(),
            record.end_time.format(&display.time_format).to_string(),
            hours(record.break_hours),
            hours(record.total_hours()),
            record.status.to_string(),
            record
                .review_note
                .as_ref()
                .or(record.notes.as_ref())
                .cloned()
                .unwrap_or_default(),
        ]);
    }

    let summary = HoursSummary::from_records(records);
    format!(
        "{table}\n{} records, {} h (approved {} h, pending {} h)\n",
        summary.record_count,
        hours(summary.total_hours()),
        hours(summary.approved_hours),
        hours(summary.pending_hours),
    )
}

#[must_use]
pub fn summary(summary: &HoursSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Records:  {}", summary.record_count);
    let _ = writeln!(out, "Total:    {} h", hours(summary.total_hours()));
    let _ = writeln!(out, "Approved: {} h", hours(summary.approved_hours));
    let _ = writeln!(out, "Pending:  {} h", hours(summary.pending_hours));
    let _ = writeln!(out, "Denied:   {} h (not counted)", hours(summary.denied_hours));

    if summary.by_employee.is_empty() {
        return out;
    }

    let mut employees = Table::new(["EMPLOYEE", "HOURS"]).align(1, Align::Right);
    for (id, value) in &summary.by_employee {
        employees.push([id.to_string(), hours(*value)]);
    }
    let mut jobsites = Table::new(["JOBSITE", "HOURS"]).align(1, Align::Right);
    for (id, value) in &summary.by_jobsite {
        jobsites.push([id.to_string(), hours(*value)]);
    }
    let mut weeks = Table::new(["WEEK", "HOURS"]).align(1, Align::Right);
    for ((year, week), value) in &summary.by_week {
        weeks.push([format!("{year}-W{week:02}"), hours(*value)]);
    }

    let _ = write!(out, "\n{employees}\n{jobsites}\n{weeks}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::TokenSource;
    use crate::domain::entities::{AuthToken, RecordStatus, TimeRecordId, UserId};
    use chrono::{NaiveDate, NaiveTime};

    fn record(id: u64, status: RecordStatus, notes: Option<&str>) -> TimeRecord {
        TimeRecord {
            id: TimeRecordId(id),
            employee_id: UserId(3),
            jobsite_id: JobsiteId(10),
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
            break_hours: 0.5,
            status,
            notes: notes.map(str::to_string),
            reviewed_by: None,
            review_note: None,
        }
    }

    #[test]
    fn test_records_table_uses_jobsite_names_and_formats() {
        let records = [
            record(1, RecordStatus::Approved, Some("framing")),
            record(2, RecordStatus::Denied, None),
        ];
        let sites = [Jobsite::new(10_u64, "Depot", "Leeds")];
        let display = DisplayConfig {
            date_format: "%d/%m".into(),
            time_format: "%H:%M".into(),
        };

        let text = records_table(&records, &sites, &display);

        assert!(text.contains("09/03"));
        assert!(text.contains("Depot"));
        assert!(text.contains("framing"));
        assert!(text.contains("2 records, 8.00 h (approved 8.00 h, pending 0.00 h)"));
    }

    #[test]
    fn test_unknown_jobsite_falls_back_to_id() {
        let text = records_table(
            &[record(1, RecordStatus::Pending, None)],
            &[],
            &DisplayConfig::default(),
        );
        assert!(text.contains("#10"));
    }

    #[test]
    fn test_empty_listings() {
        assert_eq!(records_table(&[], &[], &DisplayConfig::default()), "No time records.\n");
        assert_eq!(jobsites_table(&[]), "No jobsites.\n");
    }

    #[test]
    fn test_whoami_masks_token() {
        let session = Session::new(
            AuthToken::new_unchecked("eyJhbGciOiJIUzI1NiJ9.secret-part.dXJl"),
            User::new(3_u64, "Rosa", "Diaz", "rosa@example.com").with_roles([RoleName::Supervisor]),
            TokenSource::Keyring,
        );

        let text = whoami(&session);

        assert!(text.contains("Rosa Diaz"));
        assert!(text.contains("Supervisor"));
        assert!(text.contains("review time"));
        assert!(!text.contains("manage users"));
        assert!(!text.contains("secret-part"));
        assert!(text.contains("system keyring"));
    }

    #[test]
    fn test_summary_lists_weeks() {
        let summary = HoursSummary::from_records(&[record(1, RecordStatus::Pending, None)]);
        let text = super::summary(&summary);
        assert!(text.contains("Pending:  8.00 h"));
        assert!(text.contains("2026-W11"));
    }

    #[test]
    fn test_role_list() {
        assert_eq!(role_list(&[]), "none");
        assert_eq!(
            role_list(&[RoleName::Admin, RoleName::Other("Auditor".into())]),
            "Admin, Auditor"
        );
    }
}
