use crate::domain::entities::{Jobsite, Permissions, RoleName, TimeRecord, User};

/// Role-based predicates for the signed-in user.
///
/// The backend stays authoritative; these checks decide what the client
/// offers and stop obviously forbidden requests before they are sent.
#[derive(Debug, Clone, Copy)]
pub struct UserDomain<'a> {
    user: &'a User,
    permissions: Permissions,
}

impl<'a> UserDomain<'a> {
    #[must_use]
    pub fn new(user: &'a User) -> Self {
        let permissions = if user.is_active() {
            user.permissions()
        } else {
            Permissions::empty()
        };

        Self { user, permissions }
    }

    #[must_use]
    pub const fn user(&self) -> &'a User {
        self.user
    }

    #[must_use]
    pub const fn permissions(&self) -> Permissions {
        self.permissions
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.has_role(&RoleName::Admin)
    }

    #[must_use]
    pub fn is_supervisor(&self) -> bool {
        self.user.has_role(&RoleName::Supervisor)
    }

    #[must_use]
    pub fn is_employee(&self) -> bool {
        self.user.has_role(&RoleName::Employee)
    }

    #[must_use]
    pub const fn can_manage_users(&self) -> bool {
        self.permissions.contains(Permissions::MANAGE_USERS)
    }

    #[must_use]
    pub const fn can_manage_roles(&self) -> bool {
        self.permissions.contains(Permissions::MANAGE_ROLES)
    }

    #[must_use]
    pub const fn can_manage_jobsites(&self) -> bool {
        self.permissions.contains(Permissions::MANAGE_JOBSITES)
    }

    #[must_use]
    pub const fn can_log_time(&self) -> bool {
        self.permissions.contains(Permissions::LOG_TIME)
    }

    #[must_use]
    pub const fn can_view_all_time(&self) -> bool {
        self.permissions.contains(Permissions::VIEW_ALL_TIME)
    }

    #[must_use]
    pub fn supervises(&self, jobsite: &Jobsite) -> bool {
        jobsite.is_supervised_by(self.user.id())
    }

    #[must_use]
    pub fn can_view_record(&self, record: &TimeRecord, jobsite: Option<&Jobsite>) -> bool {
        if self.can_view_all_time() {
            return true;
        }

        if record.belongs_to(self.user.id()) {
            return self.permissions.contains(Permissions::VIEW_OWN_TIME);
        }

        self.permissions.contains(Permissions::VIEW_JOBSITE_TIME)
            && jobsite.is_some_and(|site| site.id == record.jobsite_id && self.supervises(site))
    }

    /// Pending records only; supervisors may not approve their own time.
    #[must_use]
    pub fn can_review_record(&self, record: &TimeRecord, jobsite: &Jobsite) -> bool {
        if !record.is_pending() || jobsite.id != record.jobsite_id {
            return false;
        }

        if self.is_admin() && self.can_view_all_time() {
            return true;
        }

        self.permissions.contains(Permissions::REVIEW_TIME)
            && self.supervises(jobsite)
            && !record.belongs_to(self.user.id())
    }

    #[must_use]
    pub fn can_edit_record(&self, record: &TimeRecord) -> bool {
        if self.can_view_all_time() {
            return true;
        }

        self.can_log_time() && record.belongs_to(self.user.id()) && record.is_pending()
    }

    #[must_use]
    pub fn can_delete_record(&self, record: &TimeRecord) -> bool {
        self.can_edit_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{JobsiteId, RecordStatus, TimeRecordId, UserId};
    use chrono::{NaiveDate, NaiveTime};
    use test_case::test_case;

    const ADMIN: u64 = 1;
    const SUPERVISOR: u64 = 2;
    const EMPLOYEE: u64 = 3;

    fn user(id: u64, roles: &[RoleName]) -> User {
        User::new(id, "First", "Last", format!("user{id}@example.com")).with_roles(roles.to_vec())
    }

    fn site() -> Jobsite {
        Jobsite::new(10_u64, "North Yard", "Tacoma").with_supervisors([UserId(SUPERVISOR)])
    }

    fn record(employee: u64, status: RecordStatus) -> TimeRecord {
        TimeRecord {
            id: TimeRecordId(100),
            employee_id: UserId(employee),
            jobsite_id: JobsiteId(10),
            date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            break_hours: 0.5,
            status,
            notes: None,
            reviewed_by: None,
            review_note: None,
        }
    }

    #[test]
    fn test_role_predicates() {
        let admin = user(ADMIN, &[RoleName::Admin]);
        let domain = UserDomain::new(&admin);
        assert!(domain.is_admin());
        assert!(!domain.is_supervisor());
        assert!(domain.can_manage_users());
        assert!(domain.can_manage_roles());
        assert!(domain.can_manage_jobsites());
        assert!(domain.can_log_time());

        let employee = user(EMPLOYEE, &[RoleName::Employee]);
        let domain = UserDomain::new(&employee);
        assert!(domain.is_employee());
        assert!(!domain.can_manage_users());
        assert!(!domain.can_manage_jobsites());
        assert!(domain.can_log_time());
    }

    #[test]
    fn test_inactive_user_has_no_permissions() {
        let admin = user(ADMIN, &[RoleName::Admin]).with_active(false);
        let domain = UserDomain::new(&admin);
        assert!(domain.permissions().is_empty());
        assert!(!domain.can_manage_users());
    }

    #[test]
    fn test_unknown_role_grants_nothing() {
        let foreman = user(9, &[RoleName::Other("Foreman".into())]);
        assert!(!UserDomain::new(&foreman).can_log_time());
    }

    #[test_case(ADMIN, &[RoleName::Admin], EMPLOYEE, RecordStatus::Pending, true ; "admin_reviews_any_pending")]
    #[test_case(ADMIN, &[RoleName::Admin], EMPLOYEE, RecordStatus::Approved, false ; "admin_cannot_rereview")]
    #[test_case(SUPERVISOR, &[RoleName::Supervisor], EMPLOYEE, RecordStatus::Pending, true ; "supervisor_reviews_own_site")]
    #[test_case(SUPERVISOR, &[RoleName::Supervisor], SUPERVISOR, RecordStatus::Pending, false ; "supervisor_no_self_approval")]
    #[test_case(4, &[RoleName::Supervisor], EMPLOYEE, RecordStatus::Pending, false ; "supervisor_of_other_site")]
    #[test_case(EMPLOYEE, &[RoleName::Employee], 5, RecordStatus::Pending, false ; "employee_cannot_review")]
    fn test_can_review_record(
        actor: u64,
        roles: &[RoleName],
        owner: u64,
        status: RecordStatus,
        expected: bool,
    ) {
        let actor = user(actor, roles);
        let domain = UserDomain::new(&actor);
        assert_eq!(domain.can_review_record(&record(owner, status), &site()), expected);
    }

    #[test]
    fn test_review_requires_matching_jobsite() {
        let supervisor = user(SUPERVISOR, &[RoleName::Supervisor]);
        let other_site = Jobsite::new(11_u64, "South Yard", "Tacoma")
            .with_supervisors([UserId(SUPERVISOR)]);
        let domain = UserDomain::new(&supervisor);
        assert!(!domain.can_review_record(&record(EMPLOYEE, RecordStatus::Pending), &other_site));
    }

    #[test_case(EMPLOYEE, &[RoleName::Employee], EMPLOYEE, RecordStatus::Pending, true ; "owner_pending")]
    #[test_case(EMPLOYEE, &[RoleName::Employee], EMPLOYEE, RecordStatus::Approved, false ; "owner_after_review")]
    #[test_case(EMPLOYEE, &[RoleName::Employee], 5, RecordStatus::Pending, false ; "someone_elses")]
    #[test_case(SUPERVISOR, &[RoleName::Supervisor], EMPLOYEE, RecordStatus::Pending, false ; "supervisor_cannot_edit_crew")]
    #[test_case(ADMIN, &[RoleName::Admin], EMPLOYEE, RecordStatus::Denied, true ; "admin_always")]
    fn test_can_edit_record(
        actor: u64,
        roles: &[RoleName],
        owner: u64,
        status: RecordStatus,
        expected: bool,
    ) {
        let actor = user(actor, roles);
        let domain = UserDomain::new(&actor);
        let record = record(owner, status);
        assert_eq!(domain.can_edit_record(&record), expected);
        assert_eq!(domain.can_delete_record(&record), expected);
    }

    #[test]
    fn test_can_view_record() {
        let employee = user(EMPLOYEE, &[RoleName::Employee]);
        let supervisor = user(SUPERVISOR, &[RoleName::Supervisor]);
        let outsider = user(4, &[RoleName::Supervisor]);
        let crew_record = record(EMPLOYEE, RecordStatus::Approved);

        assert!(UserDomain::new(&employee).can_view_record(&crew_record, None));
        assert!(UserDomain::new(&supervisor).can_view_record(&crew_record, Some(&site())));
        assert!(!UserDomain::new(&supervisor).can_view_record(&crew_record, None));
        assert!(!UserDomain::new(&outsider).can_view_record(&crew_record, Some(&site())));
        assert!(!UserDomain::new(&employee).can_view_record(&record(5, RecordStatus::Pending), None));
    }
}
