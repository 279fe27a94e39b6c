use bitflags::bitflags;

bitflags! {
    /// Capabilities a signed-in user may exercise on the client.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Permissions: u32 {
        const LOG_TIME = 1 << 0;
        const VIEW_OWN_TIME = 1 << 1;
        const REVIEW_TIME = 1 << 2;
        const VIEW_JOBSITE_TIME = 1 << 3;
        const MANAGE_USERS = 1 << 4;
        const MANAGE_ROLES = 1 << 5;
        const MANAGE_JOBSITES = 1 << 6;
        const VIEW_ALL_TIME = 1 << 7;
    }
}

impl Permissions {
    /// Baseline grants for anyone who clocks time.
    pub const EMPLOYEE: Self = Self::LOG_TIME.union(Self::VIEW_OWN_TIME);

    /// Employee grants plus review of supervised jobsites.
    pub const SUPERVISOR: Self = Self::EMPLOYEE
        .union(Self::REVIEW_TIME)
        .union(Self::VIEW_JOBSITE_TIME);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supervisor_includes_employee() {
        assert!(Permissions::SUPERVISOR.contains(Permissions::EMPLOYEE));
        assert!(!Permissions::SUPERVISOR.contains(Permissions::MANAGE_USERS));
    }
}
