//! Executes parsed CLI commands against the use cases and prints the results.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use color_eyre::Section;
use color_eyre::eyre::{Report, Result, eyre};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::render;
use crate::application::dto::{LoginRequest, Session};
use crate::application::forms::{JobsiteForm, LoginForm, ReviewForm, TimeRecordForm, UserForm};
use crate::application::use_cases::{
    JobsitesUseCase, LoginUseCase, SessionUseCase, TimeRecordsUseCase, UsersUseCase,
};
use crate::domain::entities::{JobsiteId, TimeRecordId, UserId};
use crate::domain::errors::{ActionError, ApiError};
use crate::domain::ports::{
    AuthPort, DirectoryPort, JobsitePort, TimeRecordFilter, TimeRecordPort, TokenStoragePort,
};
use crate::infrastructure::config::{
    AppConfig, Command, DisplayConfig, JobsiteArgs, JobsiteCommand, RecordArgs, RecordCommand,
    RecordFilterArgs, RoleCommand, StorageManager, UserArgs, UserCommand,
};

/// Ports the runner is wired to.
pub struct Backend {
    pub auth: Arc<dyn AuthPort>,
    pub directory: Arc<dyn DirectoryPort>,
    pub jobsites: Arc<dyn JobsitePort>,
    pub records: Arc<dyn TimeRecordPort>,
    pub tokens: Arc<dyn TokenStoragePort>,
}

pub struct CommandRunner {
    login: LoginUseCase,
    session: SessionUseCase,
    jobsites: JobsitesUseCase,
    records: TimeRecordsUseCase,
    users: UsersUseCase,
    storage: StorageManager,
    display: DisplayConfig,
    persist_token: bool,
    cli_token: Option<String>,
}

impl CommandRunner {
    #[must_use]
    pub fn new(
        backend: Backend,
        storage: StorageManager,
        config: &AppConfig,
        cli_token: Option<String>,
    ) -> Self {
        Self {
            login: LoginUseCase::new(backend.auth.clone(), backend.tokens.clone()),
            session: SessionUseCase::new(backend.auth, backend.tokens),
            jobsites: JobsitesUseCase::new(backend.jobsites.clone()),
            records: TimeRecordsUseCase::new(backend.records, backend.jobsites),
            users: UsersUseCase::new(backend.directory),
            storage,
            display: config.display.clone(),
            persist_token: config.persist_token,
            cli_token,
        }
    }

    /// Runs one command to completion.
    ///
    /// # Errors
    /// Returns a report describing why the command failed.
    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Login {
                email,
                password,
                no_persist,
            } => self.login(email, password, no_persist).await,
            Command::Logout => {
                self.login.logout().await?;
                println!("Signed out.");
                Ok(())
            }
            Command::Whoami => {
                let session = self.start_session().await?;
                print!("{}", render::whoami(&session));
                Ok(())
            }
            Command::Jobsites { action } => self.jobsites(action).await,
            Command::Records { action } => self.records(action).await,
            Command::Users { action } => self.users(action).await,
            Command::Roles {
                action: RoleCommand::List,
            } => {
                let session = self.start_session().await?;
                let roles = self.users.list_roles(&session).await.map_err(report)?;
                print!("{}", render::roles_table(&roles));
                Ok(())
            }
            Command::Summary(filter) => {
                let session = self.start_session().await?;
                let summary = self
                    .records
                    .summary(&session, to_filter(&filter))
                    .await
                    .map_err(report)?;
                print!("{}", render::summary(&summary));
                Ok(())
            }
        }
    }

    async fn start_session(&self) -> Result<Session> {
        self.session
            .start(self.cli_token.clone())
            .await
            .map_err(|e| report(ActionError::Api(e)))
    }

    async fn login(
        &self,
        email: Option<String>,
        password: Option<String>,
        no_persist: bool,
    ) -> Result<()> {
        let email = match email {
            Some(email) => email,
            None => self.storage.load_state()?.last_email.unwrap_or_default(),
        };
        let password = match password {
            Some(password) => Zeroizing::new(password),
            None => prompt_password(&mut io::stdin().lock(), &mut io::stderr())?,
        };

        let mut request = LoginRequest::new(LoginForm::new(email, password.as_str()));
        if no_persist || !self.persist_token {
            request = request.without_persistence();
        }

        let response = self.login.execute(request).await.map_err(report)?;
        let user = &response.session.user;

        if let Err(e) = self
            .storage
            .update_state(|state| state.last_email = Some(user.email().to_string()))
        {
            warn!(error = %e, "Failed to remember login email");
        }

        println!("Signed in as {} <{}>.", user.full_name(), user.email());
        if !response.token_persisted {
            println!("Session token was not stored; pass --token or sign in again next time.");
        }
        Ok(())
    }

    async fn jobsites(&self, action: JobsiteCommand) -> Result<()> {
        let session = self.start_session().await?;
        match action {
            JobsiteCommand::List { supervised } => {
                let sites = if supervised {
                    self.jobsites.supervised(&session).await
                } else {
                    self.jobsites.list(&session).await
                }
                .map_err(report)?;
                print!("{}", render::jobsites_table(&sites));
            }
            JobsiteCommand::Add(fields) => {
                let form = fields.apply(JobsiteForm::default());
                let site = self
                    .jobsites
                    .create(&session, &form)
                    .await
                    .map_err(report)?;
                println!("Created jobsite #{} {}.", site.id, site.label());
            }
            JobsiteCommand::Edit { id, fields } => {
                let id = JobsiteId(id);
                let current = self.jobsites.get(&session, id).await.map_err(report)?;
                let form = fields.apply(JobsiteForm::from_jobsite(&current));
                let site = self
                    .jobsites
                    .update(&session, id, &form)
                    .await
                    .map_err(report)?;
                println!("Updated jobsite #{} {}.", site.id, site.label());
            }
            JobsiteCommand::Remove { id } => {
                self.jobsites
                    .delete(&session, JobsiteId(id))
                    .await
                    .map_err(report)?;
                println!("Deleted jobsite #{id}.");
            }
        }
        Ok(())
    }

    async fn records(&self, action: RecordCommand) -> Result<()> {
        let session = self.start_session().await?;
        let today = Local::now().date_naive();

        match action {
            RecordCommand::List(filter) => {
                let records = self
                    .records
                    .list(&session, to_filter(&filter))
                    .await
                    .map_err(report)?;
                let sites = self.jobsites.list(&session).await.map_err(report)?;
                print!("{}", render::records_table(&records, &sites, &self.display));
            }
            RecordCommand::Pending => {
                let records = self
                    .records
                    .pending_for_review(&session)
                    .await
                    .map_err(report)?;
                let sites = self.jobsites.list(&session).await.map_err(report)?;
                print!("{}", render::records_table(&records, &sites, &self.display));
            }
            RecordCommand::Log(fields) => {
                let form = self.new_record_form(fields, today)?;
                let record = self
                    .records
                    .log(&session, &form, today)
                    .await
                    .map_err(report)?;

                if let Err(e) = self
                    .storage
                    .update_state(|state| state.last_jobsite_id = Some(record.jobsite_id))
                {
                    warn!(error = %e, "Failed to remember jobsite");
                }
                println!(
                    "Logged {:.2} h on {} as record #{} ({}).",
                    record.total_hours(),
                    record.date.format(&self.display.date_format),
                    record.id,
                    record.status
                );
            }
            RecordCommand::Edit { id, fields } => {
                let id = TimeRecordId(id);
                let current = self.records.get(&session, id).await.map_err(report)?;
                let form = fields.apply(TimeRecordForm::from_record(&current));
                let record = self
                    .records
                    .update(&session, id, &form, today)
                    .await
                    .map_err(report)?;
                println!(
                    "Updated record #{} to {:.2} h.",
                    record.id,
                    record.total_hours()
                );
            }
            RecordCommand::Remove { id } => {
                self.records
                    .delete(&session, TimeRecordId(id))
                    .await
                    .map_err(report)?;
                println!("Deleted record #{id}.");
            }
            RecordCommand::Approve { id, note } => {
                let form = ReviewForm::approve(note.unwrap_or_default());
                let record = self
                    .records
                    .review(&session, TimeRecordId(id), &form)
                    .await
                    .map_err(report)?;
                println!("Record #{} is now {}.", record.id, record.status);
            }
            RecordCommand::Deny { id, note } => {
                let form = ReviewForm::deny(note.unwrap_or_default());
                let record = self
                    .records
                    .review(&session, TimeRecordId(id), &form)
                    .await
                    .map_err(report)?;
                println!("Record #{} is now {}.", record.id, record.status);
            }
        }
        Ok(())
    }

    async fn users(&self, action: UserCommand) -> Result<()> {
        let session = self.start_session().await?;
        match action {
            UserCommand::List => {
                let users = self.users.list(&session).await.map_err(report)?;
                print!("{}", render::users_table(&users));
            }
            UserCommand::Add(fields) => {
                let form = fields.apply(UserForm::default());
                let user = self.users.create(&session, &form).await.map_err(report)?;
                println!("Created user #{} {}.", user.id(), user.full_name());
            }
            UserCommand::Edit { id, fields } => {
                let id = UserId(id);
                let current = self.users.get(&session, id).await.map_err(report)?;
                let form = fields.apply(UserForm::from_user(&current));
                let user = self
                    .users
                    .update(&session, id, &form)
                    .await
                    .map_err(report)?;
                println!("Updated user #{} {}.", user.id(), user.full_name());
            }
            UserCommand::Remove { id } => {
                self.users
                    .delete(&session, UserId(id))
                    .await
                    .map_err(report)?;
                println!("Deleted user #{id}.");
            }
            UserCommand::Roles { id, roles } => {
                let user = self
                    .users
                    .set_roles(&session, UserId(id), &roles)
                    .await
                    .map_err(report)?;
                println!(
                    "User #{} now has roles: {}.",
                    user.id(),
                    render::role_list(user.roles())
                );
            }
        }
        Ok(())
    }

    fn new_record_form(&self, fields: RecordArgs, today: NaiveDate) -> Result<TimeRecordForm> {
        let mut form = TimeRecordForm {
            date: today.format("%Y-%m-%d").to_string(),
            ..TimeRecordForm::default()
        };
        if fields.jobsite.is_none()
            && let Some(last) = self.storage.load_state()?.last_jobsite_id
        {
            debug!(jobsite_id = %last, "Defaulting to last used jobsite");
            form.jobsite_id = last.to_string();
        }
        Ok(fields.apply(form))
    }
}

impl JobsiteArgs {
    fn apply(self, mut form: JobsiteForm) -> JobsiteForm {
        overwrite(&mut form.name, self.name);
        overwrite(&mut form.city, self.city);
        overwrite(&mut form.address, self.address);
        overwrite(&mut form.supervisor_ids, self.supervisors);
        form
    }
}

impl RecordArgs {
    fn apply(self, mut form: TimeRecordForm) -> TimeRecordForm {
        overwrite(&mut form.jobsite_id, self.jobsite);
        overwrite(&mut form.date, self.date);
        overwrite(&mut form.start_time, self.start);
        overwrite(&mut form.end_time, self.end);
        overwrite(&mut form.break_hours, self.break_hours);
        overwrite(&mut form.notes, self.notes);
        form
    }
}

impl UserArgs {
    fn apply(self, mut form: UserForm) -> UserForm {
        overwrite(&mut form.first_name, self.first_name);
        overwrite(&mut form.last_name, self.last_name);
        overwrite(&mut form.email, self.email);
        overwrite(&mut form.roles, self.roles);
        if let Some(password) = self.password {
            form.password = Zeroizing::new(password);
        }
        form
    }
}

fn overwrite(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn to_filter(args: &RecordFilterArgs) -> TimeRecordFilter {
    TimeRecordFilter {
        employee_id: args.employee.map(UserId),
        jobsite_id: args.jobsite.map(JobsiteId),
        status: args.status,
        from: args.from,
        to: args.to,
    }
}

/// Typed characters are echoed; there is no terminal control here.
const PASSWORD_PROMPT: &str = "Password (input is visible, set CREWCLOCK_PASSWORD to skip): ";

fn prompt_password(input: &mut impl BufRead, prompt: &mut impl Write) -> Result<Zeroizing<String>> {
    prompt.write_all(PASSWORD_PROMPT.as_bytes())?;
    prompt.flush()?;
    let mut line = Zeroizing::new(String::new());
    input.read_line(&mut line)?;
    let trimmed = Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_string());
    Ok(trimmed)
}

/// Turns a failed action into a report with field details and a next step.
fn report(error: ActionError) -> Report {
    if let Some(errors) = error.validation_errors() {
        let details: Vec<String> = errors
            .iter()
            .map(|(field, messages)| format!("  {field}: {}", messages.join(", ")))
            .collect();
        return eyre!("invalid input\n{}", details.join("\n"));
    }

    let suggestion = match &error {
        ActionError::Api(api) if api.requires_login() => {
            Some("run `crewclock login` to start a new session".to_string())
        }
        ActionError::Api(ApiError::RateLimited { retry_after_ms }) => Some(format!(
            "try again in {} seconds",
            retry_after_ms.div_ceil(1000)
        )),
        ActionError::Api(api) if api.is_network_error() => {
            Some("check --api-url and your network connection".to_string())
        }
        _ => None,
    };

    let report = Report::new(error);
    match suggestion {
        Some(suggestion) => report.suggestion(suggestion),
        None => report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ValidationErrors;

    #[test]
    fn test_password_prompt_warns_about_echo() {
        let mut input = io::Cursor::new("s3cret pass\r\n");
        let mut prompt = Vec::new();

        let password = prompt_password(&mut input, &mut prompt).unwrap();

        assert_eq!(password.as_str(), "s3cret pass");
        let shown = String::from_utf8(prompt).unwrap();
        assert!(shown.contains("input is visible"));
        assert!(shown.contains("CREWCLOCK_PASSWORD"));
    }

    #[test]
    fn test_record_args_overwrite_only_given_fields() {
        let form = TimeRecordForm {
            jobsite_id: "3".into(),
            date: "2026-03-02".into(),
            start_time: "07:00".into(),
            end_time: "15:00".into(),
            break_hours: "0.5".into(),
            notes: "concrete pour".into(),
        };
        let args = RecordArgs {
            end: Some("16:00".into()),
            notes: Some(String::new()),
            ..RecordArgs::default()
        };

        let form = args.apply(form);

        assert_eq!(form.end_time, "16:00");
        assert_eq!(form.start_time, "07:00");
        assert_eq!(form.notes, "");
    }

    #[test]
    fn test_user_args_set_password() {
        let args = UserArgs {
            password: Some("new-secret-1".into()),
            ..UserArgs::default()
        };
        let form = args.apply(UserForm::default());
        assert_eq!(form.password.as_str(), "new-secret-1");
    }

    #[test]
    fn test_to_filter() {
        let filter = to_filter(&RecordFilterArgs {
            employee: Some(4),
            jobsite: Some(9),
            ..RecordFilterArgs::default()
        });
        assert_eq!(filter.employee_id, Some(UserId(4)));
        assert_eq!(filter.jobsite_id, Some(JobsiteId(9)));
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_report_lists_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("end_time", "must be after start time");
        errors.add("date", "must not be in the future");

        let report = report(ActionError::Validation(errors));
        let text = report.to_string();

        assert!(text.contains("  date: must not be in the future"));
        assert!(text.contains("  end_time: must be after start time"));
    }

    #[test]
    fn test_report_keeps_forbidden_message() {
        let report = report(ActionError::forbidden("manage users"));
        assert_eq!(report.to_string(), "not permitted: manage users");
    }
}
