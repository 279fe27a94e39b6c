use super::app_config::LogLevel;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::entities::RecordStatus;

#[derive(Debug, Parser)]
#[command(
    name = "crewclock",
    version,
    about = "Log hours against jobsites and review crew time records",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL.
    #[arg(long, env = "CREWCLOCK_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Session token, used when the keyring holds none.
    #[arg(long, env = "CREWCLOCK_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token.
    Login {
        /// Account email; defaults to the last one used.
        #[arg(long)]
        email: Option<String>,
        /// Password; prompted for on stdin when omitted. The prompt echoes what
        /// you type, so prefer CREWCLOCK_PASSWORD on shared screens.
        #[arg(long, env = "CREWCLOCK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Keep the token for this run only.
        #[arg(long)]
        no_persist: bool,
    },
    /// Forget the stored session token.
    Logout,
    /// Show the signed-in user and what they may do.
    Whoami,
    /// Jobsite listing and administration.
    Jobsites {
        #[command(subcommand)]
        action: JobsiteCommand,
    },
    /// Time record logging and review.
    Records {
        #[command(subcommand)]
        action: RecordCommand,
    },
    /// User administration.
    Users {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Role listing.
    Roles {
        #[command(subcommand)]
        action: RoleCommand,
    },
    /// Hour totals over visible records.
    Summary(RecordFilterArgs),
}

#[derive(Debug, Subcommand)]
pub enum JobsiteCommand {
    /// List jobsites.
    List {
        /// Only jobsites you supervise.
        #[arg(long)]
        supervised: bool,
    },
    /// Create a jobsite.
    Add(JobsiteArgs),
    /// Change a jobsite; omitted fields keep their value.
    Edit {
        id: u64,
        #[command(flatten)]
        fields: JobsiteArgs,
    },
    /// Delete a jobsite.
    Remove { id: u64 },
}

#[derive(Debug, Clone, Default, Args)]
pub struct JobsiteArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// Comma separated supervisor user ids.
    #[arg(long, value_name = "IDS")]
    pub supervisors: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    /// List time records.
    List(RecordFilterArgs),
    /// Pending records you may review.
    Pending,
    /// Log hours for yourself.
    Log(RecordArgs),
    /// Change a record; omitted fields keep their value.
    Edit {
        id: u64,
        #[command(flatten)]
        fields: RecordArgs,
    },
    /// Delete a record.
    Remove { id: u64 },
    /// Approve a pending record.
    Approve {
        id: u64,
        #[arg(long)]
        note: Option<String>,
    },
    /// Deny a pending record; a reason is required.
    Deny {
        id: u64,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct RecordFilterArgs {
    #[arg(long, value_name = "USER_ID")]
    pub employee: Option<u64>,
    #[arg(long, value_name = "JOBSITE_ID")]
    pub jobsite: Option<u64>,
    #[arg(long)]
    pub status: Option<RecordStatus>,
    /// First day, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RecordArgs {
    /// Jobsite id; defaults to the last one logged against.
    #[arg(long)]
    pub jobsite: Option<String>,
    /// Work day (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<String>,
    /// Start time, e.g. 07:30 or 7:30am.
    #[arg(long)]
    pub start: Option<String>,
    /// End time, e.g. 16:00 or 4:00pm.
    #[arg(long)]
    pub end: Option<String>,
    /// Unpaid break in hours.
    #[arg(long = "break", value_name = "HOURS")]
    pub break_hours: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List users.
    List,
    /// Create a user.
    Add(UserArgs),
    /// Change a user; omitted fields keep their value.
    Edit {
        id: u64,
        #[command(flatten)]
        fields: UserArgs,
    },
    /// Delete a user.
    Remove { id: u64 },
    /// Replace a user's roles.
    Roles {
        id: u64,
        /// Comma separated role names.
        roles: String,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct UserArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Visible to other local users in the process list.
    #[arg(long)]
    pub password: Option<String>,
    /// Comma separated role names.
    #[arg(long)]
    pub roles: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// List roles.
    List,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_login_password_help_mentions_echo() {
        let command = CliArgs::command();
        let login = command.find_subcommand("login").unwrap();
        let password = login
            .get_arguments()
            .find(|arg| arg.get_id() == "password")
            .unwrap();

        let help = password.get_long_help().or(password.get_help()).unwrap().to_string();
        assert!(help.contains("echoes"));
        assert!(help.contains("CREWCLOCK_PASSWORD"));
    }

    #[test]
    fn test_parse_record_log() {
        let args = CliArgs::parse_from([
            "crewclock",
            "records",
            "log",
            "--jobsite",
            "4",
            "--start",
            "7:00am",
            "--end",
            "15:30",
            "--break",
            "0.5",
        ]);

        let Command::Records {
            action: RecordCommand::Log(fields),
        } = args.command
        else {
            panic!("expected records log");
        };
        assert_eq!(fields.jobsite.as_deref(), Some("4"));
        assert_eq!(fields.break_hours.as_deref(), Some("0.5"));
        assert_eq!(fields.date, None);
    }

    #[test]
    fn test_parse_summary_filter() {
        let args = CliArgs::parse_from([
            "crewclock",
            "summary",
            "--status",
            "approved",
            "--from",
            "2026-03-01",
        ]);

        let Command::Summary(filter) = args.command else {
            panic!("expected summary");
        };
        assert_eq!(filter.status, Some(RecordStatus::Approved));
        assert_eq!(NaiveDate::from_ymd_opt(2026, 3, 1), filter.from);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["crewclock", "whoami", "--log-level", "trace"]);
        assert_eq!(args.log_level, Some(LogLevel::Trace));
    }
}
