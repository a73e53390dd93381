use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flexiplan")]
#[command(about = "Command line client for the Flexiplan routine planner")]
#[command(version)]
#[command(after_help = "Examples:
  flexiplan config set url http://localhost:8000   # Point at a server
  flexiplan auth login                             # Sign in
  flexiplan routine show                           # Today's activities
  flexiplan routine show --day friday              # Another day this week
  flexiplan routine complete \"Morning run\"         # Toggle completion
  flexiplan task list --format json                # Tasks as JSON

Environment Variables:
  FLEXIPLAN_URL   Server URL when none is configured
  FLEXIPLAN_LOG   Log filter, e.g. debug or flexiplan_core=trace")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration directory path
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Server URL, overriding the configuration file
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in, sign up, log out and show session status
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration management (show, set)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Browse and manage your hobbies
    Hobby {
        #[command(subcommand)]
        command: HobbyCommands,
    },
    /// Manage your tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Friends and friend requests
    Friend {
        #[command(subcommand)]
        command: FriendCommands,
    },
    /// Direct messages with friends
    Message {
        #[command(subcommand)]
        command: MessageCommands,
    },
    /// Chat with the planning assistant
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// View and update your weekly routine
    Routine {
        #[command(subcommand)]
        command: RoutineCommands,
    },
    /// Your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in and store the session
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Create a new account
    Signup,
    /// Remove the stored session
    Logout,
    /// Show whether a session is stored
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set a configuration value
    #[command(after_help = "Keys:
  url                  Server URL (http:// or https://)
  timeout_seconds      Request timeout, 0 for none
  credential_backend   keyring or file")]
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum HobbyCommands {
    /// List every available hobby
    Explore(FormatArgs),
    /// List your hobbies
    List(FormatArgs),
    /// Add a hobby by ID
    Add { hobby_id: i64 },
    /// Remove a hobby by ID
    Remove { hobby_id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct TaskArgs {
    /// Task name
    #[arg(long)]
    pub name: String,

    /// Optional description
    #[arg(long)]
    pub description: Option<String>,

    /// Time required, HH:MM or HH:MM:SS
    #[arg(long)]
    pub duration: Option<String>,

    /// Days the task applies to (repeat or comma-separate)
    #[arg(long = "day", value_delimiter = ',', required = true)]
    pub days: Vec<String>,

    /// Priority label
    #[arg(long, default_value = "Medium")]
    pub priority: String,

    /// Fixed start time, HH:MM or HH:MM:SS
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List your tasks
    List(FormatArgs),
    /// Add a task
    #[command(after_help = "Examples:
  flexiplan task add --name Study --duration 01:30 --day Monday,Wednesday
  flexiplan task add --name Standup --day Monday --at 09:30 --priority High")]
    Add(TaskArgs),
    /// Replace an existing task
    Update {
        task_id: i64,
        #[command(flatten)]
        task: TaskArgs,
    },
    /// Delete a task
    Remove { task_id: i64 },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RespondAction {
    Accept,
    Reject,
}

#[derive(Subcommand, Debug)]
pub enum FriendCommands {
    /// List your friends
    List(FormatArgs),
    /// List every user
    Users(FormatArgs),
    /// Pending requests sent to you
    Requests(FormatArgs),
    /// All friendships involving you
    Details(FormatArgs),
    /// Send a friend request to a user ID
    Send { user_id: i64 },
    /// Accept or reject a friend request
    Respond {
        request_id: i64,
        #[arg(value_enum)]
        action: RespondAction,
    },
    /// Remove a friend
    Remove { friend_id: i64 },
    /// Show a friend's weekly routine
    Routine {
        friend_id: i64,
        #[command(flatten)]
        format: FormatArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum MessageCommands {
    /// Show the conversation with a friend
    List {
        friend_id: i64,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Send a message to a friend
    Send { friend_id: i64, message: String },
    /// Mark a friend's messages as read
    Read { friend_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// Show the conversation with the assistant
    History(FormatArgs),
    /// Send a message to the assistant
    Send { message: String },
}

#[derive(Args, Debug, Clone)]
pub struct DayArgs {
    /// Day of the current week (defaults to today)
    #[arg(long)]
    pub day: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum RoutineCommands {
    /// Show the routine for a day or the whole week
    Show {
        #[command(flatten)]
        day: DayArgs,
        /// Show every day of the week
        #[arg(long, conflicts_with = "day")]
        week: bool,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Generate your first routine
    Generate,
    /// Regenerate your routine from today onward
    Regenerate,
    /// Toggle completion of an activity
    Complete {
        /// Activity name as shown by `routine show`
        activity: String,
        #[command(flatten)]
        day: DayArgs,
    },
    /// Remove an activity from the routine
    Remove {
        activity: String,
        #[command(flatten)]
        day: DayArgs,
    },
    /// Show completion and time analytics
    Analytics(FormatArgs),
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show your profile or another user's public profile
    Show {
        /// Look up a public profile instead of your own
        #[arg(long)]
        username: Option<String>,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Upload a new profile picture
    Upload { path: PathBuf },
}
