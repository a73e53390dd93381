use crate::cli::main_types::{
    AgentCommands, AuthCommands, ConfigCommands, FriendCommands, HobbyCommands, MessageCommands,
    OutputFormat, ProfileCommands, RespondAction, RoutineCommands, TaskArgs, TaskCommands,
};
use flexiplan_core::api::client::FlexiplanClient;
use flexiplan_core::api::models::{FriendRequestAction, TaskFormData, User};
use flexiplan_core::core::auth::{LoginInput, SignupInput};
use flexiplan_core::core::services::auth_service::AuthService;
use flexiplan_core::core::services::config_service::ConfigService;
use flexiplan_core::core::services::routine_service::RoutineService;
use flexiplan_core::core::session::SessionState;
use flexiplan_core::core::week::{DAYS, WeekCursor};
use flexiplan_core::display::{ProgressSpinner, TableDisplay, display_operation_result};
use flexiplan_core::error::{AppError, CliError};
use flexiplan_core::storage::config::CredentialBackend;
use flexiplan_core::utils::logging::print_verbose;
use flexiplan_core::utils::validation::{validate_required, validate_time_of_day};
use serde::Serialize;
use std::path::PathBuf;

fn table_display() -> TableDisplay {
    TableDisplay::new().with_colors(atty::is(atty::Stream::Stdout))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let output = serde_json::to_string_pretty(value).map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to serialize result to JSON: {}",
            e
        )))
    })?;
    println!("{}", output);
    Ok(())
}

fn current_user_id(client: &FlexiplanClient) -> Result<i64, AppError> {
    Ok(client.session_state()?.require_user_id()?)
}

/// Cursor on today, or on the named day of the current week
fn cursor_for(day: Option<&str>) -> Result<WeekCursor, AppError> {
    let mut cursor = WeekCursor::today();
    if let Some(day) = day {
        if !cursor.select(day) {
            return Err(AppError::Cli(CliError::InvalidArguments(format!(
                "Unknown day '{}', expected one of: {}",
                day,
                DAYS.join(", ")
            ))));
        }
    }
    Ok(cursor)
}

/// `HH:MM` becomes `HH:MM:SS`
fn normalize_time(field: &str, value: &str) -> Result<String, AppError> {
    validate_time_of_day(field, value)?;
    if value.matches(':').count() == 1 {
        Ok(format!("{}:00", value))
    } else {
        Ok(value.to_string())
    }
}

fn task_form(args: TaskArgs) -> Result<TaskFormData, AppError> {
    validate_required("Task name", &args.name)?;

    let mut days = Vec::with_capacity(args.days.len());
    for day in &args.days {
        let day = day.trim();
        let canonical = DAYS
            .iter()
            .find(|d| d.eq_ignore_ascii_case(day))
            .ok_or_else(|| {
                AppError::Cli(CliError::InvalidArguments(format!(
                    "Unknown day '{}', expected one of: {}",
                    day,
                    DAYS.join(", ")
                )))
            })?;
        if !days.contains(&canonical.to_string()) {
            days.push(canonical.to_string());
        }
    }

    let time_required = args
        .duration
        .as_deref()
        .map(|d| normalize_time("duration", d))
        .transpose()?;
    let fixed_time_slot = args
        .at
        .as_deref()
        .map(|t| normalize_time("fixed time", t))
        .transpose()?;

    Ok(TaskFormData {
        task_name: args.name.trim().to_string(),
        description: args.description.filter(|d| !d.trim().is_empty()),
        time_required,
        days_associated: days,
        priority: args.priority,
        is_fixed_time: fixed_time_slot.is_some(),
        fixed_time_slot,
    })
}

fn print_user(user: &User) {
    println!("Profile:");
    println!("========");
    println!("  ID: {}", user.id);
    println!("  Username: {}", user.username);
    let name = user.full_name();
    if !name.is_empty() {
        println!("  Name: {}", name);
    }
    if let Some(email) = &user.email {
        println!("  Email: {}", email);
    }
    if let Some(picture) = &user.profile_picture {
        println!("  Picture: {}", picture);
    }
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: ConfigCommands,
        config_service: &mut ConfigService,
        config_file: PathBuf,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command using ConfigService");

                println!("Current Configuration:");
                println!("=====================");
                println!("Config file: {}", config_file.display());

                match config_service.get_url() {
                    Some(url) => println!("Server URL: ✅ {}", url),
                    None => println!("Server URL: ❌ Not set"),
                }
                match config_service.timeout() {
                    Some(timeout) => println!("Timeout: {}s", timeout.as_secs()),
                    None => println!("Timeout: none"),
                }
                println!(
                    "Credential storage: {}",
                    config_service.credential_backend()
                );
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                print_verbose(
                    verbose,
                    &format!("Attempting config set using ConfigService - {} = {}", key, value),
                );

                config_service.set(&key, &value)?;
                config_service.save_config(Some(config_file))?;
                println!("✅ Set {} to: {}", key, value);
                println!("Configuration saved successfully.");
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct AuthHandler;

impl AuthHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: AuthCommands,
        service: AuthService,
        backend: CredentialBackend,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            AuthCommands::Login { username } => {
                print_verbose(verbose, "Collecting login credentials");
                let input = LoginInput::collect(username.as_deref())?;

                let mut spinner = ProgressSpinner::new("Logging in...");
                spinner.start();
                match service.authenticate(input).await {
                    Ok(response) => {
                        spinner.stop(None);
                        println!("✅ Logged in as {}", response.user.username);
                        Ok(())
                    }
                    Err(e) => {
                        spinner.stop(None);
                        Err(e)
                    }
                }
            }
            AuthCommands::Signup => {
                print_verbose(verbose, "Collecting signup details");
                let input = SignupInput::collect()?;
                let message = service.register(input).await?;
                println!("✅ {}", message);
                println!("You can now run 'flexiplan auth login'.");
                Ok(())
            }
            AuthCommands::Logout => {
                let result = service.logout().await;
                display_operation_result(&result, "Logged out", "Logout failed");
                result
            }
            AuthCommands::Status => {
                let status = service.status(backend)?;

                println!("Authentication Status:");
                println!("=====================");
                match &status.state {
                    SessionState::LoggedIn { user_id, username } => {
                        println!("✅ Logged in as {} (user {})", username, user_id);
                    }
                    SessionState::LoggedOut => println!("❌ Not logged in"),
                }
                match &status.server_url {
                    Some(url) => println!("Server: {}", url),
                    None => println!("Server: not configured"),
                }
                println!("Credential storage: {}", status.credential_backend);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct HobbyHandler;

impl HobbyHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: HobbyCommands,
        client: FlexiplanClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            HobbyCommands::Explore(args) => {
                print_verbose(verbose, "Fetching all hobbies");
                let hobbies = client.fetch_hobbies().await?;
                match args.format {
                    OutputFormat::Json => print_json(&hobbies)?,
                    OutputFormat::Table => println!("{}", table_display().render_hobbies(&hobbies)),
                }
                Ok(())
            }
            HobbyCommands::List(args) => {
                let user_id = current_user_id(&client)?;
                print_verbose(verbose, &format!("Fetching hobbies for user {}", user_id));
                let hobbies = client.fetch_user_hobbies(user_id).await?;
                match args.format {
                    OutputFormat::Json => print_json(&hobbies)?,
                    OutputFormat::Table => println!("{}", table_display().render_hobbies(&hobbies)),
                }
                Ok(())
            }
            HobbyCommands::Add { hobby_id } => {
                let user_id = current_user_id(&client)?;
                let response = client.add_user_hobby(user_id, hobby_id).await?;
                println!(
                    "✅ {}",
                    response
                        .message
                        .unwrap_or_else(|| format!("Added hobby {}", hobby_id))
                );
                Ok(())
            }
            HobbyCommands::Remove { hobby_id } => {
                let user_id = current_user_id(&client)?;
                client.delete_user_hobby(user_id, hobby_id).await?;
                println!("✅ Removed hobby {}", hobby_id);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct TaskHandler;

impl TaskHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: TaskCommands,
        client: FlexiplanClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        let user_id = current_user_id(&client)?;

        match command {
            TaskCommands::List(args) => {
                print_verbose(verbose, &format!("Fetching tasks for user {}", user_id));
                let tasks = client.fetch_user_tasks(user_id).await?;
                match args.format {
                    OutputFormat::Json => print_json(&tasks)?,
                    OutputFormat::Table => println!("{}", table_display().render_tasks(&tasks)),
                }
                Ok(())
            }
            TaskCommands::Add(args) => {
                let form = task_form(args)?;
                print_verbose(verbose, &format!("Creating task: {:?}", form));
                let task = client.add_user_task(user_id, &form).await?;
                println!("✅ Created task '{}' (ID {})", task.task_name, task.id);
                Ok(())
            }
            TaskCommands::Update { task_id, task } => {
                let form = task_form(task)?;
                print_verbose(verbose, &format!("Updating task {}: {:?}", task_id, form));
                let task = client.update_user_task(user_id, task_id, &form).await?;
                println!("✅ Updated task '{}'", task.task_name);
                Ok(())
            }
            TaskCommands::Remove { task_id } => {
                client.delete_user_task(user_id, task_id).await?;
                println!("✅ Deleted task {}", task_id);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct FriendHandler;

impl FriendHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: FriendCommands,
        client: FlexiplanClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        let display = table_display();

        match command {
            FriendCommands::List(args) => {
                let friends = client.fetch_friends().await?;
                print_verbose(verbose, &format!("Fetched {} friends", friends.len()));
                match args.format {
                    OutputFormat::Json => print_json(&friends)?,
                    OutputFormat::Table => println!("{}", display.render_friends(&friends)),
                }
            }
            FriendCommands::Users(args) => {
                let users = client.fetch_users().await?;
                match args.format {
                    OutputFormat::Json => print_json(&users)?,
                    OutputFormat::Table => println!("{}", display.render_users(&users)),
                }
            }
            FriendCommands::Requests(args) => {
                let requests = client.fetch_friend_requests().await?;
                match args.format {
                    OutputFormat::Json => print_json(&requests)?,
                    OutputFormat::Table => {
                        println!("{}", display.render_friend_requests(&requests))
                    }
                }
            }
            FriendCommands::Details(args) => {
                let details = client.fetch_friendship_details().await?;
                match args.format {
                    OutputFormat::Json => print_json(&details)?,
                    OutputFormat::Table => println!("{}", display.render_friend_requests(&details)),
                }
            }
            FriendCommands::Send { user_id } => {
                let request = client.send_friend_request(user_id).await?;
                println!(
                    "✅ Friend request {} sent to user {}",
                    request.id, user_id
                );
            }
            FriendCommands::Respond { request_id, action } => {
                let action = match action {
                    RespondAction::Accept => FriendRequestAction::Accept,
                    RespondAction::Reject => FriendRequestAction::Reject,
                };
                let response = client.respond_to_friend_request(request_id, action).await?;
                let fallback = match action {
                    FriendRequestAction::Accept => "Friend request accepted",
                    FriendRequestAction::Reject => "Friend request rejected",
                };
                println!(
                    "✅ {}",
                    response.message.unwrap_or_else(|| fallback.to_string())
                );
            }
            FriendCommands::Remove { friend_id } => {
                let response = client.remove_friend(friend_id).await?;
                println!(
                    "✅ {}",
                    response
                        .message
                        .unwrap_or_else(|| format!("Removed friend {}", friend_id))
                );
            }
            FriendCommands::Routine { friend_id, format } => {
                let routine = client.fetch_friend_routine(friend_id).await?;
                match format.format {
                    OutputFormat::Json => print_json(&routine)?,
                    OutputFormat::Table => {
                        let name = if routine.friend_name.trim().is_empty() {
                            &routine.friend_username
                        } else {
                            &routine.friend_name
                        };
                        println!("{}'s routine", name);
                        println!("{}", display.render_routine_week(&routine.routine_data));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MessageHandler;

impl MessageHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: MessageCommands,
        client: FlexiplanClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            MessageCommands::List { friend_id, format } => {
                print_verbose(verbose, &format!("Fetching messages with {}", friend_id));
                let messages = client.fetch_messages(friend_id).await?;
                match format.format {
                    OutputFormat::Json => print_json(&messages)?,
                    OutputFormat::Table => {
                        let me = client.session_state()?.user_id();
                        println!("{}", table_display().render_messages(&messages, me));
                    }
                }
            }
            MessageCommands::Send { friend_id, message } => {
                validate_required("Message", &message)?;
                let sent = client.send_message(friend_id, message.trim()).await?;
                println!("✅ Sent to {}", sent.receiver.username);
            }
            MessageCommands::Read { friend_id } => {
                let response = client.mark_messages_as_read(friend_id).await?;
                println!("✅ Marked {} message(s) as read", response.messages_updated);
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct AgentHandler;

impl AgentHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: AgentCommands,
        client: FlexiplanClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            AgentCommands::History(args) => {
                let messages = client.fetch_agent_messages().await?;
                print_verbose(verbose, &format!("Fetched {} agent messages", messages.len()));
                match args.format {
                    OutputFormat::Json => print_json(&messages)?,
                    OutputFormat::Table => {
                        println!("{}", table_display().render_agent_messages(&messages))
                    }
                }
                Ok(())
            }
            AgentCommands::Send { message } => {
                validate_required("Message", &message)?;

                let mut spinner = ProgressSpinner::new("Waiting for the assistant...");
                spinner.start();
                let result = client.send_agent_message(message.trim()).await;
                spinner.stop(None);

                println!("{}", result?);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct RoutineHandler;

impl RoutineHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: RoutineCommands,
        client: FlexiplanClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        let display = table_display();

        match command {
            RoutineCommands::Show { day, week, format } => {
                if week {
                    let response = client.fetch_user_routine().await?;
                    let routine = response.routine_data.unwrap_or_default();
                    match format.format {
                        OutputFormat::Json => print_json(&routine)?,
                        OutputFormat::Table => println!("{}", display.render_routine_week(&routine)),
                    }
                    return Ok(());
                }

                let cursor = cursor_for(day.day.as_deref())?;
                print_verbose(verbose, &format!("Showing routine for {}", cursor.day_name()));
                let plan = RoutineService::new(client).day_plan(&cursor).await?;
                match format.format {
                    OutputFormat::Json => print_json(&plan.activities)?,
                    OutputFormat::Table => println!("{}", display.render_day_plan(&plan)),
                }
                Ok(())
            }
            RoutineCommands::Generate => {
                let user_id = current_user_id(&client)?;
                let mut spinner = ProgressSpinner::new("Generating routine...");
                spinner.start();
                let result = client.generate_routine(user_id).await;
                spinner.stop(None);

                let routine = result?;
                println!("✅ Routine generated");
                println!("{}", display.render_routine_week(&routine));
                Ok(())
            }
            RoutineCommands::Regenerate => {
                let user_id = current_user_id(&client)?;
                let mut spinner = ProgressSpinner::new("Regenerating routine...");
                spinner.start();
                let result = client.update_routine(user_id).await;
                spinner.stop(None);

                let routine = result?;
                println!("✅ Routine regenerated");
                println!("{}", display.render_routine_week(&routine));
                Ok(())
            }
            RoutineCommands::Complete { activity, day } => {
                let cursor = cursor_for(day.day.as_deref())?;
                let response = RoutineService::new(client)
                    .toggle_completion(&cursor, &activity)
                    .await?;
                let state = if response.is_completed {
                    "done"
                } else {
                    "not done"
                };
                println!(
                    "✅ Marked '{}' on {} as {}",
                    activity,
                    cursor.day_name(),
                    state
                );
                Ok(())
            }
            RoutineCommands::Remove { activity, day } => {
                let cursor = cursor_for(day.day.as_deref())?;
                let response = RoutineService::new(client).remove(&cursor, &activity).await?;
                println!(
                    "✅ {}",
                    response.message.unwrap_or_else(|| format!(
                        "Removed '{}' from {}",
                        activity,
                        cursor.day_name()
                    ))
                );
                Ok(())
            }
            RoutineCommands::Analytics(args) => {
                let analytics = client.fetch_routine_analytics().await?;
                match args.format {
                    OutputFormat::Json => print_json(&analytics)?,
                    OutputFormat::Table => println!("{}", display.render_analytics(&analytics)),
                }
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct ProfileHandler;

impl ProfileHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: ProfileCommands,
        client: FlexiplanClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ProfileCommands::Show { username, format } => {
                let user = match username {
                    Some(name) => {
                        print_verbose(verbose, &format!("Fetching public profile of {}", name));
                        client.fetch_public_user_details(&name).await?
                    }
                    None => client.fetch_user_details().await?,
                };
                match format.format {
                    OutputFormat::Json => print_json(&user)?,
                    OutputFormat::Table => print_user(&user),
                }
                Ok(())
            }
            ProfileCommands::Upload { path } => {
                print_verbose(verbose, &format!("Uploading {}", path.display()));
                let mut spinner = ProgressSpinner::new("Uploading profile picture...");
                spinner.start();
                let result = client.upload_profile_picture(&path).await;
                spinner.stop(None);

                let response = result?;
                println!(
                    "✅ {}",
                    response
                        .message
                        .unwrap_or_else(|| "Profile picture updated".to_string())
                );
                if let Some(url) = response.profile_picture_url {
                    println!("  {}", url);
                }
                Ok(())
            }
        }
    }
}
