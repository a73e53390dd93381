use crate::cli::command_handlers::{
    AgentHandler, AuthHandler, ConfigHandler, FriendHandler, HobbyHandler, MessageHandler,
    ProfileHandler, RoutineHandler, TaskHandler,
};
use crate::cli::main_types::{AuthCommands, Commands};
use flexiplan_core::api::client::FlexiplanClient;
use flexiplan_core::core::services::auth_service::AuthService;
use flexiplan_core::core::services::config_service::ConfigService;
use flexiplan_core::error::AppError;
use flexiplan_core::storage::config::Config;
use flexiplan_core::storage::credentials::{CredentialStore, open_store};
use flexiplan_core::utils::logging::print_verbose;
use flexiplan_core::utils::validation::validate_url;
use std::path::PathBuf;
use std::sync::Arc;

pub struct Dispatcher {
    config: Config,
    config_dir: PathBuf,
    verbose: bool,
    url: Option<String>,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn new(config: Config, config_dir: PathBuf, verbose: bool, url: Option<String>) -> Self {
        Self {
            config,
            config_dir,
            verbose,
            url,
        }
    }

    // CLI argument > config.toml > FLEXIPLAN_URL
    fn get_url(&self) -> Result<String, AppError> {
        if let Some(url) = self.url.as_ref().filter(|u| !u.is_empty()) {
            validate_url(url)?;
            return Ok(url.trim_end_matches('/').to_string());
        }
        self.create_config_service().require_url()
    }

    fn create_client(&self) -> Result<FlexiplanClient, AppError> {
        let url = self.get_url()?;
        let config_service = self.create_config_service();
        let backend = config_service.credential_backend();
        self.log_verbose(&format!(
            "Creating client for {} with {} credential storage",
            url, backend
        ));

        Ok(FlexiplanClient::with_timeout(
            url,
            self.create_store(),
            config_service.timeout(),
        )?)
    }

    fn create_store(&self) -> Arc<dyn CredentialStore> {
        let backend = self.create_config_service().credential_backend();
        open_store(backend, Config::credentials_file_in(&self.config_dir))
    }

    // Logout and status only need the credential store
    fn create_auth_service(&self, command: &AuthCommands) -> Result<AuthService, AppError> {
        match (command, self.get_url()) {
            (_, Ok(_)) => Ok(AuthService::new(self.create_client()?)),
            (AuthCommands::Logout | AuthCommands::Status, Err(AppError::Config(_))) => {
                self.log_verbose("No server URL configured, using local session only");
                Ok(AuthService::local(self.create_store()))
            }
            (_, Err(e)) => Err(e),
        }
    }

    fn create_config_service(&self) -> ConfigService {
        ConfigService::new(self.config.clone())
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Config { command } => {
                let handler = ConfigHandler::new();
                let mut config_service = self.create_config_service();
                // Config commands work without a server URL
                let config_file = Config::config_file_in(&self.config_dir);
                handler
                    .handle(command, &mut config_service, config_file, self.verbose)
                    .await
            }
            Commands::Auth { command } => {
                let handler = AuthHandler::new();
                let service = self.create_auth_service(&command)?;
                let backend = self.create_config_service().credential_backend();
                handler.handle(command, service, backend, self.verbose).await
            }
            Commands::Hobby { command } => {
                let client = self.create_client()?;
                HobbyHandler::new().handle(command, client, self.verbose).await
            }
            Commands::Task { command } => {
                let client = self.create_client()?;
                TaskHandler::new().handle(command, client, self.verbose).await
            }
            Commands::Friend { command } => {
                let client = self.create_client()?;
                FriendHandler::new().handle(command, client, self.verbose).await
            }
            Commands::Message { command } => {
                let client = self.create_client()?;
                MessageHandler::new().handle(command, client, self.verbose).await
            }
            Commands::Agent { command } => {
                let client = self.create_client()?;
                AgentHandler::new().handle(command, client, self.verbose).await
            }
            Commands::Routine { command } => {
                let client = self.create_client()?;
                RoutineHandler::new().handle(command, client, self.verbose).await
            }
            Commands::Profile { command } => {
                let client = self.create_client()?;
                ProfileHandler::new().handle(command, client, self.verbose).await
            }
        }
    }
}
