use crate::api::models::SignupRequest;
use crate::error::{AppError, CliError};
use crate::utils::validation::{validate_email, validate_required};
use rpassword::read_password;
use std::io::{self, Write};

fn prompt(label: &str) -> Result<String, AppError> {
    print!("{}: ", label);
    io::stdout().flush().map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to flush stdout: {}",
            e
        )))
    })?;

    let mut value = String::new();
    io::stdin().read_line(&mut value).map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to read {}: {}",
            label.to_lowercase(),
            e
        )))
    })?;
    Ok(value.trim().to_string())
}

fn prompt_password(label: &str) -> Result<String, AppError> {
    print!("{}: ", label);
    io::stdout().flush().map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to flush stdout: {}",
            e
        )))
    })?;

    let password = read_password().map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to read password: {}",
            e
        )))
    })?;
    Ok(password.trim().to_string())
}

/// User login credentials input handler
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    /// Collect login credentials, prompting for whatever was not given
    pub fn collect(username: Option<&str>) -> Result<Self, AppError> {
        let username = match username {
            Some(name) => name.to_string(),
            None => prompt("Username")?,
        };
        let password = prompt_password("Password")?;

        Ok(Self { username, password })
    }

    /// Validate that credentials are not empty
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required("Username", &self.username)?;
        validate_required("Password", &self.password)?;
        Ok(())
    }
}

/// New account details
pub struct SignupInput {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupInput {
    pub fn collect() -> Result<Self, AppError> {
        let first_name = prompt("First name")?;
        let last_name = prompt("Last name")?;
        let username = prompt("Username")?;
        let email = prompt("Email")?;
        let password = prompt_password("Password")?;
        let confirmation = prompt_password("Confirm password")?;

        if password != confirmation {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Passwords do not match".to_string(),
            )));
        }

        Ok(Self {
            first_name,
            last_name,
            username,
            email,
            password,
        })
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_required("First name", &self.first_name)?;
        validate_required("Last name", &self.last_name)?;
        validate_required("Username", &self.username)?;
        validate_email(&self.email)?;
        validate_required("Password", &self.password)?;
        Ok(())
    }

    pub fn into_request(self) -> SignupRequest {
        SignupRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            email: self.email,
            password: self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_input_validation() {
        let input = LoginInput {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        assert!(input.validate().is_ok());

        let input = LoginInput {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(input.validate().is_err());

        let input = LoginInput {
            username: "alice".to_string(),
            password: "  ".to_string(),
        };
        assert!(input.validate().is_err());
    }

    fn signup() -> SignupInput {
        SignupInput {
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_signup_input_validation() {
        assert!(signup().validate().is_ok());

        let mut input = signup();
        input.email = "alice".to_string();
        assert!(input.validate().is_err());

        let mut input = signup();
        input.last_name = String::new();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_signup_into_request() {
        let request = signup().into_request();
        assert_eq!(request.username, "alice");
        assert_eq!(request.email, "alice@example.com");
    }
}
