use std::fmt;

use crate::error::ConfigError;

/// Environment variable holding the API user name.
pub const USERNAME_ENV: &str = "ENDPROBE_USERNAME";

/// Environment variable holding the API password.
pub const PASSWORD_ENV: &str = "ENDPROBE_PASSWORD";

/// Basic-Auth credentials for the probed API.
///
/// The password never leaves this type except through [`Credentials::password`];
/// `Debug` output redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  username: String,
  password: String,
}

impl Credentials {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
    }
  }

  /// Build credentials from optional flag/env values, rejecting missing or
  /// blank ones.
  pub fn resolve(username: Option<String>, password: Option<String>) -> Result<Self, ConfigError> {
    let username = username
      .filter(|u| !u.trim().is_empty())
      .ok_or(ConfigError::MissingCredential {
        flag: "username",
        env_var: USERNAME_ENV,
      })?;
    let password = password
      .filter(|p| !p.is_empty())
      .ok_or(ConfigError::MissingCredential {
        flag: "password",
        env_var: PASSWORD_ENV,
      })?;

    Ok(Self::new(username, password))
  }

  pub fn username(&self) -> &str {
    &self.username
  }

  pub fn password(&self) -> &str {
    &self.password
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_debug_redacts_password() {
    let creds = Credentials::new("api-user", "s3cret");
    let debug = format!("{:?}", creds);
    assert!(debug.contains("api-user"));
    assert!(!debug.contains("s3cret"));
  }

  #[test]
  fn test_resolve_requires_username() {
    let err = Credentials::resolve(None, Some("pw".to_string())).unwrap_err();
    assert!(matches!(
      err,
      ConfigError::MissingCredential {
        env_var: USERNAME_ENV,
        ..
      }
    ));
  }

  #[test]
  fn test_resolve_rejects_blank_password() {
    let err = Credentials::resolve(Some("user".to_string()), Some(String::new())).unwrap_err();
    assert!(matches!(
      err,
      ConfigError::MissingCredential {
        env_var: PASSWORD_ENV,
        ..
      }
    ));
  }

  #[test]
  fn test_resolve_ok() {
    let creds = Credentials::resolve(Some("user".to_string()), Some("pw".to_string())).unwrap();
    assert_eq!(creds.username(), "user");
    assert_eq!(creds.password(), "pw");
  }
}
