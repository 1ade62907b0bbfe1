//! `user.Create` and `user.List`: seed accounts from a JSON file into the
//! identity store, and check which of them exist.
//!
//! ```text
//! { "users": [ { "username": "ada@example.com", "password": "secret1" } ] }
//! ```

use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;

use super::table;
use crate::core::action::{Action, Control};
use crate::core::config::ConfigError;
use crate::core::console::Console;
use crate::emulator::IdentityStore;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<Credentials>,
}

pub fn load_users(path: &Path) -> Result<Vec<Credentials>, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let file: UsersFile =
        serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(file.users)
}

/// Loads the users file, reporting failure on the console.
fn users_or_report(console: &mut dyn Console, path: &Path) -> Option<Vec<Credentials>> {
    match load_users(path) {
        Ok(users) if users.is_empty() => {
            console.write_line("No users found in users file.");
            None
        }
        Ok(users) => Some(users),
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            console.write_line(&format!("Error reading users file '{}': {}", path.display(), e));
            None
        }
    }
}

// ── Create ──────────────────────────────────────────────────────────────────

pub struct CreateUsers {
    identities: Arc<dyn IdentityStore>,
    runtime: Handle,
    users_file: PathBuf,
}

impl CreateUsers {
    pub fn new(identities: Arc<dyn IdentityStore>, runtime: Handle, users_file: PathBuf) -> Self {
        Self {
            identities,
            runtime,
            users_file,
        }
    }
}

impl Action for CreateUsers {
    fn invoke(&self, console: &mut dyn Console) -> Control {
        let Some(users) = users_or_report(console, &self.users_file) else {
            return Control::Continue;
        };

        let mut created = 0;
        for user in &users {
            if user.username.is_empty() || user.password.is_empty() {
                console.write_line("Skipping user with empty username or password");
                continue;
            }
            match self
                .runtime
                .block_on(self.identities.create_user(&user.username, &user.password))
            {
                Ok(uid) => {
                    created += 1;
                    console.write_line(&format!("Successfully created user: {uid}"));
                }
                Err(e) => {
                    console.write_line(&format!("Error creating user {}: {}", user.username, e));
                }
            }
        }

        info!("Created {} of {} users", created, users.len());
        console.write_line(&format!("Created {created} of {} users.", users.len()));
        Control::Continue
    }
}

// ── List ────────────────────────────────────────────────────────────────────

pub struct ListUsers {
    identities: Arc<dyn IdentityStore>,
    runtime: Handle,
    users_file: PathBuf,
}

impl ListUsers {
    pub fn new(identities: Arc<dyn IdentityStore>, runtime: Handle, users_file: PathBuf) -> Self {
        Self {
            identities,
            runtime,
            users_file,
        }
    }
}

impl Action for ListUsers {
    fn invoke(&self, console: &mut dyn Console) -> Control {
        console.write_line("");
        console.write_line("--- List Users ---");

        let Some(users) = users_or_report(console, &self.users_file) else {
            return Control::Continue;
        };

        let emails: Vec<String> = users
            .into_iter()
            .map(|user| user.username)
            .filter(|email| !email.is_empty())
            .collect();
        if emails.is_empty() {
            console.write_line("No valid user identifiers found in users file.");
            return Control::Continue;
        }

        let found = match self.runtime.block_on(self.identities.lookup_by_email(&emails)) {
            Ok(found) => found,
            Err(e) => {
                console.write_line(&format!("Error fetching users: {e}"));
                return Control::Continue;
            }
        };

        if found.is_empty() {
            console.write_line("No users found in the Auth emulator for the provided emails.");
        } else {
            let rows: Vec<Vec<String>> = found
                .iter()
                .map(|user| vec![user.email.clone(), user.uid.clone()])
                .collect();
            for line in table::render(&[("Email", 30), ("UID", 40)], &rows) {
                console.write_line(&line);
            }
        }

        for email in &emails {
            if !found.iter().any(|user| user.email.eq_ignore_ascii_case(email)) {
                console.write_line(&format!("User not found: {email}"));
            }
        }
        Control::Continue
    }
}
