use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::profile::{ActivityLevel, Gender, Goal, UserProfile};

pub const MIN_USERNAME_LEN: usize = 3;

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: std::io::Error },
    Serialization { path: PathBuf, source: serde_json::Error },
    UsernameTaken(String),
    InvalidUsername(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "I/O error on user store {:?}: {}", path, source)
            }
            StoreError::Serialization { path, source } => {
                write!(f, "Malformed user store {:?}: {}", path, source)
            }
            StoreError::UsernameTaken(name) => write!(f, "Username already taken: {}", name),
            StoreError::InvalidUsername(name) => write!(
                f,
                "Username '{}' must be at least {} characters",
                name, MIN_USERNAME_LEN
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Serialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Keyed profile storage. Callers only ever read one profile per scoring request.
pub trait UserRepository {
    fn get(&self, username: &str) -> Option<&UserProfile>;
    fn put(&mut self, username: &str, profile: UserProfile) -> Result<(), StoreError>;
    fn list(&self) -> Vec<String>;

    /// Adds a new user, refusing duplicates and too-short names.
    fn register(&mut self, username: &str, profile: UserProfile) -> Result<(), StoreError> {
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(StoreError::InvalidUsername(username.to_string()));
        }
        if self.get(username).is_some() {
            return Err(StoreError::UsernameTaken(username.to_string()));
        }
        self.put(username, profile)
    }
}

/// Demo accounts used when no store file exists yet.
pub fn seed_profiles() -> BTreeMap<String, UserProfile> {
    let mut users = BTreeMap::new();
    users.insert(
        "alice".to_string(),
        UserProfile {
            gender: Gender::Female,
            age: 28,
            height: 160.0,
            weight: 55.0,
            activity_level: ActivityLevel::Active,
            goal: Goal::FatLoss,
        },
    );
    users.insert(
        "bob".to_string(),
        UserProfile {
            gender: Gender::Male,
            age: 30,
            height: 175.0,
            weight: 70.0,
            activity_level: ActivityLevel::Inactive,
            goal: Goal::MuscleGain,
        },
    );
    users
}

/// JSON-file backed store: loaded once on open, rewritten on every `put`.
#[derive(Debug)]
pub struct JsonFileUserStore {
    path: PathBuf,
    users: BTreeMap<String, UserProfile>,
}

impl JsonFileUserStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let users = if path.exists() {
            let file = File::open(path).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let users: BTreeMap<String, UserProfile> = serde_json::from_reader(BufReader::new(file))
                .map_err(|source| StoreError::Serialization {
                    path: path.to_path_buf(),
                    source,
                })?;
            tracing::info!(path = ?path, users = users.len(), "loaded user store");
            users
        } else {
            tracing::info!(path = ?path, "user store not found, starting from demo profiles");
            seed_profiles()
        };

        Ok(Self {
            path: path.to_path_buf(),
            users,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let file = File::create(&self.path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.users).map_err(|source| StoreError::Serialization {
            path: self.path.clone(),
            source,
        })?;
        writer.flush().map_err(io_err)?;
        tracing::debug!(path = ?self.path, users = self.users.len(), "persisted user store");
        Ok(())
    }
}

impl UserRepository for JsonFileUserStore {
    fn get(&self, username: &str) -> Option<&UserProfile> {
        self.users.get(username)
    }

    fn put(&mut self, username: &str, profile: UserProfile) -> Result<(), StoreError> {
        self.users.insert(username.to_string(), profile);
        self.persist()
    }

    fn list(&self) -> Vec<String> {
        self.users.keys().cloned().collect()
    }
}
