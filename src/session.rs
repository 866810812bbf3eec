//! Local account store and login session.
//!
//! This is a demo credential store: passwords are kept exactly as entered
//! and checked by plain comparison. It exists so the dashboards have a
//! signed-in user, and it must not be reused as a real auth design.
//!
//! State lives behind the [`KeyValueStore`] trait under two keys: `users`
//! (JSON array of every registered account) and `user` (the signed-in
//! account). [`Session`] owns its store explicitly; nothing is global.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::logging::{self, Component};

pub const USERS_KEY: &str = "users";
pub const CURRENT_USER_KEY: &str = "user";

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// String key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), AuthError>;
    fn remove(&mut self, key: &str) -> Result<(), AuthError>;
}

/// In-memory store, used by tests and one-shot runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AuthError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AuthError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| AuthError::Storage(format!("{}: {}", path.display(), e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AuthError::Storage(format!("{}: {}", self.dir.display(), e)))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| AuthError::Storage(format!("{}: {}", path.display(), e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), AuthError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| AuthError::Storage(format!("{}: {}", path.display(), e)))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, PartialEq)]
pub enum AuthError {
    /// Signup with a blank username, email, or password.
    MissingFields,
    /// Login with a blank email or password.
    MissingCredentials,
    EmailExists,
    InvalidCredentials,
    /// The backing store failed or holds unreadable data.
    Storage(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingFields => write!(f, "Please fill all fields."),
            AuthError::MissingCredentials => write!(f, "Please enter email and password."),
            AuthError::EmailExists => write!(f, "Email already exists."),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials."),
            AuthError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

pub const SIGNUP_SUCCESS_MESSAGE: &str = "Successfully registered! You can now log in.";

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Every registered account, oldest first.
    pub fn users(&self) -> Result<Vec<User>, AuthError> {
        match self.store.get(USERS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| AuthError::Storage(format!("corrupt users list: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    /// Registers an account. All fields are required and the email must be
    /// unused. Does not sign the new user in.
    pub fn signup(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailExists);
        }

        let user = User {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        users.push(user.clone());
        self.store.set(USERS_KEY, &encode(&users)?)?;

        logging::info(Component::Session, None, &format!("registered {}", email));
        Ok(user)
    }

    /// Signs in the account matching both email and password.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self
            .users()?
            .into_iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        self.store.set(CURRENT_USER_KEY, &encode(&user)?)?;
        logging::info(Component::Session, None, &format!("{} signed in", user.email));
        Ok(user)
    }

    /// The signed-in account, if any.
    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        match self.store.get(CURRENT_USER_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AuthError::Storage(format!("corrupt current user: {}", e))),
            None => Ok(None),
        }
    }

    pub fn is_logged_in(&self) -> Result<bool, AuthError> {
        Ok(self.current_user()?.is_some())
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.store.remove(CURRENT_USER_KEY)
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, AuthError> {
    serde_json::to_string(value).map_err(|e| AuthError::Storage(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
