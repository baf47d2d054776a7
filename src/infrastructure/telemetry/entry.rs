//! Log entry model accepted by the log collector.

use serde::Serialize;

use super::sink::LoggingError;

/// Which side of the application produced the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stack {
    Backend,
    Frontend,
}

/// Severity understood by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Component that produced the entry.
///
/// Some packages only make sense for one [`Stack`]; see [`Package::allowed_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Package {
    // backend only
    Cache,
    Controller,
    CronJob,
    Domain,
    Handler,
    Repository,
    Route,
    Service,
    // frontend only
    Api,
    Component,
    Hook,
    Page,
    State,
    Style,
    // either stack
    Auth,
    Config,
    Middleware,
    Util,
}

impl Package {
    pub fn allowed_for(self, stack: Stack) -> bool {
        use Package::*;

        match self {
            Auth | Config | Middleware | Util => true,
            Cache | Controller | CronJob | Domain | Handler | Repository | Route | Service => {
                stack == Stack::Backend
            }
            Api | Component | Hook | Page | State | Style => stack == Stack::Frontend,
        }
    }
}

/// One validated log entry, serialized as `{stack, level, package, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub stack: Stack,
    pub level: Level,
    pub package: Package,
    pub message: String,
}

impl LogEntry {
    /// Builds an entry after checking the package/stack pairing and message.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::InvalidEntry`] if `package` is not allowed for
    /// `stack` or `message` is blank.
    pub fn new(
        stack: Stack,
        level: Level,
        package: Package,
        message: impl Into<String>,
    ) -> Result<Self, LoggingError> {
        if !package.allowed_for(stack) {
            return Err(LoggingError::InvalidEntry(format!(
                "package {package:?} is not allowed for stack {stack:?}"
            )));
        }

        let message = message.into();
        if message.trim().is_empty() {
            return Err(LoggingError::InvalidEntry(
                "message must not be empty".to_string(),
            ));
        }

        Ok(Self {
            stack,
            level,
            package,
            message,
        })
    }
}
