//! In-memory short code registry.
//!
//! The registry owns every [`UrlRecord`] and is the only place where records
//! are created, clicked, and evicted. All operations take a single coarse lock
//! for their whole duration and never perform I/O while holding it, so the
//! existence check and insert on create, and the expiry check and click append
//! on resolve, are each one atomic step.
//!
//! # Expiry
//!
//! A record is live while `now <= expires_at`. Every read path re-checks expiry
//! under the lock; an expired record found by a read is moved to a tombstone and
//! reported as [`RegistryError::Expired`]. Tombstones keep later callers seeing
//! `Expired` instead of `NotFound` for [`EXPIRED_RETENTION`], never block a new
//! record under the same code, and are dropped by [`Registry::purge_expired`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tracing::debug;

use super::clock::Clock;
use super::entities::{ClickEvent, UrlRecord};
use super::error::RegistryError;
use crate::utils::code_generator::{generate_code, is_valid_code};

/// How long an evicted code keeps answering `Expired`.
pub const EXPIRED_RETENTION: Duration = Duration::hours(1);

/// Attempts at drawing a free generated code before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Produces candidate short codes.
pub type CodeGenerator = Box<dyn Fn() -> String + Send + Sync>;

#[derive(Default)]
struct RegistryState {
    records: HashMap<String, UrlRecord>,
    tombstones: HashMap<String, DateTime<Utc>>,
}

impl RegistryState {
    fn is_live(&self, code: &str, now: DateTime<Utc>) -> bool {
        self.records
            .get(code)
            .is_some_and(|record| !record.is_expired_at(now))
    }

    fn evict(&mut self, code: &str) -> Option<DateTime<Utc>> {
        let record = self.records.remove(code)?;
        self.tombstones.insert(record.code, record.expires_at);
        metrics::counter!("links_expired_total").increment(1);
        Some(record.expires_at)
    }

    fn missing(&self, code: &str) -> RegistryError {
        match self.tombstones.get(code) {
            Some(expired_at) => RegistryError::Expired {
                code: code.to_string(),
                expired_at: *expired_at,
            },
            None => RegistryError::NotFound {
                code: code.to_string(),
            },
        }
    }

    /// Returns the live record for `code`, evicting it first if it has expired.
    fn live_record_mut(
        &mut self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<&mut UrlRecord, RegistryError> {
        let expired = match self.records.get(code) {
            None => return Err(self.missing(code)),
            Some(record) => record.is_expired_at(now),
        };

        if expired {
            if let Some(expired_at) = self.evict(code) {
                debug!(code, %expired_at, "Evicted expired short code on access");
            }
            return Err(self.missing(code));
        }

        self.records
            .get_mut(code)
            .ok_or_else(|| RegistryError::Internal(format!("record '{code}' vanished under lock")))
    }
}

/// Owner of the code → record mapping.
///
/// Construct one per process and share it behind an [`Arc`].
pub struct Registry {
    state: Mutex<RegistryState>,
    clock: Arc<dyn Clock>,
    generate: CodeGenerator,
}

impl Registry {
    /// Creates an empty registry using random 8-character codes.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_code_generator(clock, Box::new(generate_code))
    }

    /// Creates an empty registry with a custom code source.
    pub fn with_code_generator(clock: Arc<dyn Clock>, generate: CodeGenerator) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            clock,
            generate,
        }
    }

    /// Creates a record for `original_url`, valid for `validity` from now.
    ///
    /// When `requested_code` is given it is used as-is, otherwise a fresh code
    /// is generated and retried under the lock until it does not collide with a
    /// live record. An expired record under the chosen code is replaced.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidInput`] for an empty URL, non-positive
    ///   validity, or a requested code outside the code format
    /// - [`RegistryError::CodeConflict`] if `requested_code` is live
    /// - [`RegistryError::Internal`] if no free code was found after retries
    pub fn create(
        &self,
        original_url: &str,
        validity: Duration,
        requested_code: Option<&str>,
    ) -> Result<UrlRecord, RegistryError> {
        if original_url.trim().is_empty() {
            return Err(RegistryError::InvalidInput(
                "original URL must not be empty".to_string(),
            ));
        }

        if validity <= Duration::zero() {
            return Err(RegistryError::InvalidInput(
                "validity must be positive".to_string(),
            ));
        }

        if let Some(code) = requested_code
            && !is_valid_code(code)
        {
            return Err(RegistryError::InvalidInput(format!(
                "short code '{code}' must be 1-10 alphanumeric characters"
            )));
        }

        let mut state = self.state.lock();
        let now = self.clock.now();

        let expires_at = now
            .checked_add_signed(validity)
            .ok_or_else(|| RegistryError::InvalidInput("validity is out of range".to_string()))?;

        let code = match requested_code {
            Some(code) if state.is_live(code, now) => {
                return Err(RegistryError::CodeConflict {
                    code: code.to_string(),
                });
            }
            Some(code) => code.to_string(),
            None => self.unused_code(&state, now)?,
        };

        let record = UrlRecord::new(code.clone(), original_url.to_string(), now, expires_at);

        state.tombstones.remove(&code);
        state.records.insert(code, record.clone());

        debug!(code = %record.code, expires_at = %record.expires_at, "Short code created");

        Ok(record)
    }

    /// Resolves `code` for a redirect, recording one click.
    ///
    /// The click is appended before this returns, so a redirect is only ever
    /// served for a click that has been counted.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if the code is unknown
    /// - [`RegistryError::Expired`] if the code has lapsed; no click is recorded
    pub fn resolve(
        &self,
        code: &str,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Result<String, RegistryError> {
        let mut state = self.state.lock();
        let now = self.clock.now();

        let record = state.live_record_mut(code, now)?;
        record.record_click(ClickEvent::new(now, user_agent, referrer));

        Ok(record.original_url.clone())
    }

    /// Returns a snapshot of the record for `code` without recording a click.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub fn get_stats(&self, code: &str) -> Result<UrlRecord, RegistryError> {
        let mut state = self.state.lock();
        let now = self.clock.now();

        state.live_record_mut(code, now).map(|record| record.clone())
    }

    /// Returns snapshots of all live records, oldest first.
    ///
    /// Expired records are skipped but left in place for the sweeper.
    pub fn list_active(&self) -> Vec<UrlRecord> {
        let state = self.state.lock();
        let now = self.clock.now();

        let mut records: Vec<UrlRecord> = state
            .records
            .values()
            .filter(|record| !record.is_expired_at(now))
            .cloned()
            .collect();

        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });
        records
    }

    /// Evicts every expired record and drops tombstones older than
    /// [`EXPIRED_RETENTION`].
    ///
    /// Returns the number of records evicted.
    pub fn purge_expired(&self) -> usize {
        let mut state = self.state.lock();
        let now = self.clock.now();

        let expired: Vec<String> = state
            .records
            .values()
            .filter(|record| record.is_expired_at(now))
            .map(|record| record.code.clone())
            .collect();

        for code in &expired {
            state.evict(code);
        }

        let horizon = now - EXPIRED_RETENTION;
        state.tombstones.retain(|_, expired_at| *expired_at > horizon);

        expired.len()
    }

    /// Number of live records.
    pub fn live_count(&self) -> usize {
        let state = self.state.lock();
        let now = self.clock.now();

        state
            .records
            .values()
            .filter(|record| !record.is_expired_at(now))
            .count()
    }

    fn unused_code(&self, state: &RegistryState, now: DateTime<Utc>) -> Result<String, RegistryError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = (self.generate)();

            if is_valid_code(&code) && !state.is_live(&code, now) {
                return Ok(code);
            }
        }

        Err(RegistryError::Internal(
            "failed to generate a unique short code: too many collisions".to_string(),
        ))
    }
}
