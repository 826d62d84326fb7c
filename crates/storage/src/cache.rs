//! Session cache
//!
//! Sessions of a plan are read once and kept until they are invalidated explicitly. Every write
//! to the sessions of a plan must be followed by an invalidation of the affected entry.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use log::debug;
use phasefit_domain as domain;

type Key = (domain::UserID, domain::PlanID);

#[derive(Debug, Default)]
pub struct SessionCache {
    entries: Mutex<HashMap<Key, Vec<domain::WorkoutSessionEntry>>>,
}

impl SessionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(
        &self,
        user_id: domain::UserID,
        plan_id: domain::PlanID,
    ) -> Option<Vec<domain::WorkoutSessionEntry>> {
        self.entries().get(&(user_id, plan_id)).cloned()
    }

    pub fn insert(
        &self,
        user_id: domain::UserID,
        plan_id: domain::PlanID,
        sessions: Vec<domain::WorkoutSessionEntry>,
    ) {
        self.entries().insert((user_id, plan_id), sessions);
    }

    pub fn invalidate(&self, user_id: domain::UserID, plan_id: domain::PlanID) {
        self.entries().remove(&(user_id, plan_id));
    }

    /// Remove the sessions of all plans of a user.
    pub fn invalidate_user(&self, user_id: domain::UserID) {
        self.entries().retain(|(user, _), _| *user != user_id);
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Key, Vec<domain::WorkoutSessionEntry>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reads sessions through a [`SessionCache`].
pub struct CachedSessions<R> {
    repository: R,
    cache: SessionCache,
}

impl<R> CachedSessions<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            cache: SessionCache::new(),
        }
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    #[must_use]
    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }
}

impl<R: domain::WorkoutSessionRepository> domain::WorkoutSessionRepository for CachedSessions<R> {
    async fn read_workout_sessions(
        &self,
        user_id: domain::UserID,
        plan_id: domain::PlanID,
    ) -> Result<Vec<domain::WorkoutSessionEntry>, domain::ReadError> {
        if let Some(sessions) = self.cache.get(user_id, plan_id) {
            debug!("using {} cached sessions of plan {}", sessions.len(), *plan_id);
            return Ok(sessions);
        }

        let sessions = self
            .repository
            .read_workout_sessions(user_id, plan_id)
            .await?;
        self.cache.insert(user_id, plan_id, sessions.clone());

        Ok(sessions)
    }
}
