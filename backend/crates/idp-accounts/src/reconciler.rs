//! Implicit-login reconciliation.
//!
//! The webhook provisioner and the implicit-login handler both create user
//! rows keyed by external uuid, with no shared lock between them. The store's
//! uniqueness constraints are the only serialization point; everything here is
//! about converging on the single row that wins.
//!
//! Phases:
//! 1. Poll by uuid with a fixed backoff so a webhook commit in flight can land.
//! 2. Adopt a found row, refreshing its username.
//! 3. Otherwise create with bounded retries. Before each attempt the uuid is
//!    re-checked. A uuid conflict means another writer won and is resolved by
//!    re-polling. A username conflict moves on to the next candidate.
//! 4. If a source username was supplied and is free, claim it.

use crate::{AccountError, ReconcilerConfig, Result as AccountErrorResult};

use idp_core::{ExternalIdentity, NewUser, User};
use idp_db::{ConstrainedColumn, DbError, UserStore};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use tokio::time::sleep;

pub struct ImplicitLoginReconciler {
    store: Arc<dyn UserStore>,
    config: ReconcilerConfig,
}

/// What a single creation attempt produced.
enum AttemptOutcome {
    Resolved(User),
    /// Lost a uniqueness race without finding the winning row.
    Conflicted,
}

impl ImplicitLoginReconciler {
    pub fn new(store: Arc<dyn UserStore>, config: ReconcilerConfig) -> Self {
        Self { store, config }
    }

    /// Resolve `identity` to exactly one stored user, creating it if no other
    /// writer does so first.
    ///
    /// Either returns the row or fails; it never creates a row and then
    /// reports failure.
    pub async fn reconcile(&self, identity: &ExternalIdentity) -> AccountErrorResult<User> {
        let uuid = identity.external_id.as_str();

        if let Some(existing) = self.lookup_with_backoff(uuid).await? {
            info!(
                "Adopting existing user id={} for uuid={} (username={})",
                existing.id, existing.uuid, existing.username
            );
            return self.refresh_adopted(existing, identity).await;
        }

        info!(
            "No user for uuid={} after {} lookups, creating",
            uuid, self.config.lookup_attempts
        );
        let user = self.create_with_retry(identity).await?;

        Ok(self.claim_source_username(user, identity).await)
    }

    async fn lookup_with_backoff(&self, uuid: &str) -> AccountErrorResult<Option<User>> {
        let attempts = self.config.lookup_attempts;

        for attempt in 1..=attempts {
            if let Some(user) = self.store.find_by_uuid(uuid).await? {
                debug!("Found uuid={} on lookup {}/{}", uuid, attempt, attempts);
                return Ok(Some(user));
            }

            if attempt < attempts {
                debug!(
                    "uuid={} not found on lookup {}/{}, waiting {:?}",
                    uuid, attempt, attempts, self.config.lookup_interval
                );
                sleep(self.config.lookup_interval).await;
            }
        }

        Ok(None)
    }

    /// The row already owns the uuid slot, so the desired username is written
    /// without a collision pre-check. A collision reported by the store keeps
    /// the stored name.
    async fn refresh_adopted(
        &self,
        existing: User,
        identity: &ExternalIdentity,
    ) -> AccountErrorResult<User> {
        let desired = self.config.username_policy.base_candidate(identity);
        if desired == existing.username {
            return Ok(existing);
        }

        match self.store.update_username(existing.id, &desired).await {
            Ok(updated) => {
                info!(
                    "Updated username for id={}: {} -> {}",
                    updated.id, existing.username, updated.username
                );
                Ok(updated)
            }
            Err(DbError::UniqueViolation { column, .. }) => {
                warn!(
                    "Username '{}' already claimed ({} conflict); keeping '{}' for id={}",
                    desired, column, existing.username, existing.id
                );
                Ok(existing)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_with_retry(&self, identity: &ExternalIdentity) -> AccountErrorResult<User> {
        let uuid = identity.external_id.as_str();
        let attempts = self.config.creation_attempts;
        let base = self.config.username_policy.base_candidate(identity);

        for attempt in 0..attempts {
            let is_last = attempt + 1 == attempts;

            match self.try_create(identity, &base, attempt).await {
                Ok(AttemptOutcome::Resolved(user)) => return Ok(user),
                Ok(AttemptOutcome::Conflicted) if !is_last => {
                    info!(
                        "Creation attempt {}/{} for uuid={} conflicted, retrying",
                        attempt + 1,
                        attempts,
                        uuid
                    );
                }
                Ok(AttemptOutcome::Conflicted) => {
                    if let Some(user) = self.store.find_by_uuid(uuid).await? {
                        info!("Found uuid={} after final conflict", uuid);
                        return Ok(user);
                    }
                }
                Err(e) if !is_last => {
                    warn!(
                        "Creation attempt {}/{} for uuid={} failed: {}. Retrying in {:?}",
                        attempt + 1,
                        attempts,
                        uuid,
                        e,
                        self.config.retry_interval
                    );
                    sleep(self.config.retry_interval).await;
                }
                Err(e) => {
                    error!(
                        "Creation attempt {}/{} for uuid={} failed: {}",
                        attempt + 1,
                        attempts,
                        uuid,
                        e
                    );
                    return Err(e);
                }
            }
        }

        error!(
            "Could not create or find user for uuid={} after {} attempts",
            uuid, attempts
        );
        Err(AccountError::ProvisioningExhausted {
            attempts,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    async fn try_create(
        &self,
        identity: &ExternalIdentity,
        base: &str,
        attempt: u32,
    ) -> AccountErrorResult<AttemptOutcome> {
        let uuid = identity.external_id.as_str();

        // Another writer may have committed during the lookup sleeps or a
        // previous attempt.
        if let Some(user) = self.store.find_by_uuid(uuid).await? {
            info!(
                "Found uuid={} before creation attempt {}",
                uuid,
                attempt + 1
            );
            return Ok(AttemptOutcome::Resolved(user));
        }

        let base_taken = attempt == 0 && self.owned_by_other(base, uuid).await?;
        let candidate =
            self.config
                .username_policy
                .candidate_for_attempt(base, identity, attempt, base_taken);
        if base_taken {
            info!("Username '{}' taken, using '{}'", base, candidate);
        }

        let new_user = NewUser::new(uuid, &candidate)?;
        match self.store.insert(&new_user).await {
            Ok(user) => {
                info!(
                    "Created user id={} uuid={} username={}",
                    user.id, user.uuid, user.username
                );
                Ok(AttemptOutcome::Resolved(user))
            }
            Err(DbError::UniqueViolation {
                column: ConstrainedColumn::Uuid,
                ..
            }) => {
                warn!("uuid={} was created concurrently, re-polling", uuid);
                Ok(match self.poll_after_conflict(uuid).await? {
                    Some(user) => AttemptOutcome::Resolved(user),
                    None => AttemptOutcome::Conflicted,
                })
            }
            Err(DbError::UniqueViolation { column, .. }) => {
                warn!(
                    "Creating uuid={} as '{}' hit a {} conflict",
                    uuid, candidate, column
                );
                Ok(AttemptOutcome::Conflicted)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn poll_after_conflict(&self, uuid: &str) -> AccountErrorResult<Option<User>> {
        for retry in 1..=self.config.conflict_attempts {
            sleep(self.config.conflict_interval).await;
            if let Some(user) = self.store.find_by_uuid(uuid).await? {
                info!("Found uuid={} on conflict re-poll {}", uuid, retry);
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    async fn owned_by_other(&self, username: &str, uuid: &str) -> AccountErrorResult<bool> {
        Ok(self
            .store
            .find_by_username(username)
            .await?
            .is_some_and(|owner| owner.uuid != uuid))
    }

    /// Post-resolution rename to the source username. Every failure here is
    /// non-fatal: the resolved row is returned unchanged.
    async fn claim_source_username(&self, user: User, identity: &ExternalIdentity) -> User {
        let Some(wanted) = identity.source_username() else {
            return user;
        };
        if wanted == user.username {
            return user;
        }

        match self.store.find_by_username(wanted).await {
            Ok(Some(owner)) if owner.id != user.id => {
                warn!(
                    "Username '{}' belongs to id={}; keeping '{}' for id={}",
                    wanted, owner.id, user.username, user.id
                );
                return user;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Could not check username '{}': {}", wanted, e);
                return user;
            }
        }

        match self.store.update_username(user.id, wanted).await {
            Ok(updated) => updated,
            Err(e) => {
                warn!(
                    "Keeping username '{}' for id={}: rename to '{}' failed: {}",
                    user.username, user.id, wanted, e
                );
                user
            }
        }
    }
}
