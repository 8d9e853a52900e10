use crate::{
    AccessToken, AccountError, ImplicitLoginReconciler, ReconcilerConfig,
    Result as AccountErrorResult,
};

use idp_auth::TokenIssuer;
use idp_core::{NewUser, User, identity_from_raw};
use idp_db::UserStore;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{info, warn};

/// Registration, the two login flows and WhoAmI over a shared store.
///
/// Cheap to clone; handlers hold one each.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenIssuer>,
    reconciler: Arc<ImplicitLoginReconciler>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn UserStore>,
        tokens: Arc<TokenIssuer>,
        reconciler_config: ReconcilerConfig,
    ) -> Self {
        let reconciler = Arc::new(ImplicitLoginReconciler::new(
            Arc::clone(&store),
            reconciler_config,
        ));

        Self {
            store,
            tokens,
            reconciler,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Create a user with a caller-chosen username and uuid.
    ///
    /// A uniqueness violation that slips past the pre-checks is a store error,
    /// not a duplicate: registration is never retried.
    pub async fn register(&self, username: &str, uuid: &str) -> AccountErrorResult<User> {
        let new_user = NewUser::new(uuid, username)?;

        if self
            .store
            .find_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateUsername {
                username: new_user.username,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.store.find_by_uuid(&new_user.uuid).await?.is_some() {
            return Err(AccountError::DuplicateUuid {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let user = self.store.insert(&new_user).await?;
        info!("Registered user id={} username={}", user.id, user.username);

        Ok(user)
    }

    /// Exchange a username and uuid pair for a session credential.
    pub async fn login(&self, username: &str, uuid: &str) -> AccountErrorResult<AccessToken> {
        let user = match self.store.find_by_username(username.trim()).await? {
            Some(user) if user.uuid == uuid.trim() => user,
            _ => {
                warn!("Login rejected for username={}", username);
                return Err(AccountError::CredentialMismatch {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        info!("Login succeeded for id={}", user.id);
        Ok(AccessToken::bearer(self.tokens.issue(user.id)?))
    }

    /// Resolve an init payload to a user, provisioning one if needed, and
    /// issue a credential for it.
    pub async fn implicit_login(&self, raw_init_data: &str) -> AccountErrorResult<AccessToken> {
        let identity = identity_from_raw(raw_init_data)?;
        let user = self.reconciler.reconcile(&identity).await?;

        info!(
            "Implicit login resolved uuid={} to id={}",
            identity.external_id, user.id
        );
        Ok(AccessToken::bearer(self.tokens.issue(user.id)?))
    }

    /// Resolve a session credential to the user it was issued for.
    pub async fn who_am_i(&self, token: &str) -> AccountErrorResult<User> {
        let subject_id = self.tokens.verify(token)?.subject_id()?;

        self.store
            .find_by_id(subject_id)
            .await?
            .ok_or_else(|| AccountError::UnknownSubject {
                subject_id,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
