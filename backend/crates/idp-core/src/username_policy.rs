//! Username candidates for implicitly provisioned users.
//!
//! The base candidate is the source-supplied username when there is one,
//! otherwise `<prefix>_<external_id>_<display_name>`. Creation attempts that
//! collide are disambiguated by appending the external id, and from the
//! second attempt on, the attempt index as well.

use crate::ExternalIdentity;

#[derive(Debug, Clone)]
pub struct UsernamePolicy {
    source_prefix: String,
}

impl UsernamePolicy {
    pub fn new(source_prefix: impl Into<String>) -> Self {
        Self {
            source_prefix: source_prefix.into(),
        }
    }

    /// Username the identity should carry when nothing collides.
    pub fn base_candidate(&self, identity: &ExternalIdentity) -> String {
        match identity.source_username() {
            Some(username) => username.to_string(),
            None => format!(
                "{}_{}_{}",
                self.source_prefix,
                identity.external_id,
                identity.display_name()
            )
            .trim()
            .to_string(),
        }
    }

    /// Candidate for creation attempt `attempt` (zero-based).
    ///
    /// Attempt 0 uses `base` unless `base_taken`, in which case the external id
    /// is appended. Later attempts always use `<base>_<external_id>_<attempt>`.
    pub fn candidate_for_attempt(
        &self,
        base: &str,
        identity: &ExternalIdentity,
        attempt: u32,
        base_taken: bool,
    ) -> String {
        match (attempt, base_taken) {
            (0, false) => base.to_string(),
            (0, true) => format!("{}_{}", base, identity.external_id),
            (n, _) => format!("{}_{}_{}", base, identity.external_id, n),
        }
    }
}
