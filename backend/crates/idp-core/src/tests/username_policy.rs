use crate::{ExternalIdentity, UsernamePolicy};

use idp_config::DEFAULT_SOURCE_PREFIX;

use googletest::assert_that;
use googletest::prelude::eq;
use proptest::prelude::*;

// =========================================================================
// Base candidate
// =========================================================================

#[test]
fn given_source_username_when_base_candidate_then_used_verbatim() {
    let policy = UsernamePolicy::new(DEFAULT_SOURCE_PREFIX);
    let identity = ExternalIdentity::new("123").with_username("alice");

    assert_that!(policy.base_candidate(&identity), eq("alice"));
}

#[test]
fn given_no_source_username_when_base_candidate_then_namespaced_with_prefix_and_id() {
    // Given: the display name alone ("bob") is already owned elsewhere
    let policy = UsernamePolicy::new(DEFAULT_SOURCE_PREFIX);
    let identity = ExternalIdentity::new("123").with_names(Some("bob"), None);

    // When
    let candidate = policy.base_candidate(&identity);

    // Then
    assert_that!(candidate, eq("max_123_bob"));
}

#[test]
fn given_custom_prefix_and_no_names_when_base_candidate_then_uses_fallback_name() {
    let policy = UsernamePolicy::new("tg");
    let identity = ExternalIdentity::new("7");

    assert_that!(policy.base_candidate(&identity), eq("tg_7_user_7"));
}

// =========================================================================
// Attempt candidates
// =========================================================================

#[test]
fn given_first_attempt_and_free_base_when_candidate_then_base() {
    let policy = UsernamePolicy::new(DEFAULT_SOURCE_PREFIX);
    let identity = ExternalIdentity::new("123");

    assert_that!(
        policy.candidate_for_attempt("alice", &identity, 0, false),
        eq("alice")
    );
}

#[test]
fn given_first_attempt_and_taken_base_when_candidate_then_external_id_appended() {
    let policy = UsernamePolicy::new(DEFAULT_SOURCE_PREFIX);
    let identity = ExternalIdentity::new("123");

    assert_that!(
        policy.candidate_for_attempt("alice", &identity, 0, true),
        eq("alice_123")
    );
}

#[test]
fn given_later_attempt_when_candidate_then_external_id_and_index_appended() {
    let policy = UsernamePolicy::new(DEFAULT_SOURCE_PREFIX);
    let identity = ExternalIdentity::new("123");

    assert_that!(
        policy.candidate_for_attempt("alice", &identity, 2, false),
        eq("alice_123_2")
    );
}

proptest! {
    #[test]
    fn given_distinct_attempts_when_candidates_generated_then_all_differ(
        base in "[a-z]{1,12}",
        external_id in "[0-9]{1,10}",
    ) {
        let policy = UsernamePolicy::new(DEFAULT_SOURCE_PREFIX);
        let identity = ExternalIdentity::new(external_id);

        let candidates = [
            policy.candidate_for_attempt(&base, &identity, 0, true),
            policy.candidate_for_attempt(&base, &identity, 1, true),
            policy.candidate_for_attempt(&base, &identity, 2, true),
        ];

        prop_assert_ne!(&candidates[0], &candidates[1]);
        prop_assert_ne!(&candidates[1], &candidates[2]);
        prop_assert_ne!(&candidates[0], &candidates[2]);
        for candidate in &candidates {
            prop_assert_ne!(candidate, &base);
        }
    }
}
