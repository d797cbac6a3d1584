//! Shared fixtures for the integration tests.

use landsync::model::Land;

/// Builds one land plot per id, region defaulted.
pub fn lands(ids: &[&str]) -> Vec<Land> {
    ids.iter().map(|id| Land::new(id, id, "mesa")).collect()
}
