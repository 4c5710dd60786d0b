use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest record count a single run will accept.
pub const MAX_RECORDS: u64 = 1_000_000;

/// Largest record count allowed under [`IdPolicy::Random`]. Above this the
/// collision risk of uniformly drawn DNIs/RUCs is no longer acceptable and
/// the sequential policy is required.
pub const RANDOM_POLICY_MAX: u64 = 10_000;

/// How natural keys (DNI, RUC) and the batch (date, time) stamp are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Uniform random draw. Collisions are possible and surface as
    /// constraint violations; acceptable only at low volumes.
    Random,
    /// Derived from the event index; collision-free for any run length.
    Sequential,
}

/// Probabilities for the two probabilistic branches of an event.
///
/// Tests pin these to 0.0 or 1.0 to exercise a single arm deterministically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BranchPolicy {
    /// Probability that a natural buyer has a legal buyer representing it.
    pub legal_representation: f64,
    /// Probability that the sale line references the quoted product rather
    /// than the base product.
    pub quoted_sale: f64,
}

impl Default for BranchPolicy {
    fn default() -> Self {
        Self {
            legal_representation: 0.5,
            quoted_sale: 0.5,
        }
    }
}

/// Configuration for one generation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunConfig {
    pub id_policy: IdPolicy,
    pub branches: BranchPolicy,
    /// Seed for the run RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            id_policy: IdPolicy::Sequential,
            branches: BranchPolicy::default(),
            seed: None,
        }
    }
}

/// Validate a requested record count against the volume limits before any
/// generation begins.
pub fn validate_records(records: u64, policy: IdPolicy) -> Result<()> {
    if records == 0 || records > MAX_RECORDS {
        return Err(Error::InvalidInput(format!(
            "record count must be between 1 and {MAX_RECORDS}, got {records}"
        )));
    }
    if policy == IdPolicy::Random && records > RANDOM_POLICY_MAX {
        return Err(Error::InvalidInput(format!(
            "random identity policy is limited to {RANDOM_POLICY_MAX} records; \
             use the sequential policy for {records}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_oversized_counts() {
        assert!(validate_records(0, IdPolicy::Sequential).is_err());
        assert!(validate_records(MAX_RECORDS + 1, IdPolicy::Sequential).is_err());
        assert!(validate_records(MAX_RECORDS, IdPolicy::Sequential).is_ok());
    }

    #[test]
    fn random_policy_is_volume_limited() {
        assert!(validate_records(RANDOM_POLICY_MAX, IdPolicy::Random).is_ok());
        assert!(validate_records(RANDOM_POLICY_MAX + 1, IdPolicy::Random).is_err());
        assert!(validate_records(RANDOM_POLICY_MAX + 1, IdPolicy::Sequential).is_ok());
    }
}
