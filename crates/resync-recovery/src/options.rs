//! Error-recovery configuration.
//!
//! Options are plain JSON with camelCase keys; every key is optional:
//!
//! ```json
//! {
//!   "singleTokenDeletion": true,
//!   "insertion": "followConsistent",
//!   "traceRecoverySet": false,
//!   "maxRecoveryConsume": 500
//! }
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// When `recover_inline` may pretend a missing token was present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertionPolicy {
    /// Never synthesize a token; a failed inline match is an error.
    #[default]
    Never,
    /// Synthesize when the current token could legally follow the missing one.
    FollowConsistent,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RecoveryOptions {
    /// Drop one stray token when the token after it is what was expected.
    pub single_token_deletion: bool,
    pub insertion: InsertionPolicy,
    /// Log every computed recovery set at debug level.
    pub trace_recovery_set: bool,
    /// Upper bound on tokens skipped by one resynchronization. `None` skips
    /// until a recovery token or end of input.
    pub max_recovery_consume: Option<usize>,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            single_token_deletion: true,
            insertion: InsertionPolicy::Never,
            trace_recovery_set: false,
            max_recovery_consume: None,
        }
    }
}

impl RecoveryOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let options: RecoveryOptions =
            serde_json::from_str(text).context("failed to parse recovery options")?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read recovery options {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("invalid recovery options in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_recovery_consume == Some(0) {
            bail!("maxRecoveryConsume must be greater than zero");
        }
        Ok(())
    }
}
