//! Scan-to-unlock gate.
//!
//! Decoding happens outside the engine. Whatever scanner the host uses hands
//! the decoded payload here, and the gate answers yes or no.

use crate::core::error::{EngineError, Result};

/// Checks scanned payloads against the shared secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockGate {
    secret: String,
}

impl UnlockGate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Accept the payload iff it matches the secret exactly.
    pub fn verify(&self, payload: &str) -> Result<()> {
        if payload == self.secret {
            Ok(())
        } else {
            tracing::debug!(len = payload.len(), "rejected scanned payload");
            Err(EngineError::UnlockMismatch)
        }
    }
}
