//! Auth flow state
//!
//! The sign-in and sign-up elements drive a hosted identity provider. This
//! type models where a flow stands so the presentation layer can render the
//! right step; it performs no network access.
//!
//! ```text
//! Uninitialized ──start──▶ AwaitingIdentifier ──submit_identifier──▶ AwaitingVerification
//!                                                                        │
//!                            Complete ◀──complete_second_factor── NeedsSecondFactor
//!                               ▲                                        ▲
//!                               └────────────── verify ──────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ElementsError, Result};

/// How a first-factor code or link is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStrategy {
    EmailCode,
    EmailLink,
    PhoneCode,
    Password,
}

/// Second factors offered after the first one succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondFactor {
    Totp,
    PhoneCode,
    BackupCode,
}

/// Outcome of a first-factor verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Signed in
    Complete { session_id: String },
    /// Another factor is required
    SecondFactorRequired { factors: Vec<SecondFactor> },
}

/// Where an auth flow currently stands
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthFlow {
    #[default]
    Uninitialized,
    AwaitingIdentifier,
    AwaitingVerification {
        identifier: String,
        strategy: VerificationStrategy,
    },
    NeedsSecondFactor {
        factors: Vec<SecondFactor>,
    },
    Complete {
        session_id: String,
    },
}

impl AuthFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identity provider finished loading
    pub fn start(self) -> Result<Self> {
        match self {
            AuthFlow::Uninitialized => Ok(AuthFlow::AwaitingIdentifier),
            other => Err(other.invalid("start")),
        }
    }

    /// The user entered an email, phone number or username
    pub fn submit_identifier(
        self,
        identifier: impl Into<String>,
        strategy: VerificationStrategy,
    ) -> Result<Self> {
        let identifier = identifier.into();
        match self {
            AuthFlow::AwaitingIdentifier if !identifier.trim().is_empty() => {
                Ok(AuthFlow::AwaitingVerification {
                    identifier,
                    strategy,
                })
            }
            AuthFlow::AwaitingIdentifier => Err(ElementsError::InvalidTransition {
                state: AuthFlow::AwaitingIdentifier.to_string(),
                action: "submit an empty identifier".to_string(),
            }),
            other => Err(other.invalid("submit an identifier")),
        }
    }

    /// The first factor was verified
    pub fn verify(self, outcome: Verification) -> Result<Self> {
        match (self, outcome) {
            (AuthFlow::AwaitingVerification { .. }, Verification::Complete { session_id }) => {
                Ok(AuthFlow::Complete { session_id })
            }
            (AuthFlow::AwaitingVerification { .. }, Verification::SecondFactorRequired { factors })
                if !factors.is_empty() =>
            {
                Ok(AuthFlow::NeedsSecondFactor { factors })
            }
            (state @ AuthFlow::AwaitingVerification { .. }, _) => {
                Err(ElementsError::InvalidTransition {
                    state: state.to_string(),
                    action: "require a second factor without offering one".to_string(),
                })
            }
            (other, _) => Err(other.invalid("verify")),
        }
    }

    /// The second factor was verified with one of the offered methods
    pub fn complete_second_factor(
        self,
        factor: SecondFactor,
        session_id: impl Into<String>,
    ) -> Result<Self> {
        match self {
            AuthFlow::NeedsSecondFactor { ref factors } if factors.contains(&factor) => {
                Ok(AuthFlow::Complete {
                    session_id: session_id.into(),
                })
            }
            other => Err(other.invalid("complete a second factor")),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, AuthFlow::Complete { .. })
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            AuthFlow::Complete { session_id } => Some(session_id),
            _ => None,
        }
    }

    fn invalid(&self, action: &str) -> ElementsError {
        ElementsError::InvalidTransition {
            state: self.to_string(),
            action: action.to_string(),
        }
    }
}

impl fmt::Display for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFlow::Uninitialized => f.write_str("uninitialized"),
            AuthFlow::AwaitingIdentifier => f.write_str("awaiting identifier"),
            AuthFlow::AwaitingVerification { .. } => f.write_str("awaiting verification"),
            AuthFlow::NeedsSecondFactor { .. } => f.write_str("needing a second factor"),
            AuthFlow::Complete { .. } => f.write_str("complete"),
        }
    }
}
