// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Error taxonomy shared by the mailbox manager and the tune interface.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by [`crate::MailboxPool`] and [`crate::DcxoTune`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MboxError {
    #[error("mailbox manager already initialised")]
    AlreadyInitialized,
    #[error("mailbox manager not initialised")]
    NotInitialized,
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
    #[error("no contiguous run of {requested} mailboxes ({free} free)")]
    ResourceExhausted { requested: usize, free: usize },
    #[error("mailboxes [{first}; +{count}] are not all allocated")]
    DoubleFreeOrInvalidRange { first: usize, count: usize },
    #[error("mailbox region is not mapped")]
    RegionUnmapped,
    #[error("mailbox manager lock poisoned")]
    LockPoisoned,
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
}

impl MboxError {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        MboxError::InvalidArgument { reason }
    }
}

pub type MboxResult<T> = Result<T, MboxError>;
