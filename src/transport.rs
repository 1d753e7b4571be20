// CLASSIFICATION: COMMUNITY
// Filename: transport.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Collaborator interfaces consumed by the mailbox manager.
//!
//! The manager never touches mailbox memory itself. It asks a
//! [`MifTransport`] where the mailbox region lives and, when DCXO tuning is
//! enabled, forwards register requests through a [`TuneTransport`].

#[cfg(feature = "dcxo-tune")]
use std::sync::Mutex;

use thiserror::Error;

/// Failures reported by a transport backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport unavailable")]
    Unavailable,
    #[error("request {op:#x} rejected with status {status}")]
    Rejected { op: u32, status: i32 },
}

/// Shared-memory interface that owns the mailbox region.
pub trait MifTransport: Send + Sync {
    /// Host-visible base address of the mailbox region, `None` while unmapped.
    fn mbox_base(&self) -> Option<usize>;

    /// Base of the WPAN subsystem's mailbox region, when it runs independently.
    fn wpan_mbox_base(&self) -> Option<usize> {
        None
    }
}

/// Fixed mailbox region addresses, typically taken from a platform descriptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StaticRegion {
    base: Option<usize>,
    wpan_base: Option<usize>,
}

impl StaticRegion {
    /// Mailbox region mapped at `base`, no WPAN region.
    #[must_use]
    pub fn mapped(base: usize) -> Self {
        Self {
            base: Some(base),
            wpan_base: None,
        }
    }

    /// Neither region mapped; address lookups fail with `RegionUnmapped`.
    #[must_use]
    pub fn unmapped() -> Self {
        Self::default()
    }

    /// Add a WPAN mailbox region at `base`.
    #[must_use]
    pub fn with_wpan(mut self, base: usize) -> Self {
        self.wpan_base = Some(base);
        self
    }
}

impl MifTransport for StaticRegion {
    fn mbox_base(&self) -> Option<usize> {
        self.base
    }

    fn wpan_mbox_base(&self) -> Option<usize> {
        self.wpan_base
    }
}

/// APM mailbox operations used for DCXO tuning.
#[cfg(feature = "dcxo-tune")]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApmOp {
    GetTune = 0x4,
    SetTune = 0x5,
}

#[cfg(feature = "dcxo-tune")]
impl ApmOp {
    #[must_use]
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Narrow register interface to the APM for calibration values.
#[cfg(feature = "dcxo-tune")]
pub trait TuneTransport: Send + Sync {
    /// Issue `op` with `value`. `SetTune` echoes the written value back,
    /// `GetTune` ignores `value` and returns the register contents.
    fn apm_request(&self, op: ApmOp, value: u32) -> Result<u32, TransportError>;
}

/// In-memory stand-in for the APM tune register.
#[cfg(feature = "dcxo-tune")]
#[derive(Debug)]
pub struct SimTuneRegister {
    value: Mutex<u32>,
    online: bool,
}

#[cfg(feature = "dcxo-tune")]
impl SimTuneRegister {
    #[must_use]
    pub fn new(initial: u32) -> Self {
        Self {
            value: Mutex::new(initial),
            online: true,
        }
    }

    /// A register whose every request fails with [`TransportError::Unavailable`].
    #[must_use]
    pub fn offline() -> Self {
        Self {
            value: Mutex::new(0),
            online: false,
        }
    }
}

#[cfg(feature = "dcxo-tune")]
impl TuneTransport for SimTuneRegister {
    fn apm_request(&self, op: ApmOp, value: u32) -> Result<u32, TransportError> {
        if !self.online {
            return Err(TransportError::Unavailable);
        }
        let mut reg = self.value.lock().map_err(|_| TransportError::Unavailable)?;
        match op {
            ApmOp::SetTune => *reg = value,
            ApmOp::GetTune => {}
        }
        Ok(*reg)
    }
}
