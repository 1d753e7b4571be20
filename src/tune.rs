// CLASSIFICATION: COMMUNITY
// Filename: tune.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! DCXO calibration value, forwarded to the APM through the mailbox transport.

use std::sync::{Arc, Mutex};

use log::{debug, warn};

use crate::error::{MboxError, MboxResult};
use crate::transport::{ApmOp, TuneTransport};

/// Guarded get/set access to the DCXO tune register.
///
/// Requests are serialised by an internal lock independent of any
/// [`crate::MailboxPool`]. The last value read or written is cached.
pub struct DcxoTune {
    transport: Arc<dyn TuneTransport>,
    cached: Mutex<Option<u32>>,
}

impl DcxoTune {
    /// Wrap `transport`. Nothing is read until the first request.
    pub fn new(transport: Arc<dyn TuneTransport>) -> Self {
        Self {
            transport,
            cached: Mutex::new(None),
        }
    }

    /// Write `value` to the tune register (APM op `SetTune`).
    pub fn set(&self, value: u32) -> MboxResult<()> {
        let mut cached = self.cached.lock().map_err(|_| MboxError::LockPoisoned)?;
        match self.transport.apm_request(ApmOp::SetTune, value) {
            Ok(_) => {
                debug!("mifmbox: dcxo tune set to {:#x}", value);
                *cached = Some(value);
                Ok(())
            }
            Err(e) => {
                warn!("mifmbox: dcxo tune set failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Read the tune register (APM op `GetTune`).
    pub fn get(&self) -> MboxResult<u32> {
        let mut cached = self.cached.lock().map_err(|_| MboxError::LockPoisoned)?;
        let value = self.transport.apm_request(ApmOp::GetTune, 0).map_err(|e| {
            warn!("mifmbox: dcxo tune get failed: {e}");
            MboxError::from(e)
        })?;
        *cached = Some(value);
        Ok(value)
    }

    /// Last value seen by [`DcxoTune::set`] or [`DcxoTune::get`].
    pub fn cached(&self) -> MboxResult<Option<u32>> {
        Ok(*self.cached.lock().map_err(|_| MboxError::LockPoisoned)?)
    }
}
