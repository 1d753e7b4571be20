// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v1.1
// Date Modified: 2026-10-19
// Author: Lukas Bower

//! MIF mailbox manager.
//!
//! Allocates contiguous runs of hardware mailbox slots to the subsystems
//! sharing a MIF interface and translates slot indices into addresses in the
//! shared mailbox region.

/// Slot occupancy bitmap
pub mod bitmap;

/// TOML configuration loading
pub mod config;

/// Error taxonomy
pub mod error;

/// Mailbox slot allocator
pub mod manager;

/// SoC profiles and pool geometry
pub mod platform;

/// Transport collaborators (mailbox region, APM registers)
pub mod transport;

/// DCXO calibration value access
#[cfg(feature = "dcxo-tune")]
pub mod tune;

pub use bitmap::{SlotBitmap, MAX_MBOX_SLOTS};
pub use error::{MboxError, MboxResult};
pub use manager::{MailboxPool, MboxHandle, MboxPtr, PoolSnapshot};
pub use platform::{PoolLayout, SocProfile};
pub use transport::{MifTransport, StaticRegion, TransportError};
#[cfg(feature = "dcxo-tune")]
pub use transport::{ApmOp, SimTuneRegister, TuneTransport};
#[cfg(feature = "dcxo-tune")]
pub use tune::DcxoTune;
