// CLASSIFICATION: COMMUNITY
// Filename: platform.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Platform profiles for the MIF mailbox block.
//!
//! The number of mailbox slots is fixed per SoC. A profile picks the default
//! slot count; [`PoolLayout`] is the validated geometry handed to the pool.

use serde::Deserialize;

use crate::bitmap::MAX_MBOX_SLOTS;
use crate::error::{MboxError, MboxResult};

/// Mailbox registers are 32-bit and packed back to back.
pub const DEFAULT_SLOT_STRIDE: usize = core::mem::size_of::<u32>();

/// SoC identity selecting the mailbox slot count.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SocProfile {
    Exynos7570,
    Exynos7872,
    Exynos7885,
    Exynos9610,
    Exynos9630,
    /// PCIe-attached parts emulating the mailbox block in host memory.
    PcieEmulation,
    #[default]
    Generic,
}

impl SocProfile {
    /// Mailbox slot count for this SoC.
    #[must_use]
    pub fn mbox_count(self) -> usize {
        match self {
            SocProfile::Exynos7570 | SocProfile::PcieEmulation => 8,
            SocProfile::Exynos7872
            | SocProfile::Exynos7885
            | SocProfile::Exynos9610
            | SocProfile::Exynos9630
            | SocProfile::Generic => 4,
        }
    }

    /// Default geometry for this SoC.
    #[must_use]
    pub fn layout(self) -> PoolLayout {
        PoolLayout {
            capacity: self.mbox_count(),
            slot_stride: DEFAULT_SLOT_STRIDE,
        }
    }
}

/// Validated mailbox geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolLayout {
    capacity: usize,
    slot_stride: usize,
}

impl PoolLayout {
    /// Build a layout, rejecting a zero or oversized capacity and a zero stride.
    pub fn new(capacity: usize, slot_stride: usize) -> MboxResult<Self> {
        if capacity == 0 {
            return Err(MboxError::invalid("capacity must be non-zero"));
        }
        if capacity > MAX_MBOX_SLOTS {
            return Err(MboxError::invalid("capacity exceeds bitmap width"));
        }
        if slot_stride == 0 {
            return Err(MboxError::invalid("slot stride must be non-zero"));
        }
        Ok(Self {
            capacity,
            slot_stride,
        })
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn slot_stride(&self) -> usize {
        self.slot_stride
    }
}

impl Default for PoolLayout {
    fn default() -> Self {
        SocProfile::default().layout()
    }
}
