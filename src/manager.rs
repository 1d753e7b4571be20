// CLASSIFICATION: COMMUNITY
// Filename: manager.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! MIF mailbox manager.
//!
//! Hands out contiguous runs of hardware mailbox slots to the subsystems
//! sharing a MIF interface. Occupancy lives in a [`SlotBitmap`] and every
//! transition happens under a single mutex, so concurrent callers never
//! receive overlapping slots.
//!
//! Allocation is first-fit from slot 0 upward. Frees must name a range that
//! is entirely allocated; anything else is reported as a caller bug and the
//! bitmap is left untouched.

use std::ops::Range;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};

use crate::bitmap::SlotBitmap;
use crate::error::{MboxError, MboxResult};
use crate::platform::PoolLayout;
use crate::transport::MifTransport;

/// A run of mailboxes owned by the caller until passed back to
/// [`MailboxPool::free_handle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MboxHandle {
    first: usize,
    count: usize,
}

impl MboxHandle {
    /// Index of the first mailbox in the run.
    #[must_use]
    pub fn first(&self) -> usize {
        self.first
    }

    /// Number of mailboxes in the run.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Slot indices covered by the run.
    #[must_use]
    pub fn indices(&self) -> Range<usize> {
        self.first..self.first + self.count
    }
}

/// Host-visible address of a single mailbox register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MboxPtr(usize);

impl MboxPtr {
    /// Address as an integer.
    #[must_use]
    pub fn addr(self) -> usize {
        self.0
    }

    /// Raw register pointer. Dereferencing it is only sound while the
    /// transport keeps the region mapped.
    #[must_use]
    pub fn as_ptr(self) -> *mut u32 {
        self.0 as *mut u32
    }
}

/// Point-in-time view of the pool, taken under the lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    /// Whether the pool was initialised at the time of the snapshot.
    pub in_use: bool,
    /// Free mailbox count.
    pub free: usize,
    /// Occupancy, one bit per mailbox.
    pub bitmap: SlotBitmap,
}

#[derive(Debug)]
struct PoolState {
    in_use: bool,
    free: usize,
    bitmap: SlotBitmap,
}

/// Fixed-capacity mailbox slot allocator.
pub struct MailboxPool {
    layout: PoolLayout,
    transport: Arc<dyn MifTransport>,
    state: Mutex<PoolState>,
}

impl MailboxPool {
    /// Create a pool for `layout`. The pool starts out of use; call
    /// [`MailboxPool::init`] before allocating.
    pub fn new(layout: PoolLayout, transport: Arc<dyn MifTransport>) -> MboxResult<Self> {
        let bitmap = SlotBitmap::new(layout.capacity())
            .ok_or_else(|| MboxError::invalid("capacity exceeds bitmap width"))?;
        Ok(Self {
            layout,
            transport,
            state: Mutex::new(PoolState {
                in_use: false,
                free: 0,
                bitmap,
            }),
        })
    }

    fn lock(&self) -> MboxResult<MutexGuard<'_, PoolState>> {
        self.state.lock().map_err(|_| MboxError::LockPoisoned)
    }

    fn lock_in_use(&self) -> MboxResult<MutexGuard<'_, PoolState>> {
        let st = self.lock()?;
        if !st.in_use {
            return Err(MboxError::NotInitialized);
        }
        Ok(st)
    }

    /// Geometry the pool was built with.
    #[must_use]
    pub fn layout(&self) -> PoolLayout {
        self.layout
    }

    /// Total number of mailboxes managed.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.layout.capacity()
    }

    /// Bring the pool up with every mailbox free.
    pub fn init(&self) -> MboxResult<()> {
        let capacity = self.capacity();
        let mut st = self.lock()?;
        if st.in_use {
            return Err(MboxError::AlreadyInitialized);
        }
        st.bitmap = SlotBitmap::new(capacity)
            .ok_or_else(|| MboxError::invalid("capacity exceeds bitmap width"))?;
        st.free = capacity;
        st.in_use = true;
        info!("mifmbox: init {} mailboxes", capacity);
        Ok(())
    }

    /// Reserve `n` contiguous mailboxes, lowest index first.
    pub fn alloc_mboxes(&self, n: usize) -> MboxResult<MboxHandle> {
        let mut st = self.lock_in_use()?;
        if n == 0 {
            return Err(MboxError::invalid("mailbox count must be non-zero"));
        }
        if n > self.capacity() {
            return Err(MboxError::invalid("mailbox count exceeds capacity"));
        }
        let exhausted = MboxError::ResourceExhausted {
            requested: n,
            free: st.free,
        };
        if st.free < n {
            warn!("mifmbox: {} requested, {} free", n, st.free);
            return Err(exhausted);
        }
        let Some(first) = st.bitmap.find_next_zero_area(0, n) else {
            warn!(
                "mifmbox: no run of {} in {} ({} free)",
                n, st.bitmap, st.free
            );
            return Err(exhausted);
        };
        if !st.bitmap.set_range(first, n) {
            return Err(MboxError::invalid("mailbox range exceeds capacity"));
        }
        st.free -= n;
        debug!("mifmbox: alloc [{}; +{}] -> {}", first, n, st.bitmap);
        Ok(MboxHandle { first, count: n })
    }

    /// Release `n` mailboxes starting at `first`. The whole range must be
    /// allocated; otherwise nothing is cleared.
    pub fn free_mboxes(&self, first: usize, n: usize) -> MboxResult<()> {
        let mut st = self.lock_in_use()?;
        let capacity = self.capacity();
        if n == 0 {
            return Err(MboxError::invalid("mailbox count must be non-zero"));
        }
        if first >= capacity {
            return Err(MboxError::invalid("first mailbox out of range"));
        }
        match first.checked_add(n) {
            Some(end) if end <= capacity => {}
            _ => return Err(MboxError::invalid("mailbox range exceeds capacity")),
        }
        if !st.bitmap.range_is_set(first, n) {
            warn!(
                "mifmbox: rejecting free of [{}; +{}], bitmap {}",
                first, n, st.bitmap
            );
            return Err(MboxError::DoubleFreeOrInvalidRange { first, count: n });
        }
        if !st.bitmap.clear_range(first, n) {
            return Err(MboxError::invalid("mailbox range exceeds capacity"));
        }
        st.free += n;
        debug!("mifmbox: free [{}; +{}] -> {}", first, n, st.bitmap);
        Ok(())
    }

    /// Release a run previously returned by [`MailboxPool::alloc_mboxes`].
    pub fn free_handle(&self, handle: MboxHandle) -> MboxResult<()> {
        self.free_mboxes(handle.first, handle.count)
    }

    /// Address of mailbox `index` in the MIF mailbox region.
    pub fn mbox_ptr(&self, index: usize) -> MboxResult<MboxPtr> {
        self.translate(index, |t| t.mbox_base())
    }

    /// Address of mailbox `index` in the WPAN subsystem's mailbox region.
    #[cfg(feature = "independent-subsystem")]
    pub fn mbox_ptr_wpan(&self, index: usize) -> MboxResult<MboxPtr> {
        self.translate(index, |t| t.wpan_mbox_base())
    }

    fn translate(
        &self,
        index: usize,
        base_of: impl FnOnce(&dyn MifTransport) -> Option<usize>,
    ) -> MboxResult<MboxPtr> {
        drop(self.lock_in_use()?);
        if index >= self.capacity() {
            return Err(MboxError::invalid("mailbox index out of range"));
        }
        let base = base_of(self.transport.as_ref()).ok_or(MboxError::RegionUnmapped)?;
        index
            .checked_mul(self.layout.slot_stride())
            .and_then(|offset| base.checked_add(offset))
            .map(MboxPtr)
            .ok_or_else(|| MboxError::invalid("mailbox address overflows"))
    }

    /// Tear the pool down. Outstanding handles become invalid; the caller is
    /// expected to have released them.
    pub fn deinit(&self) -> MboxResult<()> {
        let mut st = self.lock()?;
        if !st.in_use {
            debug!("mifmbox: deinit on idle pool");
            return Ok(());
        }
        let outstanding = self.capacity() - st.free;
        if outstanding > 0 {
            warn!(
                "mifmbox: deinit with {} mailboxes still allocated ({})",
                outstanding, st.bitmap
            );
        }
        st.in_use = false;
        info!("mifmbox: deinit");
        Ok(())
    }

    /// True between [`MailboxPool::init`] and [`MailboxPool::deinit`].
    pub fn is_in_use(&self) -> MboxResult<bool> {
        Ok(self.lock()?.in_use)
    }

    /// Number of free mailboxes.
    pub fn free_count(&self) -> MboxResult<usize> {
        Ok(self.lock_in_use()?.free)
    }

    /// Copy of the lifecycle flag, free count and bitmap. Works whether or
    /// not the pool is in use.
    pub fn snapshot(&self) -> MboxResult<PoolSnapshot> {
        let st = self.lock()?;
        Ok(PoolSnapshot {
            in_use: st.in_use,
            free: st.free,
            bitmap: st.bitmap,
        })
    }
}

impl core::fmt::Debug for MailboxPool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MailboxPool")
            .field("layout", &self.layout)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
