//! Atomic Slot Accessor
//!
//! Ordered (acquire/release) access to a host memory word addressed as a
//! base pointer plus a byte offset. The core asks for an offset once per
//! primitive type and caches it; it never computes layouts itself.
//!
//! Only full words are addressable. Host memory primitives guarantee
//! atomicity at 32- and 64-bit granularity, so there is no sub-word width.

use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::types::TypeCode;

/// Width of a directly addressable host memory word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordWidth {
    /// 32-bit word
    W32,
    /// 64-bit word
    W64,
}

impl WordWidth {
    /// Size of the word in bytes
    pub const fn bytes(self) -> usize {
        match self {
            WordWidth::W32 => 4,
            WordWidth::W64 => 8,
        }
    }
}

/// Host layout of an inline box: the payload cell is the only field
#[repr(C)]
#[derive(Debug, Default)]
pub struct InlineSlot<C> {
    /// Payload storage cell
    pub value: C,
}

impl<C> InlineSlot<C> {
    /// Wrap a payload cell
    pub const fn new(value: C) -> Self {
        Self { value }
    }

    /// Base address used with [`SlotAccessor::field_offset`]
    pub fn base_ptr(&self) -> *const u8 {
        (self as *const Self).cast::<u8>()
    }
}

/// Host memory primitive consumed by the boxed-value core
///
/// # Safety
/// `field_offset` must return the byte offset of the payload cell inside an
/// [`InlineSlot`] holding a `width` atomic, and `element_offset` the offset of
/// element `index` in a contiguous array of `width` atomics. Both offsets must
/// be aligned to `width`. The core dereferences `base + offset` through
/// `get_volatile` and `put_volatile`, so a wrong offset is a wild access. The
/// core still rejects offsets that leave the payload it owns.
pub unsafe trait SlotAccessor: Send + Sync {
    /// Byte offset of the payload field in an inline box of `owner`
    fn field_offset(&self, owner: TypeCode, width: WordWidth) -> usize;

    /// Byte offset of element `index` in an array of `width`-sized elements
    fn element_offset(&self, width: WordWidth, index: usize) -> usize;

    /// Acquire-load the word at `base + offset`
    ///
    /// # Safety
    /// `base + offset` must point to a live, aligned word of `width` that is
    /// only ever accessed atomically.
    unsafe fn get_volatile(&self, base: *const u8, offset: usize, width: WordWidth) -> u64;

    /// Release-store `bits` into the word at `base + offset`
    ///
    /// # Safety
    /// Same contract as [`SlotAccessor::get_volatile`].
    unsafe fn put_volatile(&self, base: *const u8, offset: usize, width: WordWidth, bits: u64);
}

/// Slot accessor backed by the process's own atomics
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeSlots;

// SAFETY: offsets come from the `InlineSlot` layout and the element stride.
unsafe impl SlotAccessor for NativeSlots {
    fn field_offset(&self, _owner: TypeCode, width: WordWidth) -> usize {
        match width {
            WordWidth::W32 => std::mem::offset_of!(InlineSlot<AtomicU32>, value),
            WordWidth::W64 => std::mem::offset_of!(InlineSlot<AtomicU64>, value),
        }
    }

    fn element_offset(&self, width: WordWidth, index: usize) -> usize {
        index * width.bytes()
    }

    unsafe fn get_volatile(&self, base: *const u8, offset: usize, width: WordWidth) -> u64 {
        let addr = base.add(offset).cast_mut();
        match width {
            WordWidth::W32 => AtomicU32::from_ptr(addr.cast::<u32>()).load(Ordering::Acquire) as u64,
            WordWidth::W64 => AtomicU64::from_ptr(addr.cast::<u64>()).load(Ordering::Acquire),
        }
    }

    unsafe fn put_volatile(&self, base: *const u8, offset: usize, width: WordWidth, bits: u64) {
        let addr = base.add(offset).cast_mut();
        match width {
            WordWidth::W32 => {
                AtomicU32::from_ptr(addr.cast::<u32>()).store(bits as u32, Ordering::Release)
            }
            WordWidth::W64 => AtomicU64::from_ptr(addr.cast::<u64>()).store(bits, Ordering::Release),
        }
    }
}

static SLOT_ACCESSOR: OnceCell<Box<dyn SlotAccessor>> = OnceCell::new();

/// Install the process-wide slot accessor.
///
/// Must happen before the first volatile access; afterwards the accessor
/// (and every offset cached from it) is fixed and the argument is handed back.
pub fn install_slot_accessor(
    accessor: Box<dyn SlotAccessor>,
) -> Result<(), Box<dyn SlotAccessor>> {
    SLOT_ACCESSOR.set(accessor)
}

/// The installed slot accessor, [`NativeSlots`] if none was installed
pub fn slot_accessor() -> &'static dyn SlotAccessor {
    SLOT_ACCESSOR.get_or_init(|| Box::new(NativeSlots)).as_ref()
}
