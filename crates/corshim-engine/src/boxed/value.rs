//! The boxed value itself and the host array it may alias

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;

use corshim_sdk::{
    number_formatter, slot_accessor, InlineSlot, NumberFormatInfo, ShimError, ShimResult,
    SlotAccessor, TypeCode, WordWidth,
};

use super::primitive::{Access, Primitive};

/// Host-native array of primitives
///
/// Fixed length, reference counted. Clones share the same cells, so a write
/// through one handle (or through a box aliasing an element) is visible to
/// every other holder.
pub struct HostArray<T: Primitive> {
    cells: Arc<[T::Cell]>,
}

impl<T: Primitive> HostArray<T> {
    /// Create an array of `len` zeros
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(|_| T::new_cell(T::ZERO)).collect(),
        }
    }

    /// Create an array holding a copy of `values`
    pub fn from_slice(values: &[T]) -> Self {
        Self {
            cells: values.iter().map(|&v| T::new_cell(v)).collect(),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the array has no elements
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Element at `index`, `None` when out of range
    pub fn get(&self, index: usize) -> Option<T> {
        self.cells.get(index).map(|cell| T::load(cell, Relaxed))
    }

    /// Overwrite the element at `index`
    pub fn set(&self, index: usize, value: T) -> ShimResult<()> {
        let cell = self.cells.get(index).ok_or(ShimError::IndexOutOfRange {
            index,
            len: self.len(),
        })?;
        T::store(cell, value, Relaxed);
        Ok(())
    }

    /// Snapshot of all elements
    pub fn to_vec(&self) -> Vec<T> {
        self.cells.iter().map(|cell| T::load(cell, Relaxed)).collect()
    }

    /// Whether both handles share storage
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    fn base_ptr(&self) -> *const u8 {
        self.cells.as_ptr().cast::<u8>()
    }
}

impl<T: Primitive> Clone for HostArray<T> {
    fn clone(&self) -> Self {
        Self {
            cells: Arc::clone(&self.cells),
        }
    }
}

impl<T: Primitive> From<Vec<T>> for HostArray<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_slice(&values)
    }
}

impl<T: Primitive> fmt::Debug for HostArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostArray")
            .field(&T::TYPE_CODE)
            .field(&self.to_vec())
            .finish()
    }
}

/// Where a box keeps its payload
enum Storage<T: Primitive> {
    /// Payload held directly
    Inline(InlineSlot<T::Cell>),
    /// Payload is element `index` of a shared host array
    ArrayView { array: HostArray<T>, index: usize },
}

/// A primitive boxed as a reference object
///
/// The storage mode is fixed at construction. The payload is mutable through
/// `&self`, the way a reference object's field is.
pub struct BoxedValue<T: Primitive> {
    storage: Storage<T>,
}

impl<T: Primitive> BoxedValue<T> {
    /// Box `value` inline
    pub fn new(value: T) -> Self {
        Self {
            storage: Storage::Inline(InlineSlot::new(T::new_cell(value))),
        }
    }

    /// Box element `index` of `array` without copying it
    pub fn in_array(array: &HostArray<T>, index: usize) -> ShimResult<Self> {
        if index >= array.len() {
            return Err(ShimError::IndexOutOfRange {
                index,
                len: array.len(),
            });
        }
        Ok(Self {
            storage: Storage::ArrayView {
                array: array.clone(),
                index,
            },
        })
    }

    /// Whether this box aliases an array element
    pub fn is_array_view(&self) -> bool {
        matches!(self.storage, Storage::ArrayView { .. })
    }

    /// Aliased array and element index, `None` for inline boxes
    pub fn array(&self) -> Option<(&HostArray<T>, usize)> {
        match &self.storage {
            Storage::Inline(_) => None,
            Storage::ArrayView { array, index } => Some((array, *index)),
        }
    }

    /// Origin type code of the payload
    pub fn type_code(&self) -> TypeCode {
        T::TYPE_CODE
    }

    /// Current payload
    pub fn get(&self) -> T {
        T::load(self.cell(), Relaxed)
    }

    /// Replace the payload
    pub fn set(&self, value: T) {
        T::store(self.cell(), value, Relaxed)
    }

    /// Acquire-load the payload through the slot accessor
    ///
    /// Only 32- and 64-bit payloads are addressable as host words.
    pub fn volatile_get(&self) -> ShimResult<T> {
        let width = Self::word_width("volatile read")?;
        let slots = slot_accessor();
        let (base, offset) = self.address(slots, width)?;
        // SAFETY: `address` checked that `base + offset` is an aligned `width`
        // word inside this box's own payload, kept alive by `&self`.
        let bits = unsafe { slots.get_volatile(base, offset, width) };
        Ok(T::from_bits(bits))
    }

    /// Release-store the payload through the slot accessor
    pub fn volatile_set(&self, value: T) -> ShimResult<()> {
        let width = Self::word_width("volatile write")?;
        let slots = slot_accessor();
        let (base, offset) = self.address(slots, width)?;
        // SAFETY: as in `volatile_get`.
        unsafe { slots.put_volatile(base, offset, width, value.to_bits()) };
        Ok(())
    }

    /// Same type and equal payloads; NaN never equals anything
    pub fn equals(&self, other: &Self) -> bool {
        self.get() == other.get()
    }

    /// Payload equals `value`
    pub fn equals_value(&self, value: T) -> bool {
        self.get() == value
    }

    /// Order the payload against `value`
    pub fn compare_to(&self, value: T) -> Ordering {
        self.get().compare(value)
    }

    /// Origin hash code of the payload
    pub fn hash_code(&self) -> i32 {
        self.get().hash_code()
    }

    /// Format with a standard format string; empty means canonical text
    pub fn format(
        &self,
        format: Option<&str>,
        provider: Option<&NumberFormatInfo>,
    ) -> ShimResult<String> {
        match format {
            None | Some("") => Ok(self.get().canonical_text()),
            Some(format) => number_formatter().format_number(format, provider, self.get().number_arg()),
        }
    }

    /// Canonical text; the provider does not take part
    pub fn format_with(&self, _provider: Option<&NumberFormatInfo>) -> String {
        self.get().canonical_text()
    }

    /// Reset the payload to zero
    pub fn clear(&self) {
        self.set(T::ZERO)
    }

    /// Copy this payload into `target`
    pub fn copy_to(&self, target: &Self) {
        target.set(self.get())
    }

    pub(crate) fn require(&self, access: Access) -> ShimResult<()> {
        if T::supports(access) {
            Ok(())
        } else {
            Err(ShimError::not_supported(access.name(), T::TYPE_CODE.name()))
        }
    }

    fn word_width(operation: &str) -> ShimResult<WordWidth> {
        T::WIDTH
            .word()
            .ok_or_else(|| ShimError::not_supported(operation, T::TYPE_CODE.name()))
    }

    fn cell(&self) -> &T::Cell {
        match &self.storage {
            Storage::Inline(slot) => &slot.value,
            Storage::ArrayView { array, index } => &array.cells[*index],
        }
    }

    /// Base pointer and byte offset of the payload word
    ///
    /// Offsets reported by the accessor must land on an aligned `width` word
    /// inside the memory this box owns or aliases.
    fn address(
        &self,
        slots: &dyn SlotAccessor,
        width: WordWidth,
    ) -> ShimResult<(*const u8, usize)> {
        let (base, offset, extent) = match &self.storage {
            Storage::Inline(slot) => {
                let offset = *T::offset_cache()
                    .get_or_init(|| slots.field_offset(T::TYPE_CODE, width));
                (slot.base_ptr(), offset, mem::size_of::<InlineSlot<T::Cell>>())
            }
            Storage::ArrayView { array, index } => (
                array.base_ptr(),
                slots.element_offset(width, *index),
                array.len() * mem::size_of::<T::Cell>(),
            ),
        };
        let in_bounds = offset
            .checked_add(width.bytes())
            .is_some_and(|end| end <= extent);
        if !in_bounds || offset % width.bytes() != 0 {
            return Err(ShimError::PlatformNotSupported(format!(
                "slot offset {} does not address a {}-byte word of a {} payload of {} bytes",
                offset,
                width.bytes(),
                T::TYPE_CODE.name(),
                extent
            )));
        }
        Ok((base, offset))
    }
}

macro_rules! float_classifiers {
    ($t:ty) => {
        impl BoxedValue<$t> {
            /// Payload is NaN
            pub fn is_nan(&self) -> bool {
                self.get().is_nan()
            }

            /// Payload is neither NaN nor infinite
            pub fn is_finite(&self) -> bool {
                self.get().is_finite()
            }

            /// Payload is an infinity of either sign
            pub fn is_infinity(&self) -> bool {
                self.get().is_infinite()
            }

            /// Payload is positive infinity
            pub fn is_positive_infinity(&self) -> bool {
                self.get() == <$t>::INFINITY
            }

            /// Payload is negative infinity
            pub fn is_negative_infinity(&self) -> bool {
                self.get() == <$t>::NEG_INFINITY
            }

            /// Sign bit is set, including `-0.0` and negative NaNs
            pub fn is_negative(&self) -> bool {
                self.get().is_sign_negative()
            }

            /// Payload is a normal number
            pub fn is_normal(&self) -> bool {
                self.get().is_normal()
            }

            /// Payload is subnormal
            pub fn is_subnormal(&self) -> bool {
                self.get().is_subnormal()
            }
        }
    };
}

float_classifiers!(f32);
float_classifiers!(f64);

impl<T: Primitive> Clone for BoxedValue<T> {
    /// Always a fresh inline box, even when `self` aliases an array
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Primitive> Default for BoxedValue<T> {
    fn default() -> Self {
        Self::new(T::ZERO)
    }
}

impl<T: Primitive> From<T> for BoxedValue<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Primitive> PartialEq for BoxedValue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

macro_rules! integer_eq {
    ($($t:ty),*) => {
        $(impl Eq for BoxedValue<$t> {})*
    };
}

integer_eq!(i8, u8, i16, u16, i32, u32, i64, u64);

impl<T: Primitive> Hash for BoxedValue<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl<T: Primitive> fmt::Display for BoxedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get().canonical_text())
    }
}

impl<T: Primitive> fmt::Debug for BoxedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("BoxedValue");
        s.field("type", &T::TYPE_CODE).field("value", &self.get());
        if let Storage::ArrayView { index, .. } = &self.storage {
            s.field("index", index);
        }
        s.finish()
    }
}
