//! Primitive payloads and their capability table
//!
//! Every origin primitive (`SByte`, `Byte`, `Int16`, ... `Single`, `Double`)
//! is one `Primitive` impl. What differs between them is data: native width,
//! signedness/format, storage cell, hashing rule and canonical text. Which
//! narrow-width accessors a payload supports is decided by
//! [`indirection_supported`] from width and format alone.

use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{
    self, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicU16, AtomicU32, AtomicU64, AtomicU8,
};

use corshim_sdk::{number_formatter, NumberArg, TypeCode, WordWidth};
use once_cell::sync::OnceCell;

/// Native bit width of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeWidth {
    /// 8 bits
    Bits8,
    /// 16 bits
    Bits16,
    /// 32 bits
    Bits32,
    /// 64 bits
    Bits64,
}

impl NativeWidth {
    /// Width in bits
    pub const fn bits(self) -> u32 {
        match self {
            NativeWidth::Bits8 => 8,
            NativeWidth::Bits16 => 16,
            NativeWidth::Bits32 => 32,
            NativeWidth::Bits64 => 64,
        }
    }

    /// Host memory word of this width; sub-word widths have none
    pub const fn word(self) -> Option<WordWidth> {
        match self {
            NativeWidth::Bits32 => Some(WordWidth::W32),
            NativeWidth::Bits64 => Some(WordWidth::W64),
            NativeWidth::Bits8 | NativeWidth::Bits16 => None,
        }
    }
}

/// Interpretation of a payload's bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    /// Two's-complement signed integer
    Signed,
    /// Unsigned integer
    Unsigned,
    /// IEEE 754 binary float
    Float,
}

/// Narrow-width accessor family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Unsigned 8-bit view
    U8,
    /// Signed 8-bit view
    I8,
    /// Unsigned 16-bit view
    U16,
    /// Signed 16-bit view
    I16,
    /// Unsigned 32-bit view
    U32,
    /// Signed 32-bit view
    I32,
    /// 64-bit integer view
    I64,
    /// 32-bit float view
    F32,
    /// 64-bit float view
    F64,
}

impl Access {
    /// Accessor name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            Access::U8 => "U8 access",
            Access::I8 => "I8 access",
            Access::U16 => "U16 access",
            Access::I16 => "I16 access",
            Access::U32 => "U32 access",
            Access::I32 => "I32 access",
            Access::I64 => "I64 access",
            Access::F32 => "F32 access",
            Access::F64 => "F64 access",
        }
    }
}

/// Accessor support matrix: exactly the views of the native width exist
pub const fn indirection_supported(width: NativeWidth, format: NumberFormat, access: Access) -> bool {
    use Access as A;
    use NativeWidth as W;
    use NumberFormat as N;
    matches!(
        (width, format, access),
        (W::Bits8, N::Signed | N::Unsigned, A::U8 | A::I8)
            | (W::Bits16, N::Signed | N::Unsigned, A::U16 | A::I16)
            | (W::Bits32, N::Signed | N::Unsigned, A::U32 | A::I32)
            | (W::Bits32, N::Float, A::I32 | A::F32)
            | (W::Bits64, N::Signed | N::Unsigned, A::I64)
            | (W::Bits64, N::Float, A::I64 | A::F64)
    )
}

/// A payload as the conversion rules see it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Any integer payload, widened losslessly
    Integer(i128),
    /// Any float payload, widened losslessly
    Float(f64),
}

mod sealed {
    pub trait Sealed {}
}

/// A primitive payload a [`BoxedValue`](super::BoxedValue) can hold
pub trait Primitive:
    sealed::Sealed + Copy + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static
{
    /// Atomic storage cell for one payload
    type Cell: Send + Sync;

    /// Origin type code
    const TYPE_CODE: TypeCode;
    /// Native width
    const WIDTH: NativeWidth;
    /// Bit interpretation
    const FORMAT: NumberFormat;
    /// The zero payload
    const ZERO: Self;

    /// Create a storage cell
    fn new_cell(value: Self) -> Self::Cell;
    /// Load from a cell
    fn load(cell: &Self::Cell, order: atomic::Ordering) -> Self;
    /// Store into a cell
    fn store(cell: &Self::Cell, value: Self, order: atomic::Ordering);

    /// Raw bits, zero-extended from the native width
    fn to_bits(self) -> u64;
    /// Payload from raw bits; bits above the native width are ignored
    fn from_bits(bits: u64) -> Self;

    /// Origin ordering
    fn compare(self, other: Self) -> Ordering;
    /// Origin hash code
    fn hash_code(self) -> i32;
    /// Widened view for conversions
    fn number(self) -> Number;
    /// Tagged argument for the formatter
    fn number_arg(self) -> NumberArg;
    /// Canonical round-trippable text
    fn canonical_text(self) -> String;

    /// Per-type cache of the inline payload's field offset
    fn offset_cache() -> &'static OnceCell<usize>;

    /// Whether the `access` view exists for this payload
    fn supports(access: Access) -> bool {
        indirection_supported(Self::WIDTH, Self::FORMAT, access)
    }
}

macro_rules! integer_primitive {
    ($t:ty, $bits:ty, $cell:ty, $code:ident, $width:ident, $format:ident, $arg:ident, $hash:expr) => {
        impl sealed::Sealed for $t {}

        impl Primitive for $t {
            type Cell = $cell;

            const TYPE_CODE: TypeCode = TypeCode::$code;
            const WIDTH: NativeWidth = NativeWidth::$width;
            const FORMAT: NumberFormat = NumberFormat::$format;
            const ZERO: Self = 0;

            fn new_cell(value: Self) -> $cell {
                <$cell>::new(value)
            }

            fn load(cell: &$cell, order: atomic::Ordering) -> Self {
                cell.load(order)
            }

            fn store(cell: &$cell, value: Self, order: atomic::Ordering) {
                cell.store(value, order)
            }

            fn to_bits(self) -> u64 {
                self as $bits as u64
            }

            fn from_bits(bits: u64) -> Self {
                bits as $bits as $t
            }

            fn compare(self, other: Self) -> Ordering {
                // Unsigned payloads order by their unsigned value.
                self.cmp(&other)
            }

            fn hash_code(self) -> i32 {
                let hash: fn($t) -> i32 = $hash;
                hash(self)
            }

            fn number(self) -> Number {
                Number::Integer(self as i128)
            }

            fn number_arg(self) -> NumberArg {
                NumberArg::$arg(self)
            }

            fn canonical_text(self) -> String {
                self.to_string()
            }

            fn offset_cache() -> &'static OnceCell<usize> {
                static CACHE: OnceCell<usize> = OnceCell::new();
                &CACHE
            }
        }
    };
}

integer_primitive!(i8, u8, AtomicI8, SByte, Bits8, Signed, I8, |v| v as i32);
integer_primitive!(u8, u8, AtomicU8, Byte, Bits8, Unsigned, U8, |v| v as i32);
integer_primitive!(i16, u16, AtomicI16, Int16, Bits16, Signed, I16, |v| v as i32);
integer_primitive!(u16, u16, AtomicU16, UInt16, Bits16, Unsigned, U16, |v| v as i32);
integer_primitive!(i32, u32, AtomicI32, Int32, Bits32, Signed, I32, |v| v);
integer_primitive!(u32, u32, AtomicU32, UInt32, Bits32, Unsigned, U32, |v| v as i32);
integer_primitive!(i64, u64, AtomicI64, Int64, Bits64, Signed, I64, |v| {
    (v as i32) ^ ((v >> 32) as i32)
});
integer_primitive!(u64, u64, AtomicU64, UInt64, Bits64, Unsigned, U64, |v| {
    (v as i32) ^ ((v >> 32) as i32)
});

/// Hash of a single; every NaN pattern and both zeros collapse first
fn single_hash(value: f32) -> i32 {
    let mut bits = value.to_bits() as i32;
    if (bits.wrapping_sub(1) & 0x7FFF_FFFF) >= 0x7F80_0000 {
        bits &= 0x7F80_0000;
    }
    bits
}

/// Hash of a double; every NaN pattern and both zeros collapse first
fn double_hash(value: f64) -> i32 {
    let mut bits = value.to_bits() as i64;
    if (bits.wrapping_sub(1) & 0x7FFF_FFFF_FFFF_FFFF) >= 0x7FF0_0000_0000_0000 {
        bits &= 0x7FF0_0000_0000_0000;
    }
    (bits as i32) ^ ((bits >> 32) as i32)
}

macro_rules! float_primitive {
    ($t:ty, $bits:ty, $cell:ty, $code:ident, $width:ident, $arg:ident, $hash:ident, $text:ident) => {
        impl sealed::Sealed for $t {}

        impl Primitive for $t {
            type Cell = $cell;

            const TYPE_CODE: TypeCode = TypeCode::$code;
            const WIDTH: NativeWidth = NativeWidth::$width;
            const FORMAT: NumberFormat = NumberFormat::Float;
            const ZERO: Self = 0.0;

            fn new_cell(value: Self) -> $cell {
                <$cell>::new(value.to_bits())
            }

            fn load(cell: &$cell, order: atomic::Ordering) -> Self {
                <$t>::from_bits(cell.load(order))
            }

            fn store(cell: &$cell, value: Self, order: atomic::Ordering) {
                cell.store(value.to_bits(), order)
            }

            fn to_bits(self) -> u64 {
                <$t>::to_bits(self) as u64
            }

            fn from_bits(bits: u64) -> Self {
                <$t>::from_bits(bits as $bits)
            }

            fn compare(self, other: Self) -> Ordering {
                // NaN is neither less nor greater, so it compares equal.
                if self < other {
                    Ordering::Less
                } else if self > other {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            }

            fn hash_code(self) -> i32 {
                $hash(self)
            }

            fn number(self) -> Number {
                Number::Float(self as f64)
            }

            fn number_arg(self) -> NumberArg {
                NumberArg::$arg(self)
            }

            fn canonical_text(self) -> String {
                number_formatter().$text(self)
            }

            fn offset_cache() -> &'static OnceCell<usize> {
                static CACHE: OnceCell<usize> = OnceCell::new();
                &CACHE
            }
        }
    };
}

float_primitive!(f32, u32, AtomicU32, Single, Bits32, F32, single_hash, single_to_string);
float_primitive!(f64, u64, AtomicU64, Double, Bits64, F64, double_hash, double_to_string);
