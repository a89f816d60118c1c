//! Narrow-width views over a box's raw bits
//!
//! Serialization and marshalling helpers read and write boxes through these
//! without knowing the payload type. A view exists only at the box's native
//! width; floats additionally expose their IEEE bits as a same-width integer.

use corshim_sdk::ShimResult;

use super::primitive::{Access, Primitive};
use super::value::BoxedValue;

/// Width-specific accessors on a box's bits
pub trait Indirection {
    /// Low byte, unsigned
    fn get_u8(&self) -> ShimResult<u8>;
    /// Low byte, signed
    fn get_i8(&self) -> ShimResult<i8>;
    /// Replace the low byte
    fn set_i8(&self, value: i8) -> ShimResult<()>;
    /// 16 bits, unsigned
    fn get_u16(&self) -> ShimResult<u16>;
    /// 16 bits, signed
    fn get_i16(&self) -> ShimResult<i16>;
    /// Replace all 16 bits
    fn set_i16(&self, value: i16) -> ShimResult<()>;
    /// 32 bits, unsigned
    fn get_u32(&self) -> ShimResult<u32>;
    /// 32 bits, signed; raw IEEE bits for a single
    fn get_i32(&self) -> ShimResult<i32>;
    /// Replace all 32 bits
    fn set_i32(&self, value: i32) -> ShimResult<()>;
    /// 64 bits; raw IEEE bits for a double
    fn get_i64(&self) -> ShimResult<i64>;
    /// Replace all 64 bits
    fn set_i64(&self, value: i64) -> ShimResult<()>;
    /// Single payload
    fn get_f32(&self) -> ShimResult<f32>;
    /// Replace a single payload
    fn set_f32(&self, value: f32) -> ShimResult<()>;
    /// Double payload
    fn get_f64(&self) -> ShimResult<f64>;
    /// Replace a double payload
    fn set_f64(&self, value: f64) -> ShimResult<()>;
}

impl<T: Primitive> BoxedValue<T> {
    fn view(&self, access: Access) -> ShimResult<u64> {
        self.require(access)?;
        Ok(self.get().to_bits())
    }

    fn replace(&self, access: Access, bits: u64) -> ShimResult<()> {
        self.require(access)?;
        self.set(T::from_bits(bits));
        Ok(())
    }
}

impl<T: Primitive> Indirection for BoxedValue<T> {
    fn get_u8(&self) -> ShimResult<u8> {
        Ok(self.view(Access::U8)? as u8)
    }

    fn get_i8(&self) -> ShimResult<i8> {
        Ok(self.view(Access::I8)? as i8)
    }

    fn set_i8(&self, value: i8) -> ShimResult<()> {
        let bits = self.view(Access::I8)?;
        self.replace(Access::I8, (bits & !0xFF) | value as u8 as u64)
    }

    fn get_u16(&self) -> ShimResult<u16> {
        Ok(self.view(Access::U16)? as u16)
    }

    fn get_i16(&self) -> ShimResult<i16> {
        Ok(self.view(Access::I16)? as i16)
    }

    fn set_i16(&self, value: i16) -> ShimResult<()> {
        self.replace(Access::I16, value as u16 as u64)
    }

    fn get_u32(&self) -> ShimResult<u32> {
        Ok(self.view(Access::U32)? as u32)
    }

    fn get_i32(&self) -> ShimResult<i32> {
        Ok(self.view(Access::I32)? as i32)
    }

    fn set_i32(&self, value: i32) -> ShimResult<()> {
        self.replace(Access::I32, value as u32 as u64)
    }

    fn get_i64(&self) -> ShimResult<i64> {
        Ok(self.view(Access::I64)? as i64)
    }

    fn set_i64(&self, value: i64) -> ShimResult<()> {
        self.replace(Access::I64, value as u64)
    }

    fn get_f32(&self) -> ShimResult<f32> {
        Ok(f32::from_bits(self.view(Access::F32)? as u32))
    }

    fn set_f32(&self, value: f32) -> ShimResult<()> {
        self.replace(Access::F32, value.to_bits() as u64)
    }

    fn get_f64(&self) -> ShimResult<f64> {
        Ok(f64::from_bits(self.view(Access::F64)?))
    }

    fn set_f64(&self, value: f64) -> ShimResult<()> {
        self.replace(Access::F64, value.to_bits())
    }
}
