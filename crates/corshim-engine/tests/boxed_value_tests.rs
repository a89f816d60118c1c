use std::cmp::Ordering;
use std::sync::Arc;
use std::thread;

use corshim_engine::boxed::{BoxedByte, BoxedDouble, BoxedSingle};
use corshim_engine::{
    BoxedValue, Convertible, HostArray, Indirection, Primitive, ShimError, TypeCode, ValueObject,
};

fn assert_aliasing<T: Primitive>(values: &[T], replacement: T) {
    let array = HostArray::from_slice(values);
    for i in 0..values.len() {
        let b = BoxedValue::in_array(&array, i).unwrap();
        b.set(replacement);
        assert_eq!(b.get(), replacement);
        assert_eq!(array.get(i), Some(replacement));

        array.set(i, values[i]).unwrap();
        assert_eq!(b.get(), values[i]);
    }
}

// ============================================================================
// Array Aliasing
// ============================================================================

mod aliasing {
    use super::*;

    #[test]
    fn test_set_through_box_visible_in_array_all_widths() {
        assert_aliasing(&[1i8, -2, 3], 100);
        assert_aliasing(&[1u8, 2, 255], 7);
        assert_aliasing(&[-300i16, 300], 12);
        assert_aliasing(&[60000u16, 1], 5);
        assert_aliasing(&[i32::MIN, 0, i32::MAX], 42);
        assert_aliasing(&[u32::MAX, 9], 8);
        assert_aliasing(&[i64::MIN, -1], 1 << 40);
        assert_aliasing(&[u64::MAX], 3);
        assert_aliasing(&[1.5f32, -0.25], 9.75);
        assert_aliasing(&[f64::MAX, f64::MIN_POSITIVE], -1e300);
    }

    #[test]
    fn test_out_of_range_index_builds_no_box() {
        let array = HostArray::from_slice(&[1i32, 2, 3]);
        for index in [3usize, 4, usize::MAX] {
            let err = BoxedValue::in_array(&array, index).unwrap_err();
            assert_eq!(err, ShimError::IndexOutOfRange { index, len: 3 });
        }
    }

    #[test]
    fn test_two_views_of_same_slot() {
        let array = HostArray::from_slice(&[0u32; 4]);
        let a = BoxedValue::in_array(&array, 2).unwrap();
        let b = BoxedValue::in_array(&array, 2).unwrap();
        a.set(11);
        assert_eq!(b.get(), 11);
        assert_eq!(array.to_vec(), vec![0, 0, 11, 0]);
    }

    #[test]
    fn test_array_clone_shares_storage() {
        let array = HostArray::<i16>::new(2);
        let other = array.clone();
        assert!(array.ptr_eq(&other));
        let b = BoxedValue::in_array(&other, 0).unwrap();
        b.set(-5);
        assert_eq!(array.get(0), Some(-5));
    }
}

// ============================================================================
// Clone Never Aliases
// ============================================================================

mod cloning {
    use super::*;

    #[test]
    fn test_clone_of_view_is_detached() {
        let array = HostArray::from_slice(&[1.0f64, 2.0]);
        let view = BoxedValue::in_array(&array, 1).unwrap();
        let copy = view.clone();
        assert!(!copy.is_array_view());

        copy.set(99.0);
        assert_eq!(array.get(1), Some(2.0));

        view.set(3.0);
        assert_eq!(copy.get(), 99.0);
    }

    #[test]
    fn test_clone_value_of_view_is_detached() {
        let array = HostArray::from_slice(&[10u8]);
        let view: Box<dyn ValueObject> = Box::new(BoxedValue::in_array(&array, 0).unwrap());
        let copy = view.clone_value();
        copy.clear();
        assert_eq!(array.get(0), Some(10));
        view.clear();
        assert_eq!(copy.to_byte().unwrap(), 0);
        assert_eq!(array.get(0), Some(0));
    }
}

// ============================================================================
// Ordering, Equality, Hashing
// ============================================================================

mod semantics {
    use super::*;

    #[test]
    fn test_unsigned_byte_orders_as_unsigned() {
        let high = BoxedByte::new(0xFF);
        assert_eq!(high.compare_to(0x01), Ordering::Greater);
        let low: Box<dyn ValueObject> = Box::new(BoxedByte::new(0x01));
        assert_eq!(
            high.compare_to_object(Some(low.as_ref())).unwrap(),
            Ordering::Greater
        );
    }

    #[test]
    fn test_byte_written_through_sbyte_view_orders_unsigned() {
        let b = BoxedByte::new(0);
        b.set_i8(-1).unwrap();
        assert_eq!(b.get(), 0xFF);
        assert_eq!(b.compare_to(1), Ordering::Greater);
    }

    #[test]
    fn test_nan_patterns_share_hash_but_never_equal() {
        let canonical = BoxedSingle::new(f32::from_bits(0x7FC0_0000));
        for bits in [0x7F80_0001u32, 0x7FC0_0001, 0x7FFF_FFFF, 0xFFC0_0000] {
            let other = BoxedSingle::new(f32::from_bits(bits));
            assert!(other.is_nan());
            assert_eq!(other.hash_code(), canonical.hash_code());
            assert!(!other.equals(&canonical));
            assert!(!canonical.equals(&other));
        }
        assert!(!canonical.equals(&canonical));

        let d1 = BoxedDouble::new(f64::NAN);
        let d2 = BoxedDouble::new(f64::from_bits(0x7FF0_0000_0000_0001));
        assert_eq!(d1.hash_code(), d2.hash_code());
        assert!(!d1.equals(&d2));
        assert_ne!(d1, d2);
    }

    #[test]
    fn test_equals_object_across_types_is_false() {
        let a: Box<dyn ValueObject> = Box::new(BoxedValue::new(1i16));
        let b: Box<dyn ValueObject> = Box::new(BoxedValue::new(1u16));
        assert!(!a.equals_object(b.as_ref()));
        assert!(matches!(
            a.compare_to_object(Some(b.as_ref())),
            Err(ShimError::Argument(_))
        ));
        assert_eq!(a.compare_to_object(None).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_hash_set_membership() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(BoxedValue::new(5i64));
        assert!(set.contains(&BoxedValue::new(5i64)));
        assert!(!set.contains(&BoxedValue::new(6i64)));
    }
}

// ============================================================================
// Volatile Access
// ============================================================================

mod volatile {
    use super::*;

    #[test]
    fn test_read_after_write_inline() {
        let b = BoxedValue::new(0i32);
        for v in [1, -1, i32::MAX, i32::MIN] {
            b.volatile_set(v).unwrap();
            assert_eq!(b.volatile_get().unwrap(), v);
        }
        let d = BoxedDouble::new(0.0);
        d.volatile_set(f64::NEG_INFINITY).unwrap();
        assert_eq!(d.volatile_get().unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_read_after_write_array_view() {
        let array = HostArray::from_slice(&[0u64, 0, 0]);
        let b = BoxedValue::in_array(&array, 1).unwrap();
        b.volatile_set(u64::MAX - 1).unwrap();
        assert_eq!(b.volatile_get().unwrap(), u64::MAX - 1);
        assert_eq!(array.to_vec(), vec![0, u64::MAX - 1, 0]);
    }

    #[test]
    fn test_sub_word_widths_rejected() {
        assert!(matches!(
            BoxedValue::new(1u8).volatile_get(),
            Err(ShimError::NotSupported(_))
        ));
        assert!(matches!(
            BoxedValue::new(1i16).volatile_set(2),
            Err(ShimError::NotSupported(_))
        ));
    }

    #[test]
    fn test_release_store_visible_to_other_thread() {
        let b = Arc::new(BoxedValue::new(0i64));
        let writer = {
            let b = Arc::clone(&b);
            thread::spawn(move || {
                for v in 1..=1000i64 {
                    b.volatile_set(v).unwrap();
                }
            })
        };
        let mut last = 0;
        while last < 1000 {
            let seen = b.volatile_get().unwrap();
            assert!(seen >= last, "value went backwards: {} after {}", seen, last);
            last = seen;
            thread::yield_now();
        }
        writer.join().unwrap();
        assert_eq!(b.get(), 1000);
    }
}

// ============================================================================
// Formatting and Conversion
// ============================================================================

mod text {
    use super::*;

    #[test]
    fn test_canonical_text() {
        assert_eq!(BoxedValue::new(-128i8).to_string(), "-128");
        assert_eq!(BoxedValue::new(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(BoxedDouble::new(0.1).to_string(), "0.1");
        assert_eq!(BoxedSingle::new(0.1).to_string(), "0.1");
        assert_eq!(BoxedDouble::new(f64::NAN).to_string(), "NaN");
        assert_eq!(BoxedSingle::new(f32::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_empty_format_is_canonical() {
        let b = BoxedValue::new(1234i32);
        assert_eq!(b.format(None, None).unwrap(), "1234");
        assert_eq!(b.format(Some(""), None).unwrap(), "1234");
        assert_eq!(b.format_with(None), "1234");
    }

    #[test]
    fn test_standard_formats() {
        let b = BoxedValue::new(255u8);
        assert_eq!(b.format(Some("X2"), None).unwrap(), "FF");
        assert_eq!(b.format(Some("D5"), None).unwrap(), "00255");
        assert!(matches!(
            BoxedDouble::new(1.0).format(Some("0.00"), None),
            Err(ShimError::Format(_))
        ));
    }

    #[test]
    fn test_to_type_string_matches_display() {
        let b = BoxedDouble::new(-2.5);
        assert_eq!(
            b.to_type(TypeCode::String).unwrap(),
            corshim_engine::boxed::ConvertedValue::String(b.to_string())
        );
    }
}
