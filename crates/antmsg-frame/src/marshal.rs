//! Pure payload packing and unpacking against a [`FieldLayout`].

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{FrameError, Result};
use crate::layout::{ByteOrder, FieldLayout, Slot};

/// Pack `values` into `dst` according to `layout`.
///
/// Data slots consume the next value in order; padding slots emit zero bytes.
/// Exactly `layout.byte_width()` bytes are appended on success. Nothing is
/// appended on failure.
pub fn pack(layout: &FieldLayout, values: &[u32], dst: &mut BytesMut) -> Result<()> {
    let expected = layout.arg_count();
    if values.len() != expected {
        return Err(FrameError::ArgumentCountMismatch {
            expected,
            actual: values.len(),
        });
    }

    for (index, (width, value)) in data_widths(layout).zip(values.iter().copied()).enumerate() {
        if !fits(value, width) {
            return Err(FrameError::ValueOutOfRange {
                index,
                value,
                width,
            });
        }
    }

    dst.reserve(layout.byte_width());
    let mut values = values.iter().copied();
    for slot in layout.slots() {
        match *slot {
            Slot::Pad(width) => dst.put_bytes(0, width),
            Slot::Data(width) => {
                // Count was checked above.
                let value = values.next().unwrap_or_default();
                put_value(dst, value, width, layout.byte_order());
            }
        }
    }
    Ok(())
}

/// Unpack `payload` into one value per data slot, skipping padding.
pub fn unpack(layout: &FieldLayout, payload: &[u8]) -> Result<Vec<u32>> {
    let expected = layout.byte_width();
    if payload.len() != expected {
        return Err(FrameError::PayloadLengthMismatch {
            expected,
            actual: payload.len(),
        });
    }

    let mut src = payload;
    let mut values = Vec::with_capacity(layout.arg_count());
    for slot in layout.slots() {
        match *slot {
            Slot::Pad(width) => src.advance(width),
            Slot::Data(width) => values.push(get_value(&mut src, width, layout.byte_order())),
        }
    }
    Ok(values)
}

fn data_widths(layout: &FieldLayout) -> impl Iterator<Item = usize> + '_ {
    layout.slots().iter().filter_map(|slot| match *slot {
        Slot::Data(width) => Some(width),
        Slot::Pad(_) => None,
    })
}

fn fits(value: u32, width: usize) -> bool {
    match width {
        1 => value <= u32::from(u8::MAX),
        2 => value <= u32::from(u16::MAX),
        _ => true,
    }
}

fn put_value(dst: &mut BytesMut, value: u32, width: usize, order: ByteOrder) {
    match (width, order) {
        (1, _) => dst.put_u8(value as u8),
        (2, ByteOrder::Little) => dst.put_u16_le(value as u16),
        (2, ByteOrder::Big) => dst.put_u16(value as u16),
        (_, ByteOrder::Little) => dst.put_u32_le(value),
        (_, ByteOrder::Big) => dst.put_u32(value),
    }
}

fn get_value(src: &mut &[u8], width: usize, order: ByteOrder) -> u32 {
    match (width, order) {
        (1, _) => u32::from(src.get_u8()),
        (2, ByteOrder::Little) => u32::from(src.get_u16_le()),
        (2, ByteOrder::Big) => u32::from(src.get_u16()),
        (_, ByteOrder::Little) => src.get_u32_le(),
        (_, ByteOrder::Big) => src.get_u32(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(spec: &str) -> FieldLayout {
        FieldLayout::parse(spec).unwrap()
    }

    #[test]
    fn pack_single_byte_fields_in_order() {
        let mut buf = BytesMut::new();
        pack(&layout("BBB"), &[3, 0x40, 8], &mut buf).unwrap();
        assert_eq!(buf.as_ref(), &[0x03, 0x40, 0x08]);
    }

    #[test]
    fn pack_emits_zero_padding() {
        let mut buf = BytesMut::new();
        pack(&layout("x"), &[], &mut buf).unwrap();
        assert_eq!(buf.as_ref(), &[0x00]);

        let mut buf = BytesMut::new();
        pack(&layout("B2xB"), &[0xAA, 0xBB], &mut buf).unwrap();
        assert_eq!(buf.as_ref(), &[0xAA, 0x00, 0x00, 0xBB]);
    }

    #[test]
    fn pack_wide_fields_honor_byte_order() {
        let mut buf = BytesMut::new();
        pack(&layout("BHI"), &[1, 0x1234, 0xA1B2_C3D4], &mut buf).unwrap();
        assert_eq!(
            buf.as_ref(),
            &[0x01, 0x34, 0x12, 0xD4, 0xC3, 0xB2, 0xA1]
        );

        let mut buf = BytesMut::new();
        pack(&layout(">H"), &[0x1234], &mut buf).unwrap();
        assert_eq!(buf.as_ref(), &[0x12, 0x34]);
    }

    #[test]
    fn pack_rejects_wrong_argument_count() {
        let mut buf = BytesMut::new();
        let err = pack(&layout("B"), &[], &mut buf).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ArgumentCountMismatch {
                expected: 1,
                actual: 0
            }
        ));

        let err = pack(&layout("B"), &[1, 2], &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::ArgumentCountMismatch { .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn pack_rejects_values_wider_than_slot() {
        let mut buf = BytesMut::new();
        let err = pack(&layout("BB"), &[1, 256], &mut buf).unwrap_err();
        assert!(matches!(
            err,
            FrameError::ValueOutOfRange {
                index: 1,
                value: 256,
                width: 1
            }
        ));
        assert!(buf.is_empty());

        assert!(pack(&layout("H"), &[0x1_0000], &mut buf).is_err());
        assert!(pack(&layout("I"), &[u32::MAX], &mut buf).is_ok());
    }

    #[test]
    fn unpack_skips_padding() {
        let values = unpack(&layout("BxB"), &[0x01, 0xFF, 0x02]).unwrap();
        assert_eq!(values, vec![0x01, 0x02]);

        let values = unpack(&layout("x"), &[0x00]).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn unpack_wide_fields() {
        let values = unpack(&layout("<HI"), &[0x34, 0x12, 0xD4, 0xC3, 0xB2, 0xA1]).unwrap();
        assert_eq!(values, vec![0x1234, 0xA1B2_C3D4]);

        let values = unpack(&layout(">H"), &[0x12, 0x34]).unwrap();
        assert_eq!(values, vec![0x1234]);
    }

    #[test]
    fn unpack_rejects_payload_length_mismatch() {
        let err = unpack(&layout("BBB"), &[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::PayloadLengthMismatch {
                expected: 3,
                actual: 2
            }
        ));

        // Padding bytes must still be present.
        assert!(unpack(&layout("Bx"), &[1]).is_err());
        assert!(unpack(&layout("B"), &[1, 2]).is_err());
    }
}
