//! Word-oriented payload transfer
//!
//! Payloads move through the camera's data window as 16-bit big-endian
//! words. The read path hands raw bytes back to the caller unchanged; the
//! write path frames the payload behind the data-register address so it can
//! go out as a single bus write. Capacity is checked here, before anything
//! touches the bus.

use crate::command::{encode_register_select, reg};

/// Bytes per transfer word
pub const WORD_SIZE: usize = 2;

/// Data window capacity in words
pub const DATA_WORDS_MAX: usize = 512;

/// Data window capacity in bytes
pub const DATA_BUFFER_SIZE: usize = DATA_WORDS_MAX * WORD_SIZE;

/// Outbound frame capacity: register select plus a full data window
pub const WRITE_FRAME_SIZE: usize = DATA_BUFFER_SIZE + 2;

/// Local transfer errors, raised before any bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError {
    /// Requested word count does not fit the local data buffers
    CapacityExceeded { words: u16 },
    /// Caller's source slice is shorter than the requested word count
    SourceTooShort { words: u16, len: usize },
}

/// Byte-swap a 16-bit value.
///
/// Involutive; use it to move a word between host order and the bus's
/// big-endian order when interpreting returned register values.
pub fn swap_endian(value: u16) -> u16 {
    ((value & 0x00FF) << 8) | ((value & 0xFF00) >> 8)
}

/// Interpret word `index` of a raw payload as a big-endian value.
///
/// Returns `None` past the end of the slice.
pub fn word_at(bytes: &[u8], index: usize) -> Option<u16> {
    let offset = index.checked_mul(WORD_SIZE)?;
    let hi = *bytes.get(offset)?;
    let lo = *bytes.get(offset + 1)?;
    Some(((hi as u16) << 8) | lo as u16)
}

/// Validate a read request and return its extent in bytes.
pub fn read_extent(words: u16) -> Result<usize, TransferError> {
    let byte_len = words as usize * WORD_SIZE;
    if byte_len > DATA_BUFFER_SIZE {
        return Err(TransferError::CapacityExceeded { words });
    }
    Ok(byte_len)
}

/// Frame a write payload into `frame`: data-register address, then the
/// first `words` words of `data`.
///
/// Returns the number of bytes written to `frame`. `frame` must hold
/// [`WRITE_FRAME_SIZE`] bytes; the engine's outbound buffer always does.
pub fn pack_write(frame: &mut [u8], data: &[u8], words: u16) -> Result<usize, TransferError> {
    let byte_len = words as usize * WORD_SIZE;
    if byte_len > DATA_BUFFER_SIZE {
        return Err(TransferError::CapacityExceeded { words });
    }
    if data.len() < byte_len {
        return Err(TransferError::SourceTooShort {
            words,
            len: data.len(),
        });
    }

    let select = encode_register_select(reg::DATA_0);
    frame[..2].copy_from_slice(&select);
    frame[2..2 + byte_len].copy_from_slice(&data[..byte_len]);

    Ok(byte_len + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_swap_endian_known_value() {
        assert_eq!(swap_endian(0x1234), 0x3412);
        assert_eq!(swap_endian(0x00FF), 0xFF00);
        assert_eq!(swap_endian(0x0000), 0x0000);
    }

    #[test]
    fn test_word_at_reads_big_endian() {
        let bytes = [0x12, 0x34, 0xAB, 0xCD];
        assert_eq!(word_at(&bytes, 0), Some(0x1234));
        assert_eq!(word_at(&bytes, 1), Some(0xABCD));
        assert_eq!(word_at(&bytes, 2), None);
    }

    #[test]
    fn test_word_at_partial_word() {
        // Truncated final word is not a word
        let bytes = [0x12, 0x34, 0xAB];
        assert_eq!(word_at(&bytes, 1), None);
    }

    #[test]
    fn test_read_extent() {
        assert_eq!(read_extent(1), Ok(2));
        assert_eq!(read_extent(DATA_WORDS_MAX as u16), Ok(DATA_BUFFER_SIZE));
        assert_eq!(
            read_extent(DATA_WORDS_MAX as u16 + 1),
            Err(TransferError::CapacityExceeded { words: 513 })
        );
    }

    #[test]
    fn test_pack_write_frames_payload() {
        let mut frame = [0u8; WRITE_FRAME_SIZE];
        let len = pack_write(&mut frame, &[0x00, 0x00, 0x00, 0x01], 2).unwrap();

        assert_eq!(len, 6);
        assert_eq!(&frame[..6], &[0x00, 0x08, 0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_pack_write_ignores_excess_source() {
        let mut frame = [0u8; WRITE_FRAME_SIZE];
        let len = pack_write(&mut frame, &[0xAA, 0xBB, 0xCC, 0xDD], 1).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&frame[..4], &[0x00, 0x08, 0xAA, 0xBB]);
    }

    #[test]
    fn test_pack_write_capacity_exceeded() {
        let mut frame = [0u8; WRITE_FRAME_SIZE];
        let data = [0u8; DATA_BUFFER_SIZE];
        let result = pack_write(&mut frame, &data, DATA_WORDS_MAX as u16 + 1);
        assert_eq!(
            result,
            Err(TransferError::CapacityExceeded { words: 513 })
        );
    }

    #[test]
    fn test_pack_write_source_too_short() {
        let mut frame = [0u8; WRITE_FRAME_SIZE];
        let result = pack_write(&mut frame, &[0x00, 0x01], 2);
        assert_eq!(
            result,
            Err(TransferError::SourceTooShort { words: 2, len: 2 })
        );
    }

    proptest! {
        #[test]
        fn swap_endian_is_involutive(value in any::<u16>()) {
            prop_assert_eq!(swap_endian(swap_endian(value)), value);
        }

        #[test]
        fn swap_endian_exchanges_bytes(value in any::<u16>()) {
            let expected = ((value & 0x00FF) << 8) | ((value >> 8) & 0x00FF);
            prop_assert_eq!(swap_endian(value), expected);
        }

        #[test]
        fn word_at_agrees_with_swap_endian(hi in any::<u8>(), lo in any::<u8>()) {
            // A word read back from wire order is the byte-swap of the
            // little-endian interpretation of the same pair.
            let bytes = [hi, lo];
            let wire = word_at(&bytes, 0).unwrap();
            let host_le = u16::from_le_bytes(bytes);
            prop_assert_eq!(wire, swap_endian(host_le));
        }
    }
}
