//! Tests for sample decoding

extern crate std;

use super::test_utils::{i16_be, u16_le};
use crate::io::{decode_flags, decode_samples, sample_count, ByteOrder, DataType};
use crate::raster::{FlagGrid, GridError};

#[test]
fn test_decode_u16_little_endian() {
    let samples = decode_samples(&u16_le(&[1, 258, 65535]), DataType::U16, ByteOrder::LittleEndian).unwrap();
    std::assert_eq!(samples, std::vec![1.0, 258.0, 65535.0]);
}

#[test]
fn test_decode_i16_big_endian() {
    let samples = decode_samples(&i16_be(&[-8000, 0, 1234]), DataType::I16, ByteOrder::BigEndian).unwrap();
    std::assert_eq!(samples, std::vec![-8000.0, 0.0, 1234.0]);
}

#[test]
fn test_decode_u8_and_f32() {
    std::assert_eq!(
        decode_samples(&[0, 250, 255], DataType::U8, ByteOrder::BigEndian).unwrap(),
        std::vec![0.0, 250.0, 255.0]
    );

    let bytes = 1.5f32.to_le_bytes();
    std::assert_eq!(decode_samples(&bytes, DataType::F32, ByteOrder::LittleEndian).unwrap(), std::vec![1.5]);
}

#[test]
fn test_partial_sample_rejected() {
    std::assert!(decode_samples(&[1, 2, 3], DataType::U16, ByteOrder::LittleEndian).is_err());
}

#[test]
fn test_decode_flags() {
    let flags = decode_flags(&[0, 2, 3, 1], DataType::U8, ByteOrder::LittleEndian, 2, 2).unwrap();
    std::assert_eq!(flags.shape(), (2, 2));
    std::assert_eq!(flags.extract_bit(1).unwrap().data(), &[0, 1, 1, 0]);

    let wide = decode_flags(&u16_le(&[1 << 9, 0]), DataType::U16, ByteOrder::LittleEndian, 1, 2).unwrap();
    std::assert!(std::matches!(wide, FlagGrid::U16(_)));
    std::assert_eq!(wide.extract_bit(9).unwrap().data(), &[1, 0]);

    std::assert!(decode_flags(&[0; 8], DataType::F32, ByteOrder::LittleEndian, 1, 2).is_err());
    std::assert!(decode_flags(&[0; 3], DataType::U8, ByteOrder::LittleEndian, 2, 2).is_err());
}

#[test]
fn test_type_names() {
    std::assert_eq!(DataType::from_name("uint16").unwrap(), DataType::U16);
    std::assert_eq!(DataType::from_name("F64").unwrap().size(), 8);
    std::assert!(DataType::from_name("complex64").is_err());
    std::assert_eq!(ByteOrder::from_name("BE").unwrap(), ByteOrder::BigEndian);
}

#[test]
fn test_storage_value_rounds_only_f32() {
    std::assert_eq!(DataType::F32.storage_value(-999.9), -999.9000244140625);
    std::assert_eq!(DataType::F64.storage_value(-999.9), -999.9);
    std::assert_eq!(DataType::I16.storage_value(-8000.0), -8000.0);
}

#[test]
fn test_oversized_counts_rejected() {
    std::assert_eq!(sample_count(3, 4).unwrap(), 12);
    std::assert!(std::matches!(sample_count(1 << 32, 1 << 32), Err(GridError::ConfigError(_))));
    std::assert_eq!(DataType::F64.payload_len(usize::MAX / 4), None);

    let huge = usize::MAX / 2;
    std::assert!(std::matches!(
        decode_flags(&[0; 4], DataType::U32, ByteOrder::LittleEndian, huge, 1),
        Err(GridError::ConfigError(_))
    ));
    std::assert!(std::matches!(
        decode_flags(&[0; 4], DataType::U8, ByteOrder::LittleEndian, 1 << 32, 1 << 32),
        Err(GridError::ConfigError(_))
    ));
}
