//! Tests for fill masking and scale/offset decoding

extern crate std;

use crate::raster::{
    apply_fill_mask, apply_scale_offset, decode, Attributes, Encoding, FillKind, Grid, GridError,
};

#[test]
fn test_fill_mask_replaces_exact_matches() {
    let raw = Grid::new(1, 4, vec![-8000i16, 12, -8000, 7]).unwrap();
    let masked = apply_fill_mask(&raw, -8000.0);

    std::assert!(masked.data()[0].is_nan());
    std::assert_eq!(masked.data()[1], 12.0);
    std::assert!(masked.data()[2].is_nan());
    std::assert_eq!(masked.data()[3], 7.0);
}

#[test]
fn test_fill_mask_is_idempotent() {
    let raw = Grid::new(2, 2, vec![255.0, 1.0, f64::NAN, 255.0]).unwrap();
    let once = apply_fill_mask(&raw, 255.0);
    let twice = apply_fill_mask(&once, 255.0);

    for (a, b) in once.data().iter().zip(twice.data()) {
        std::assert!((a.is_nan() && b.is_nan()) || a == b);
    }
}

#[test]
fn test_scale_offset_keeps_nan() {
    let raw = Grid::new(1, 3, vec![0.0, 100.0, f64::NAN]).unwrap();
    let physical = apply_scale_offset(&raw, 0.004, -0.08);

    std::assert!((physical.data()[0] + 0.08).abs() < 1e-12);
    std::assert!((physical.data()[1] - 0.32).abs() < 1e-12);
    std::assert!(physical.data()[2].is_nan());
}

#[test]
fn test_decode_raw_fill_before_scaling() {
    let raw = Grid::new(1, 3, vec![255u8, 100, 251]).unwrap();
    let encoding = Encoding {
        fill_value: Some(255.0),
        fill_kind: FillKind::Raw,
        scale: 0.004,
        offset: -0.08,
        valid_range: Some((0.0, 250.0)),
    };
    let physical = decode(&raw, &encoding);

    std::assert!(physical.data()[0].is_nan());
    std::assert!((physical.data()[1] - 0.32).abs() < 1e-12);
    // outside the valid range
    std::assert!(physical.data()[2].is_nan());
}

#[test]
fn test_decode_matches_f32_fill_given_in_decimal() {
    let raw = Grid::new(2, 2, vec![-999.9f32, 300.0, 301.0, 302.0]).unwrap();
    let encoding = Encoding { fill_value: Some(-999.9), ..Encoding::default() };
    let physical = decode(&raw, &encoding);

    std::assert!(physical.data()[0].is_nan());
    std::assert_eq!(physical.data()[1], 300.0);
    std::assert_eq!(physical.valid_count(), 3);
}

#[test]
fn test_decode_physical_fill_after_scaling() {
    // raw 0 scales to the physical sentinel -1.0
    let raw = Grid::new(1, 2, vec![0u8, 10]).unwrap();
    let encoding = Encoding {
        fill_value: Some(-1.0),
        fill_kind: FillKind::Physical,
        scale: 0.5,
        offset: -1.0,
        valid_range: None,
    };
    let physical = decode(&raw, &encoding);

    std::assert!(physical.data()[0].is_nan());
    std::assert_eq!(physical.data()[1], 4.0);
}

#[test]
fn test_encoding_from_cf_attributes() {
    let attrs = Attributes::new()
        .with_number("_FillValue", -8000.0)
        .with_number("scale_factor", 0.01)
        .with_number("add_offset", 0.0);
    let encoding = Encoding::from_attributes(&attrs).unwrap();

    std::assert_eq!(encoding.fill_value, Some(-8000.0));
    std::assert_eq!(encoding.scale, 0.01);
    std::assert_eq!(encoding.fill_kind, FillKind::Raw);
}

#[test]
fn test_encoding_from_lsasaf_attributes() {
    let attrs = Attributes::new()
        .with_number("MISSING_VALUE", -1.0)
        .with_number("SCALING_FACTOR", 10.0);
    let encoding = Encoding::from_attributes(&attrs).unwrap();

    std::assert_eq!(encoding.fill_value, Some(-1.0));
    std::assert!((encoding.scale - 0.1).abs() < 1e-15);
}

#[test]
fn test_missing_fill_fails_loudly() {
    let encoding = Encoding::from_attributes(&Attributes::new()).unwrap();
    let result = encoding.require_fill("LST_MAX");

    match result {
        Err(GridError::InvalidFillValue(name)) => std::assert_eq!(name, "LST_MAX"),
        other => std::panic!("expected InvalidFillValue, got {:?}", other),
    }
}
