//! Tests for grid descriptors

extern crate std;

use super::test_utils::SMALL_DESCRIPTOR;
use crate::coordinate::Orientation;
use crate::io::{DataType, GridDescriptor, RowOrder};
use crate::raster::{Encoding, GridError};

const NDVI: &str = r#"
variable = "NDVI"
rows = 9072
cols = 6720
data_type = "u8"
row_order = "north_up"
extent = [-93.0, -56.0, -33.0, 25.0]

[attributes]
_FillValue = 255
valid_min = 0
valid_max = 250
scale_factor = 0.004
add_offset = -0.08
"#;

#[test]
fn test_ndvi_descriptor_geometry() {
    let d = GridDescriptor::from_str(NDVI).unwrap();
    std::assert_eq!(d.data_type, DataType::U8);
    std::assert_eq!(d.payload_len(), 9072 * 6720);

    let lat = d.lat_axis().unwrap();
    let lon = d.lon_axis().unwrap();
    std::assert_eq!(lat.len(), 9072);
    std::assert_eq!(lon.len(), 6720);
    std::assert_eq!(lat.orientation(), Orientation::Descending);

    let step = 1.0 / 112.0;
    std::assert!((lat.values()[0] - (25.0 - step / 2.0)).abs() < 1e-9);
    std::assert!((lon.values()[0] - (-93.0 + step / 2.0)).abs() < 1e-9);
    std::assert!((lon.values()[6719] - (-33.0 - step / 2.0)).abs() < 1e-9);
}

#[test]
fn test_ndvi_encoding_from_attributes() {
    let d = GridDescriptor::from_str(NDVI).unwrap();
    let encoding = Encoding::from_attributes(&d.attributes).unwrap();
    std::assert_eq!(encoding.fill_value, Some(255.0));
    std::assert_eq!(encoding.valid_range, Some((0.0, 250.0)));
    std::assert_eq!(encoding.scale, 0.004);
}

#[test]
fn test_south_up_rows_ascend() {
    let content = SMALL_DESCRIPTOR.replace("north_up", "south_up");
    let d = GridDescriptor::from_str(&content).unwrap();
    std::assert_eq!(d.row_order, RowOrder::SouthUp);
    std::assert_eq!(d.lat_axis().unwrap().values(), &[0.5, 1.5]);
}

#[test]
fn test_flags_and_time() {
    let d = GridDescriptor::from_str(SMALL_DESCRIPTOR).unwrap();
    let flags = d.flags.clone().unwrap();
    std::assert_eq!(flags.variable, "cloud");
    std::assert_eq!(flags.flag_path("/data/LST_2023.bin"), "/data/FLG_2023.bin");
    std::assert_eq!(d.reference_time.as_deref(), Some("2023-06-01T12:00:00Z"));
}

#[test]
fn test_invalid_descriptors() {
    let missing_rows = NDVI.replace("rows = 9072", "");
    std::assert!(std::matches!(GridDescriptor::from_str(&missing_rows), Err(GridError::ConfigError(_))));

    let bad_extent = NDVI.replace("[-93.0, -56.0, -33.0, 25.0]", "[-93.0, -56.0]");
    std::assert!(GridDescriptor::from_str(&bad_extent).is_err());

    let flipped = NDVI.replace("[-93.0, -56.0, -33.0, 25.0]", "[-33.0, -56.0, -93.0, 25.0]");
    std::assert!(std::matches!(GridDescriptor::from_str(&flipped), Err(GridError::InvalidBoundingBox(_))));

    let bad_type = NDVI.replace("\"u8\"", "\"u12\"");
    std::assert!(GridDescriptor::from_str(&bad_type).is_err());
}

#[test]
fn test_oversized_grid_rejected() {
    let huge = NDVI
        .replace("rows = 9072", "rows = 4294967296")
        .replace("cols = 6720", "cols = 4294967296")
        .replace("\"u8\"", "\"f64\"");
    std::assert!(std::matches!(GridDescriptor::from_str(&huge), Err(GridError::ConfigError(_))));

    // Fits as a sample count but not once multiplied by bands and sample size
    let many_bands = std::format!("bands = {}\n{}", usize::MAX / 4, NDVI);
    std::assert!(std::matches!(GridDescriptor::from_str(&many_bands), Err(GridError::ConfigError(_))));
}

#[test]
fn test_f32_fill_rounded_to_storage() {
    let content = NDVI.replace("\"u8\"", "\"f32\"").replace("_FillValue = 255", "_FillValue = -999.9");
    let d = GridDescriptor::from_str(&content).unwrap();
    std::assert_eq!(d.attributes.number("_FillValue"), Some(-999.9f32 as f64));
    std::assert_eq!(d.attributes.number("valid_max"), Some(250.0));

    // A physical fill is compared after scaling and keeps its decimal value
    let physical = content.replace("[attributes]", "[attributes]\nfill_kind = \"physical\"");
    let d = GridDescriptor::from_str(&physical).unwrap();
    std::assert_eq!(d.attributes.number("_FillValue"), Some(-999.9));
}
