//! Tests for the NetCDF reader

extern crate std;

use std::fs;
use std::path::Path;

use super::test_utils::{gzip, scratch_dir};
use crate::coordinate::{BoundingBox, Orientation};
use crate::extractor::slice_bbox;
use crate::io::{NetcdfSource, RasterSource, SourceFactory};
use crate::raster::{decode, AttrValue, Encoding, GridError};

/// Two time steps of a 2x3 f32 LST grid with a u8 quality variable
fn write_product(path: &Path) {
    let mut file = netcdf::create(path).unwrap();
    file.add_attribute("reference_time", "2023-06-01T12:00:00Z").unwrap();
    file.add_dimension("time", 2).unwrap();
    file.add_dimension("lat", 2).unwrap();
    file.add_dimension("lon", 3).unwrap();

    {
        let mut lat = file.add_variable::<f64>("lat", &["lat"]).unwrap();
        lat.put_attribute("units", "degrees_north").unwrap();
        lat.put_values(&std::vec![1.5f64, 0.5], ..).unwrap();
    }
    {
        let mut lon = file.add_variable::<f64>("lon", &["lon"]).unwrap();
        lon.put_attribute("units", "degrees_east").unwrap();
        lon.put_values(&std::vec![0.5f64, 1.5, 2.5], ..).unwrap();
    }
    {
        let mut lst = file.add_variable::<f32>("LST", &["time", "lat", "lon"]).unwrap();
        lst.put_attribute("_FillValue", -999.9f32).unwrap();
        lst.put_attribute("units", "K").unwrap();
        let values: std::vec::Vec<f32> = std::vec![
            -999.9, 300.0, 301.0, 302.0, 303.0, 304.0,
            310.0, 311.0, 312.0, 313.0, 314.0, -999.9,
        ];
        lst.put_values(&values, ..).unwrap();
    }
    {
        let mut quality = file.add_variable::<u8>("quality", &["lat", "lon"]).unwrap();
        quality.put_values(&std::vec![0u8, 2, 0, 2, 3, 1], ..).unwrap();
    }
}

#[test]
fn test_netcdf_variables_and_bands() {
    let dir = scratch_dir("nc-read");
    let path = dir.join("LST_20230601.nc");
    write_product(&path);

    let source = SourceFactory::open(path.to_str().unwrap(), None).unwrap();
    std::assert_eq!(source.variables(), std::vec!["LST".to_string(), "quality".to_string()]);
    std::assert_eq!(source.band_count("LST").unwrap(), 2);
    std::assert_eq!(source.band_count("quality").unwrap(), 1);

    let second = source.read_variable("LST", 1).unwrap();
    std::assert_eq!(second.grid.shape(), (2, 3));
    std::assert_eq!(second.grid.get(0, 0), Some(310.0));
    std::assert_eq!(second.attributes.text("units"), Some("K"));

    std::assert!(source.read_variable("LST", 2).is_err());
    std::assert!(std::matches!(source.read_variable("NDVI", 0), Err(GridError::VariableNotFound(_))));
    std::assert_eq!(
        source.global_attribute("reference_time"),
        Some(AttrValue::Text("2023-06-01T12:00:00Z".to_string()))
    );
}

#[test]
fn test_netcdf_fill_and_axes() {
    let dir = scratch_dir("nc-fill");
    let path = dir.join("LST_20230601.nc");
    write_product(&path);

    let source = NetcdfSource::open(path.to_str().unwrap()).unwrap();
    let first = source.read_variable("LST", 0).unwrap();
    let encoding = Encoding::from_attributes(&first.attributes).unwrap();
    let physical = decode(&first.grid, &encoding);
    std::assert!(physical.get(0, 0).unwrap().is_nan());
    std::assert_eq!(physical.get(0, 1), Some(300.0));
    std::assert_eq!(physical.valid_count(), 5);

    let (lat, lon) = source.axes().unwrap();
    std::assert_eq!(lat.orientation(), Orientation::Descending);
    std::assert_eq!(lon.values(), &[0.5, 1.5, 2.5]);

    let subset = slice_bbox(&physical, &lat, &lon, &BoundingBox::new(1.2, 0.2, 2.8, 0.8)).unwrap();
    std::assert_eq!(subset.grid.data(), &[303.0, 304.0]);
}

#[test]
fn test_netcdf_flags() {
    let dir = scratch_dir("nc-flags");
    let path = dir.join("LST_20230601.nc");
    write_product(&path);

    let source = NetcdfSource::open(path.to_str().unwrap()).unwrap();
    let flags = source.read_flags("quality", 0).unwrap();
    std::assert_eq!(flags.extract_bit(1).unwrap().data(), &[0, 1, 0, 1, 1, 0]);
    std::assert!(source.read_coordinates("LST").is_err());
}

#[test]
fn test_gzipped_netcdf() {
    let dir = scratch_dir("nc-gzip");
    let plain = dir.join("LST_20230601.nc");
    write_product(&plain);
    let packed = dir.join("LST_20230601.nc.gz");
    fs::write(&packed, gzip(&fs::read(&plain).unwrap())).unwrap();

    let source = SourceFactory::open(packed.to_str().unwrap(), None).unwrap();
    std::assert_eq!(source.read_variable("LST", 0).unwrap().grid.get(1, 2), Some(304.0));
}
