//! End-to-end tests over a flat binary product on disk

extern crate std;

use std::fs;
use std::path::PathBuf;
use byteorder::{LittleEndian, WriteBytesExt};

use geoslice::api::{ExtractRequest, GeoSlice};
use geoslice::colormap::{save_png, ProductTable};
use geoslice::coordinate::{BoundingBox, Point};
use geoslice::io::{save_array, ArrayFormat};
use geoslice::raster::GridError;
use geoslice::regions::regions_from_str;

/// 4x4 grid over lon 0..4, lat 0..4, north up; raw value = row * 4 + col
const DESCRIPTOR: &str = r#"
variable = "LST"
rows = 4
cols = 4
data_type = "u16"
byte_order = "little"
row_order = "north_up"
extent = [0.0, 0.0, 4.0, 4.0]
reference_time = "2023-06-01T12:00:00Z"

[attributes]
_FillValue = 65535

[flags]
variable = "Q_FLAGS"
substitute = ["LST", "FLG"]
data_type = "u8"
"#;

const REGIONS: &str = r#"
[[region]]
name = "West"

[[region.polygon]]
exterior = [[0.0, 0.0], [2.0, 0.0], [2.0, 4.0], [0.0, 4.0]]

[[region]]
name = "East"

[[region.polygon]]
exterior = [[2.0, 0.0], [4.0, 0.0], [4.0, 4.0], [2.0, 4.0]]
"#;

struct Fixture {
    dir: PathBuf,
    descriptor: String,
}

impl Fixture {
    fn path(&self, name: &str) -> String {
        self.dir.join(name).to_string_lossy().to_string()
    }
}

fn write_product(dir: &PathBuf, date: &str, offset: u16) {
    let mut payload = Vec::new();
    for i in 0..16u16 {
        // Bottom-right cell is missing
        let value = if i == 15 { 65535 } else { i + offset };
        payload.write_u16::<LittleEndian>(value).unwrap();
    }
    fs::write(dir.join(format!("LST_{}.bin", date)), payload).unwrap();

    // Bit 0 marks the top-left cell as cloudy, bit 1 is set everywhere
    let mut flags = vec![0b10u8; 16];
    flags[0] = 0b11;
    fs::write(dir.join(format!("FLG_{}.bin", date)), flags).unwrap();
}

fn fixture(name: &str) -> Fixture {
    let dir = std::env::temp_dir()
        .join("geoslice-integration")
        .join(format!("{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    write_product(&dir, "20230601", 0);
    write_product(&dir, "20230602", 100);

    let descriptor = dir.join("grid.toml");
    fs::write(&descriptor, DESCRIPTOR).unwrap();

    Fixture { dir, descriptor: descriptor.to_string_lossy().to_string() }
}

fn api(fixture: &Fixture) -> GeoSlice {
    GeoSlice::new(Some(&fixture.path("geoslice.log"))).unwrap()
}

#[test]
fn test_extract_bbox_from_flat_product() {
    let fx = fixture("bbox");
    let api = api(&fx);
    let source = api.open(&fx.path("LST_20230601.bin"), Some(&fx.descriptor)).unwrap();

    let request = ExtractRequest::new("LST").with_bbox(BoundingBox::new(1.2, 1.2, 2.8, 2.8));
    let extraction = api.extract(source.as_ref(), &request, None).unwrap();

    std::assert_eq!(extraction.grid.shape(), (2, 2));
    std::assert_eq!(extraction.grid.data(), &[5.0, 6.0, 9.0, 10.0]);
    std::assert_eq!(extraction.lat.values(), &[2.5, 1.5]);
    std::assert_eq!(extraction.lon.values(), &[1.5, 2.5]);
    std::assert_eq!((extraction.window.row, extraction.window.col), (1, 1));
}

#[test]
fn test_extract_region_with_quality_mask() {
    let fx = fixture("region");
    let api = api(&fx);
    let regions = regions_from_str(REGIONS).unwrap();
    let source = api.open(&fx.path("LST_20230601.bin"), Some(&fx.descriptor)).unwrap();

    let request = ExtractRequest::new("LST")
        .with_region("West")
        .with_quality_bit("Q_FLAGS", 0);
    let extraction = api.extract(source.as_ref(), &request, Some(&regions)).unwrap();
    let grid = &extraction.grid;

    // Flagged cell
    std::assert!(grid.get(0, 0).unwrap().is_nan());
    std::assert_eq!(grid.get(0, 1), Some(1.0));
    std::assert_eq!(grid.get(3, 1), Some(13.0));
    // East half is outside the region
    for r in 0..4 {
        std::assert!(grid.get(r, 2).unwrap().is_nan());
        std::assert!(grid.get(r, 3).unwrap().is_nan());
    }
    std::assert_eq!(grid.valid_count(), 7);
}

#[test]
fn test_quality_bit_set_everywhere_masks_all() {
    let fx = fixture("allflagged");
    let api = api(&fx);
    let source = api.open(&fx.path("LST_20230601.bin"), Some(&fx.descriptor)).unwrap();

    let request = ExtractRequest::new("LST").with_quality_bit("Q_FLAGS", 1);
    let extraction = api.extract(source.as_ref(), &request, None).unwrap();
    std::assert!(extraction.statistics().is_none());
}

#[test]
fn test_unknown_region_fails_before_reading() {
    let fx = fixture("noregion");
    let api = api(&fx);
    let regions = regions_from_str(REGIONS).unwrap();
    let source = api.open(&fx.path("LST_20230601.bin"), Some(&fx.descriptor)).unwrap();

    let request = ExtractRequest::new("LST").with_region("North");
    match api.extract(source.as_ref(), &request, Some(&regions)) {
        Err(GridError::RegionNotFound(name)) => std::assert_eq!(name, "North"),
        other => panic!("expected RegionNotFound, got {:?}", other),
    }
}

#[test]
fn test_bbox_outside_grid_is_empty_slice() {
    let fx = fixture("empty");
    let api = api(&fx);
    let source = api.open(&fx.path("LST_20230601.bin"), Some(&fx.descriptor)).unwrap();

    let request = ExtractRequest::new("LST").with_bbox(BoundingBox::new(40.0, 40.0, 50.0, 50.0));
    let result = api.extract(source.as_ref(), &request, None);
    std::assert!(matches!(result, Err(GridError::EmptySlice { .. })));
}

#[test]
fn test_write_csv_and_png() {
    let fx = fixture("outputs");
    let api = api(&fx);
    let source = api.open(&fx.path("LST_20230601.bin"), Some(&fx.descriptor)).unwrap();
    let extraction = api.extract(source.as_ref(), &ExtractRequest::new("LST"), None).unwrap();

    let csv_path = fx.path("lst.csv");
    save_array(&extraction.grid, &csv_path, ArrayFormat::Csv).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    std::assert_eq!(lines[0], "row/col,0,1,2,3");
    std::assert_eq!(lines[4], "3,12,13,14,");

    let table = ProductTable::builtin().unwrap();
    let image = extraction.render(table.get("LST").unwrap());
    let written = save_png(&image, &fx.path("lst.png")).unwrap();
    let reloaded = image::open(&written).unwrap().to_rgba8();
    std::assert_eq!(reloaded.dimensions(), (4, 4));
    // Missing cell stays transparent
    std::assert_eq!(reloaded.get_pixel(3, 3)[3], 0);
    std::assert_eq!(reloaded.get_pixel(0, 0)[3], 255);
}

#[test]
fn test_inspect_reports_time_and_axes() {
    let fx = fixture("inspect");
    let api = api(&fx);
    let source = api.open(&fx.path("LST_20230601.bin"), Some(&fx.descriptor)).unwrap();

    let report = api.inspect(source.as_ref(), "LST_20230601.bin").unwrap();
    std::assert!(report.contains("Reference time: 2023-06-01 12:00:00 UTC"));
    std::assert!(report.contains("Latitude: 4 values"));
    std::assert!(report.contains("Variable LST: 1 band(s) of 4x4"));
    std::assert!(report.contains("Variable Q_FLAGS: flags"));
}

#[test]
fn test_time_series_sorted_by_file_name() {
    let fx = fixture("series");
    let api = api(&fx);
    let inputs = vec![fx.path("LST_20230602.bin"), fx.path("LST_20230601.bin")];

    let series = api
        .time_series(&inputs, Some(&fx.descriptor), "LST", &Point::new(3.4, 3.4), 2)
        .unwrap();

    std::assert_eq!(
        series,
        vec![("2023-06-01".to_string(), 3.0), ("2023-06-02".to_string(), 103.0)]
    );

    // Sampling the missing corner yields NaN rather than an error
    let source = api.open(&inputs[1], Some(&fx.descriptor)).unwrap();
    let value = api.sample(source.as_ref(), "LST", 0, &Point::new(3.6, 0.4)).unwrap();
    std::assert!(value.is_nan());
}
