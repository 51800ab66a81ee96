//! Product readers and writers
//!
//! `RasterSource` is the seam every reader implements. Flat binary grids are
//! always read natively, NetCDF and HDF5 with the `netcdf` feature. Other
//! formats plug in through `MemorySource`.

pub mod byte_order;
mod data_type;
mod source;
mod descriptor;
mod flat;
#[cfg(feature = "netcdf")]
mod nc_source;
mod factory;
mod writer;
mod tests;

pub use byte_order::{ByteOrder, ByteOrderHandler};
pub use data_type::{decode_flags, decode_samples, sample_count, DataType};
pub use source::{MemorySource, RasterSource, Variable, LATITUDE_NAMES, LONGITUDE_NAMES};
pub use descriptor::{FlagSpec, GridDescriptor, RowOrder};
pub use flat::FlatGridSource;
#[cfg(feature = "netcdf")]
pub use nc_source::NetcdfSource;
pub use factory::SourceFactory;
pub use writer::{save_array, save_series, write_csv, write_json, ArrayFormat};
