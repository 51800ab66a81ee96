#![cfg(test)]

mod data_type_tests;
mod descriptor_tests;
#[cfg(feature = "netcdf")]
mod netcdf_tests;
