//! Packed quality-flag handling

use super::errors::{GridError, GridResult};
use super::types::Grid;
use crate::extractor::Window;

/// Unsigned sample types that can hold packed flag bits
pub trait BitField: Copy {
    /// Width of the type in bits
    const BITS: u32;

    /// `(self >> position) & 1`
    fn bit(self, position: u32) -> u8;
}

macro_rules! impl_bitfield {
    ($($t:ty),*) => {
        $(impl BitField for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn bit(self, position: u32) -> u8 {
                ((self >> position) & 1) as u8
            }
        })*
    };
}

impl_bitfield!(u8, u16, u32);

/// Extract one bit from every sample of a packed flag grid
///
/// # Arguments
/// * `byte_array` - Packed flag samples
/// * `bit_position` - Bit to extract, 0 being the least significant
///
/// # Returns
/// A grid of 0/1 values with the same shape
pub fn extract_bit<T: BitField>(byte_array: &Grid<T>, bit_position: u32) -> GridResult<Grid<u8>> {
    if bit_position >= T::BITS {
        return Err(GridError::InvalidBitPosition { bit: bit_position, width: T::BITS });
    }
    Ok(byte_array.map(|v| v.bit(bit_position)))
}

/// Set cells to NaN wherever the flag grid is 1
pub fn apply_quality_flag(data: &Grid<f64>, flag: &Grid<u8>) -> GridResult<Grid<f64>> {
    data.zip_map(flag, |v, f| if f == 1 { f64::NAN } else { v })
}

/// Packed flag grid of whichever width the product stores
#[derive(Debug, Clone, PartialEq)]
pub enum FlagGrid {
    U8(Grid<u8>),
    U16(Grid<u16>),
    U32(Grid<u32>),
}

impl FlagGrid {
    /// Shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        match self {
            FlagGrid::U8(g) => g.shape(),
            FlagGrid::U16(g) => g.shape(),
            FlagGrid::U32(g) => g.shape(),
        }
    }

    /// Width of the stored samples in bits
    pub fn bits(&self) -> u32 {
        match self {
            FlagGrid::U8(_) => u8::BITS,
            FlagGrid::U16(_) => u16::BITS,
            FlagGrid::U32(_) => u32::BITS,
        }
    }

    /// Extract one bit, checked against the stored width
    pub fn extract_bit(&self, bit_position: u32) -> GridResult<Grid<u8>> {
        match self {
            FlagGrid::U8(g) => extract_bit(g, bit_position),
            FlagGrid::U16(g) => extract_bit(g, bit_position),
            FlagGrid::U32(g) => extract_bit(g, bit_position),
        }
    }

    /// Copy out the cells of a window
    pub fn window(&self, window: &Window) -> GridResult<FlagGrid> {
        Ok(match self {
            FlagGrid::U8(g) => FlagGrid::U8(g.window(window)?),
            FlagGrid::U16(g) => FlagGrid::U16(g.window(window)?),
            FlagGrid::U32(g) => FlagGrid::U32(g.window(window)?),
        })
    }

    /// Reverse the row order
    pub fn flip_rows(&self) -> FlagGrid {
        match self {
            FlagGrid::U8(g) => FlagGrid::U8(g.flip_rows()),
            FlagGrid::U16(g) => FlagGrid::U16(g.flip_rows()),
            FlagGrid::U32(g) => FlagGrid::U32(g.flip_rows()),
        }
    }
}
