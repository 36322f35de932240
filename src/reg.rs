/******************************************************************************
 * Refer to the FocalTech FT5x06 series application note for the full map.   *
 * ========================================================================== *
 *                       FT5436 - Registers & Touch Data Layout               *
*******************************************************************************/

pub(crate) const I2C_ADDR: u8 = 0x38;

/// Hardware limit on simultaneously reported touches.
pub const MAX_TOUCH_POINTS: usize = 5;

// Touch data block, read in one transaction starting at `DevMode`
pub(crate) const META_LEN: usize = 3;
/// Size of one point record.
pub const POINT_LEN: usize = 6;
/// Size of the touch data block read each sampling cycle.
pub const POINT_READ_LEN: usize = META_LEN + POINT_LEN * MAX_TOUCH_POINTS;

// Offsets inside one point record
pub(crate) const POINT_XH: usize = 0;
pub(crate) const POINT_XL: usize = 1;
pub(crate) const POINT_YH: usize = 2;
pub(crate) const POINT_YL: usize = 3;
pub(crate) const POINT_WEIGHT: usize = 4;
pub(crate) const POINT_MISC: usize = 5;

pub(crate) const TD_STATUS_MASK: u8 = 0x0F;

pub(crate) const DEV_MODE_WORKING: u8 = 0x00;
pub(crate) const DEFAULT_POINT_RATE: u8 = 14;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reg {
  // Touch data (0x00..0x20)
  DevMode = 0x00,
  TdStatus = 0x02,

  // Report rate
  PointRate = 0x88,

  // Identification and power
  ChipId = 0xA3,
  PowerMode = 0xA5,
  FirmwareVersion = 0xA6,
  VendorId = 0xA8,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

/// Chip identifiers reported by the FT5x family in the chip id register (`0xA3`).
pub mod chip_id {
  pub const FT5X16: u8 = 0x0A;
  pub const FT5X06: u8 = 0x55;
  pub const FT6X06: u8 = 0x06;
  pub const FT6X36: u8 = 0x36;
}
