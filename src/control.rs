use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::{Error, Ft5436, Reg};

impl<I, E> Ft5436<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Chip identifier (`0xA3`). See [`crate::chip_id`] for known values.
  pub fn chip_id(&mut self) -> Result<u8, Error<E>> {
    self.read_reg(Reg::ChipId)
  }

  /// Application firmware version (`0xA6`).
  pub fn firmware_version(&mut self) -> Result<u8, Error<E>> {
    self.read_reg(Reg::FirmwareVersion)
  }

  /// Panel vendor identifier (`0xA8`).
  pub fn vendor_id(&mut self) -> Result<u8, Error<E>> {
    self.read_reg(Reg::VendorId)
  }

  /// Read all identification registers.
  pub fn device_info(&mut self) -> Result<DeviceInfo, Error<E>> {
    let info =
      DeviceInfo { chip_id: self.chip_id()?, firmware_version: self.firmware_version()?, vendor_id: self.vendor_id()? };

    #[cfg(feature = "defmt")]
    defmt::info!(
      "FT5436: chip 0x{:02x}, firmware {}, vendor 0x{:02x}",
      info.chip_id,
      info.firmware_version,
      info.vendor_id
    );

    Ok(info)
  }

  pub fn power_mode(&mut self) -> Result<PowerMode, Error<E>> {
    let raw = self.read_reg(Reg::PowerMode)?;
    PowerMode::try_from(raw).map_err(|_| Error::InvalidPowerMode(raw))
  }

  /// Switch the controller's power mode. Leaving hibernate requires a hardware
  /// reset, which this driver does not perform.
  pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), Error<E>> {
    self.write_reg(Reg::PowerMode, mode.into())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
  pub chip_id: u8,
  pub firmware_version: u8,
  pub vendor_id: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
  Active = 0x00,
  Monitor = 0x01,
  Standby = 0x02,
  Hibernate = 0x03,
}

impl From<PowerMode> for u8 {
  fn from(v: PowerMode) -> Self {
    v as u8
  }
}

impl TryFrom<u8> for PowerMode {
  type Error = ();

  fn try_from(bits: u8) -> Result<Self, Self::Error> {
    match bits {
      0x00 => Ok(Self::Active),
      0x01 => Ok(Self::Monitor),
      0x02 => Ok(Self::Standby),
      0x03 => Ok(Self::Hibernate),
      _ => Err(()),
    }
  }
}
