use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::{Error, Ft5436, Reg, I2C_ADDR};

impl<I, E> Ft5436<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  pub(crate) fn read_reg(&mut self, reg: Reg) -> Result<u8, Error<E>> {
    let mut buf = [0u8; 1];
    self.read_bytes(reg, &mut buf)?;
    Ok(buf[0])
  }

  pub(crate) fn read_bytes(&mut self, reg: Reg, buf: &mut [u8]) -> Result<(), Error<E>> {
    self.i2c.write_read(I2C_ADDR, &[reg.into()], buf).map_err(Error::I2c)
  }

  pub(crate) fn write_reg(&mut self, reg: Reg, value: u8) -> Result<(), Error<E>> {
    self.i2c.write(I2C_ADDR, &[reg.into(), value]).map_err(Error::I2c)
  }
}
