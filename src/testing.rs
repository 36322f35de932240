//! In-memory stand-in for the controller's register file.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};

use crate::reg::I2C_ADDR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BusError;

impl embedded_hal::i2c::Error for BusError {
  fn kind(&self) -> ErrorKind {
    ErrorKind::Other
  }
}

/// Register-pointer bus: the first written byte selects the register, further
/// written bytes are stored from there, reads continue from the pointer.
pub(crate) struct FakeBus {
  pub regs: [u8; 256],
  pub fail: bool,
  pointer: usize,
}

impl FakeBus {
  pub fn new() -> Self {
    Self { regs: [0; 256], fail: false, pointer: 0 }
  }
}

impl ErrorType for FakeBus {
  type Error = BusError;
}

impl I2c<SevenBitAddress> for FakeBus {
  fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
    assert_eq!(address, I2C_ADDR);
    if self.fail {
      return Err(BusError);
    }
    for op in operations {
      match op {
        Operation::Write(bytes) => {
          if let Some((&reg, data)) = bytes.split_first() {
            self.pointer = reg as usize;
            for &byte in data {
              self.regs[self.pointer] = byte;
              self.pointer = (self.pointer + 1) % self.regs.len();
            }
          }
        }
        Operation::Read(buf) => {
          for byte in buf.iter_mut() {
            *byte = self.regs[self.pointer];
            self.pointer = (self.pointer + 1) % self.regs.len();
          }
        }
      }
    }
    Ok(())
  }
}
