#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `no_std` driver for the FocalTech FT5436 capacitive multi-touch controller.
//!
//! The FT5436 reports up to five simultaneous touches over I²C and pulls its
//! INT line low whenever a new frame is ready. Raw coordinates wobble by a few
//! units even under a perfectly still finger, so this crate pairs a thin
//! register driver with a tracker that filters out that jitter:
//!
//! - [`Ft5436`] owns the bus, brings the controller into working mode and
//!   decodes the touch data block into a [`TouchSample`]
//! - [`TouchTracker`] compares each sample with the previous one and reports
//!   only real movement or a change in the number of touches, along with how
//!   many touches were lifted
//! - [`TouchTrigger`] carries the "new data" edge from an interrupt handler or
//!   an async task (via `embedded-hal-async`'s `Wait`) to the tracker
//! - Identification and power mode helpers for bring-up diagnostics
//!
//! ```no_run
//! use embedded_hal::i2c::{I2c, SevenBitAddress};
//! use ft5436::{Axis, Config, Ft5436, TouchTracker};
//!
//! fn example<I2C, E>(i2c: I2C) -> Result<(), ft5436::Error<E>>
//! where
//!   I2C: I2c<SevenBitAddress, Error = E>,
//! {
//!   let config = Config::default().with_jitter_margin(4);
//!   let mut touch = Ft5436::new(i2c, config);
//!   touch.init()?;
//!
//!   let mut tracker = TouchTracker::new(touch).with_config(&config);
//!   loop {
//!     if tracker.sample() {
//!       let _ = tracker.point_coordinate(1, Axis::X);
//!     }
//!   }
//! }
//! ```
mod config;
mod control;
mod point;
mod reg;
mod rw;
mod source;
mod tracker;
mod trigger;

#[cfg(test)]
mod testing;

use embedded_hal::i2c::{I2c, SevenBitAddress};

pub use config::*;
pub use control::*;
pub use point::*;
pub use reg::{chip_id, MAX_TOUCH_POINTS, POINT_LEN, POINT_READ_LEN};
use reg::*;
pub use source::PointSource;
pub use tracker::{TouchTracker, TrackerState};
pub use trigger::TouchTrigger;

/// Errors that can occur while talking to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// I²C bus transaction failed with the underlying driver error.
  I2c(E),
  /// The power mode register held a value outside the documented modes.
  InvalidPowerMode(u8),
}

/// Register-level driver for the FT5436.
///
/// Create it with [`Ft5436::new`], call [`Ft5436::init`] once the controller is
/// out of reset, then either read samples directly with
/// [`Ft5436::touch_sample`] or hand the driver to a [`TouchTracker`], which
/// uses it through [`PointSource`].
pub struct Ft5436<I> {
  i2c: I,
  config: Config,
  regs: [u8; POINT_READ_LEN],
}

impl<I> Ft5436<I> {
  /// Create a new driver instance. Nothing is sent until [`Ft5436::init`].
  pub fn new(i2c: I, config: Config) -> Self {
    Self { i2c, config, regs: [0; POINT_READ_LEN] }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Raw copy of the touch data block from the most recent read.
  pub fn last_registers(&self) -> &[u8; POINT_READ_LEN] {
    &self.regs
  }

  /// Consume the driver and return the bus.
  pub fn release(self) -> I {
    self.i2c
  }
}

impl<I, E> Ft5436<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Put the controller into working mode and program the report rate.
  pub fn init(&mut self) -> Result<(), Error<E>> {
    self.write_reg(Reg::DevMode, DEV_MODE_WORKING)?;
    self.write_reg(Reg::PointRate, self.config.point_rate)?;

    #[cfg(feature = "defmt")]
    defmt::info!("FT5436: working mode, point rate {}", self.config.point_rate);

    Ok(())
  }

  /// Read and decode the touch data block in a single transaction.
  pub fn touch_sample(&mut self) -> Result<TouchSample, Error<E>> {
    let mut regs = [0u8; POINT_READ_LEN];
    self.read_bytes(Reg::DevMode, &mut regs)?;
    self.regs = regs;
    Ok(TouchSample::from_registers(&self.regs))
  }
}

impl<I, E> PointSource for Ft5436<I>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  type Error = Error<E>;

  fn read_sample(&mut self) -> Result<TouchSample, Self::Error> {
    self.touch_sample()
  }
}
