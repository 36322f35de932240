//! Poll mode: read the controller on every pass of the main loop.
#![allow(unused)]
use embedded_hal::i2c::{I2c, SevenBitAddress};
use ft5436::{Axis, Config, Ft5436, TouchTracker};

#[allow(dead_code)]
fn run<I2C, E>(i2c: I2C) -> Result<(), ft5436::Error<E>>
where
  I2C: I2c<SevenBitAddress, Error = E>,
{
  let config = Config::default().with_max_points(2);
  let mut touch = Ft5436::new(i2c, config);
  touch.init()?;
  let _info = touch.device_info()?;

  let mut tracker = TouchTracker::new(touch).with_config(&config);
  loop {
    if tracker.sample() {
      for n in 1..=tracker.point_count() {
        let (x, y) = (tracker.point_coordinate(n, Axis::X), tracker.point_coordinate(n, Axis::Y));
        let _ = (x, y);
        // redraw cursor n at (x, y)
      }
    }
    if tracker.consume_release_count() > 0 {
      // a finger lifted
    }
  }
}

fn main() {}
