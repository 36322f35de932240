//! Edge-triggered mode: an async task watches INT, the loop only reads after an edge.
#![allow(unused)]
use embedded_hal::i2c::{I2c, SevenBitAddress};
use embedded_hal_async::digital::Wait;
use ft5436::{Config, Ft5436, TouchTracker, TouchTrigger};

static TOUCH_INT: TouchTrigger = TouchTrigger::new();

#[allow(dead_code)]
async fn int_task<INT: Wait>(mut int: INT) -> Result<(), INT::Error> {
  loop {
    TOUCH_INT.wait_for_edge(&mut int).await?;
  }
}

#[allow(dead_code)]
fn touch_loop<I2C, E>(i2c: I2C) -> Result<(), ft5436::Error<E>>
where
  I2C: I2c<SevenBitAddress, Error = E>,
{
  let mut touch = Ft5436::new(i2c, Config::default());
  touch.init()?;

  let mut tracker = TouchTracker::with_trigger(touch, &TOUCH_INT);
  loop {
    match tracker.try_sample() {
      Ok(true) => {
        for point in tracker.points() {
          let _ = point;
          // handle moved or added touches
        }
      }
      Ok(false) => {}
      Err(e) => return Err(e),
    }
  }
}

fn main() {}
