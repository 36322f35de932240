use crate::reg::{DEFAULT_POINT_RATE, MAX_TOUCH_POINTS};

/// Default per-axis jitter allowance, in controller coordinate units.
pub const DEFAULT_JITTER_MARGIN: u16 = 5;

/// Driver and tracker settings.
///
/// `jitter_margin` and `max_points` seed a [`crate::TouchTracker`];
/// `point_rate` is written to the controller by [`crate::Ft5436::init`].
///
/// # Example
/// ```no_run
/// use ft5436::Config;
///
/// let config = Config::default().with_jitter_margin(8).with_max_points(2);
/// assert_eq!(config.max_points, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
  /// Largest per-axis movement (inclusive) still treated as sensor noise.
  pub jitter_margin: u16,
  /// Cap on the number of simultaneous touches reported, `0..=5`.
  pub max_points: u8,
  /// Active-mode report rate written to `0x88`.
  pub point_rate: u8,
}

impl Config {
  pub const fn new() -> Self {
    Self { jitter_margin: DEFAULT_JITTER_MARGIN, max_points: MAX_TOUCH_POINTS as u8, point_rate: DEFAULT_POINT_RATE }
  }

  pub const fn with_jitter_margin(mut self, margin: u16) -> Self {
    self.jitter_margin = margin;
    self
  }

  /// Values above the hardware limit are ignored.
  pub const fn with_max_points(mut self, count: u8) -> Self {
    if count as usize <= MAX_TOUCH_POINTS {
      self.max_points = count;
    }
    self
  }

  pub const fn with_point_rate(mut self, rate: u8) -> Self {
    self.point_rate = rate;
    self
  }
}

impl Default for Config {
  fn default() -> Self {
    Self::new()
  }
}
