use bitfield_struct::bitfield;

use crate::reg::{
  MAX_TOUCH_POINTS, META_LEN, POINT_LEN, POINT_MISC, POINT_READ_LEN, POINT_WEIGHT, POINT_XH, POINT_XL, POINT_YH,
  POINT_YL, TD_STATUS_MASK,
};

/// Coordinate value reported for a slot that holds no touch.
pub const NO_POINT: i16 = -1;

/// A single touch position.
///
/// Either coordinate set to [`NO_POINT`] marks the slot as empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
  pub x: i16,
  pub y: i16,
}

impl TouchPoint {
  pub const fn new(x: i16, y: i16) -> Self {
    Self { x, y }
  }

  /// Returns a sentinel point representing "no touch".
  pub const fn absent() -> Self {
    Self::new(NO_POINT, NO_POINT)
  }

  /// Returns `true` if the point carries real coordinates.
  ///
  /// Not used by the tracker, which relies on the sample count; kept for
  /// callers inspecting stale slots of a [`TouchSample`].
  pub const fn is_present(&self) -> bool {
    self.x != NO_POINT && self.y != NO_POINT
  }

  /// Coordinate along the requested axis.
  pub const fn get(&self, axis: Axis) -> i16 {
    match axis {
      Axis::X => self.x,
      Axis::Y => self.y,
    }
  }
}

impl Default for TouchPoint {
  fn default() -> Self {
    Self::absent()
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
  X,
  Y,
}

/// One decoded sampling cycle: up to [`MAX_TOUCH_POINTS`] positions and the
/// number of them that are valid.
///
/// Slots at or past [`TouchSample::count`] may hold stale coordinates and are
/// never handed out by the accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
  points: [TouchPoint; MAX_TOUCH_POINTS],
  count: u8,
}

impl TouchSample {
  /// A sample with no touches and every slot set to "no point".
  pub const fn empty() -> Self {
    Self { points: [TouchPoint::absent(); MAX_TOUCH_POINTS], count: 0 }
  }

  /// Build a sample from the given active points. Anything past the hardware
  /// limit is dropped.
  pub fn new(active: &[TouchPoint]) -> Self {
    let mut sample = Self::empty();
    let count = active.len().min(MAX_TOUCH_POINTS);
    sample.points[..count].copy_from_slice(&active[..count]);
    sample.count = count as u8;
    sample
  }

  /// Build a sample from all slots plus a reported count, clamped to the
  /// hardware limit.
  pub fn from_parts(points: [TouchPoint; MAX_TOUCH_POINTS], count: u8) -> Self {
    Self { points, count: count.min(MAX_TOUCH_POINTS as u8) }
  }

  /// Decode the touch data block read from register `0x00` onward.
  ///
  /// The point count comes from the low nibble of `TD_STATUS`, clamped to
  /// [`MAX_TOUCH_POINTS`]. All five records are decoded regardless of the
  /// count; coordinates are not checked for plausibility.
  pub fn from_registers(regs: &[u8; POINT_READ_LEN]) -> Self {
    let count = regs[crate::reg::Reg::TdStatus as usize] & TD_STATUS_MASK;
    let mut points = [TouchPoint::absent(); MAX_TOUCH_POINTS];
    for (slot, point) in points.iter_mut().enumerate() {
      *point = RawPoint::from_registers(regs, slot).position();
    }
    Self::from_parts(points, count)
  }

  /// Number of valid points.
  pub const fn count(&self) -> u8 {
    self.count
  }

  /// The valid points, in the order the controller reported them.
  pub fn points(&self) -> &[TouchPoint] {
    &self.points[..self.count as usize]
  }

  /// Valid point at a 0-based slot.
  pub fn get(&self, slot: usize) -> Option<TouchPoint> {
    self.points().get(slot).copied()
  }

  pub fn is_empty(&self) -> bool {
    self.count == 0
  }

  pub(crate) fn clamp_count(&mut self, max: u8) {
    self.count = self.count.min(max);
  }

  pub(crate) fn slots_mut(&mut self) -> &mut [TouchPoint; MAX_TOUCH_POINTS] {
    &mut self.points
  }

  pub(crate) fn set_count(&mut self, count: u8) {
    self.count = count.min(MAX_TOUCH_POINTS as u8);
  }
}

impl Default for TouchSample {
  fn default() -> Self {
    Self::empty()
  }
}

/// Event flag carried in the top bits of a point's `XH` register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointEvent {
  PressDown = 0b00,
  LiftUp = 0b01,
  Contact = 0b10,
  None = 0b11,
}

impl PointEvent {
  const fn from_bits(bits: u8) -> Self {
    match bits & 0b11 {
      0b00 => Self::PressDown,
      0b01 => Self::LiftUp,
      0b10 => Self::Contact,
      _ => Self::None,
    }
  }
}

#[bitfield(u8)]
struct XHigh {
  #[bits(4)]
  coord: u8,
  #[bits(2)]
  __: u8,
  #[bits(2)]
  event: u8,
}

#[bitfield(u8)]
struct YHigh {
  #[bits(4)]
  coord: u8,
  #[bits(4)]
  id: u8,
}

/// Everything the controller reports for one touch slot.
///
/// The tracker only consumes [`RawPoint::position`]; `event`, `id`, `weight`
/// and `area` are decoded for applications that want the full record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPoint {
  pub x: u16,
  pub y: u16,
  pub event: PointEvent,
  pub id: u8,
  pub weight: u8,
  pub area: u8,
}

impl RawPoint {
  /// Decode one six-byte point record (`XH XL YH YL WEIGHT MISC`).
  pub fn decode(record: &[u8; POINT_LEN]) -> Self {
    let xh = XHigh::from_bits(record[POINT_XH]);
    let yh = YHigh::from_bits(record[POINT_YH]);
    Self {
      x: (u16::from(xh.coord()) << 8) | u16::from(record[POINT_XL]),
      y: (u16::from(yh.coord()) << 8) | u16::from(record[POINT_YL]),
      event: PointEvent::from_bits(xh.event()),
      id: yh.id(),
      weight: record[POINT_WEIGHT],
      area: record[POINT_MISC] >> 4,
    }
  }

  /// Decode the record for a 0-based slot out of the full touch data block.
  pub fn from_registers(regs: &[u8; POINT_READ_LEN], slot: usize) -> Self {
    let start = META_LEN + POINT_LEN * slot;
    let mut record = [0u8; POINT_LEN];
    record.copy_from_slice(&regs[start..start + POINT_LEN]);
    Self::decode(&record)
  }

  /// Position as exposed to the tracker. Coordinates are 12-bit so they always
  /// fit an `i16`.
  pub fn position(&self) -> TouchPoint {
    TouchPoint::new(self.x as i16, self.y as i16)
  }
}
