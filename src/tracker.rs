//! Jitter-filtered view of the current touch points.
//!
//! [`TouchTracker`] sits between the application loop and a [`PointSource`].
//! Each call to [`TouchTracker::sample`] pulls a fresh frame (when the edge
//! trigger says one is ready, or unconditionally in poll mode), compares it to
//! the previous frame and reports whether anything moved by more than the
//! jitter margin or whether the number of touches changed.
//!
//! ```no_run
//! # use ft5436::{PointSource, TouchTracker, Axis};
//! # fn example<S: PointSource>(source: S) {
//! let mut tracker = TouchTracker::new(source);
//!
//! loop {
//!   if tracker.sample() {
//!     for n in 1..=tracker.point_count() {
//!       let _ = (tracker.point_coordinate(n, Axis::X), tracker.point_coordinate(n, Axis::Y));
//!     }
//!   }
//!   let _released = tracker.consume_release_count();
//! }
//! # }
//! ```
//!
//! Comparison is positional: slot `i` of this frame is compared with slot `i`
//! of the last one. The controller may reorder contacts as fingers come and go,
//! so code that needs per-finger identity across frames has to match points
//! itself on top of this.

use crate::config::Config;
use crate::point::{Axis, TouchPoint, TouchSample, NO_POINT};
use crate::reg::MAX_TOUCH_POINTS;
use crate::source::PointSource;
use crate::trigger::TouchTrigger;

/// Whether the tracker has a baseline to compare against yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerState {
  /// No frame ingested yet; the first one never reports a change.
  Uninitialized,
  /// Every frame is compared with the previous one.
  Tracking,
}

/// Stabilized touch state for one sensor.
pub struct TouchTracker<'t, S> {
  source: S,
  trigger: Option<&'t TouchTrigger>,
  current: TouchSample,
  previous: TouchSample,
  jitter_margin: u16,
  max_points: u8,
  pending_release: u8,
  state: TrackerState,
}

impl<S> TouchTracker<'static, S> {
  /// Create a tracker that polls `source` on every [`TouchTracker::sample`].
  pub fn new(source: S) -> Self {
    TouchTracker::build(source, None)
  }
}

impl<'t, S> TouchTracker<'t, S> {
  /// Create a tracker that only reads `source` after `trigger` recorded an edge.
  pub fn with_trigger(source: S, trigger: &'t TouchTrigger) -> Self {
    Self::build(source, Some(trigger))
  }

  fn build(source: S, trigger: Option<&'t TouchTrigger>) -> Self {
    let config = Config::new();
    Self {
      source,
      trigger,
      current: TouchSample::empty(),
      previous: TouchSample::empty(),
      jitter_margin: config.jitter_margin,
      max_points: config.max_points,
      pending_release: 0,
      state: TrackerState::Uninitialized,
    }
  }

  /// Apply the tracking fields of `config`. An out-of-range `max_points` is
  /// ignored, as with [`TouchTracker::set_max_points`].
  pub fn with_config(mut self, config: &Config) -> Self {
    self.set_jitter_margin(config.jitter_margin);
    self.set_max_points(config.max_points);
    self
  }

  /// Fold a sample into the tracked state and report whether it differs from
  /// the previous one.
  ///
  /// A slot counts as changed when either axis moved by more than the jitter
  /// margin. The previous frame is overwritten with the new coordinates either
  /// way, so slow drift below the margin never adds up to a change. A change in
  /// the number of points is always a change. The very first sample only sets
  /// the baseline and returns `false`.
  pub fn ingest(&mut self, mut sample: TouchSample) -> bool {
    sample.clamp_count(self.max_points);
    let count = sample.count();

    self.pending_release = self.previous.count().saturating_sub(count);

    let margin = u32::from(self.jitter_margin);
    let mut changed = false;
    for (last, new) in self.previous.slots_mut().iter_mut().zip(sample.points()) {
      if moved(last.x, new.x, margin) || moved(last.y, new.y, margin) {
        changed = true;
      }
      *last = *new;
    }

    if self.previous.count() != count {
      changed = true;
    }
    self.previous.set_count(count);
    self.current = sample;

    if self.state == TrackerState::Uninitialized {
      self.state = TrackerState::Tracking;
      changed = false;
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("FT5436: {} points, changed: {}, released: {}", count, changed, self.pending_release);

    changed
  }

  /// Take the number of touches lifted since the previous frame.
  ///
  /// Returns the count once; later calls return 0 until another frame drops
  /// touches.
  pub fn consume_release_count(&mut self) -> u8 {
    core::mem::take(&mut self.pending_release)
  }

  /// Number of touches in the current frame.
  pub fn point_count(&self) -> u8 {
    self.current.count()
  }

  /// Coordinate of touch `index`, counted from 1.
  ///
  /// Returns [`NO_POINT`] (`-1`) for index 0 or an index past
  /// [`TouchTracker::point_count`].
  pub fn point_coordinate(&self, index: u8, axis: Axis) -> i16 {
    match index.checked_sub(1) {
      Some(slot) => self.current.get(slot as usize).map_or(NO_POINT, |p| p.get(axis)),
      None => NO_POINT,
    }
  }

  pub fn point_x(&self, index: u8) -> i16 {
    self.point_coordinate(index, Axis::X)
  }

  pub fn point_y(&self, index: u8) -> i16 {
    self.point_coordinate(index, Axis::Y)
  }

  /// The touches in the current frame.
  pub fn points(&self) -> &[TouchPoint] {
    self.current.points()
  }

  /// The current frame, clamped to `max_points`.
  pub fn current(&self) -> &TouchSample {
    &self.current
  }

  pub fn state(&self) -> TrackerState {
    self.state
  }

  pub fn jitter_margin(&self) -> u16 {
    self.jitter_margin
  }

  /// Replace the jitter margin. Any value is accepted. Returns the new margin.
  pub fn set_jitter_margin(&mut self, margin: u16) -> u16 {
    self.jitter_margin = margin;
    self.jitter_margin
  }

  pub fn max_points(&self) -> u8 {
    self.max_points
  }

  /// Cap the number of reported touches. Values outside `0..=5` are ignored.
  /// Lowering the cap trims the current frame immediately; the previous frame
  /// is kept so the next release count still reflects what was on the panel.
  /// Returns the cap now in effect.
  pub fn set_max_points(&mut self, count: u8) -> u8 {
    if count as usize <= MAX_TOUCH_POINTS {
      self.max_points = count;
      self.current.clamp_count(count);
    }
    self.max_points
  }

  pub fn source(&self) -> &S {
    &self.source
  }

  pub fn source_mut(&mut self) -> &mut S {
    &mut self.source
  }

  /// Release the point source.
  pub fn into_inner(self) -> S {
    self.source
  }

  fn data_pending(&self) -> bool {
    self.trigger.map_or(true, TouchTrigger::is_pending)
  }

  fn finish_read(&self) {
    if let Some(trigger) = self.trigger {
      trigger.rearm();
    }
  }
}

impl<'t, S: PointSource> TouchTracker<'t, S> {
  /// Read a new frame if one is expected and report whether the touch state
  /// changed.
  ///
  /// Without a trigger every call reads. With a trigger, calls return `false`
  /// without touching the bus until an edge has been recorded. A failed read is
  /// treated as a frame with no touches.
  pub fn sample(&mut self) -> bool {
    if !self.data_pending() {
      return false;
    }

    let sample = match self.source.read_sample() {
      Ok(sample) => sample,
      Err(_) => {
        #[cfg(feature = "defmt")]
        defmt::warn!("FT5436: touch read failed, treating frame as empty");
        TouchSample::empty()
      }
    };
    self.finish_read();
    self.ingest(sample)
  }

  /// Like [`TouchTracker::sample`] but hands bus errors back to the caller.
  ///
  /// On error nothing is updated and a recorded edge stays pending, so the next
  /// call retries the read.
  pub fn try_sample(&mut self) -> Result<bool, S::Error> {
    if !self.data_pending() {
      return Ok(false);
    }

    let sample = self.source.read_sample()?;
    self.finish_read();
    Ok(self.ingest(sample))
  }
}

fn moved(last: i16, new: i16, margin: u32) -> bool {
  (i32::from(last) - i32::from(new)).unsigned_abs() > margin
}

#[cfg(test)]
mod tests {
  use super::*;

  const SCRIPT_LEN: usize = 8;

  /// Replays a fixed list of frames, then repeats the last one.
  struct Script {
    frames: [Result<TouchSample, ()>; SCRIPT_LEN],
    len: usize,
    reads: usize,
  }

  impl Script {
    fn new(frames: &[Result<TouchSample, ()>]) -> Self {
      let mut script = Self { frames: [Ok(TouchSample::empty()); SCRIPT_LEN], len: frames.len(), reads: 0 };
      script.frames[..frames.len()].copy_from_slice(frames);
      script
    }
  }

  impl PointSource for Script {
    type Error = ();

    fn read_sample(&mut self) -> Result<TouchSample, ()> {
      let frame = self.frames[self.reads.min(self.len - 1)];
      self.reads += 1;
      frame
    }
  }

  fn touches(points: &[(i16, i16)]) -> TouchSample {
    let mut slots = [TouchPoint::absent(); MAX_TOUCH_POINTS];
    for (slot, &(x, y)) in slots.iter_mut().zip(points) {
      *slot = TouchPoint::new(x, y);
    }
    TouchSample::from_parts(slots, points.len() as u8)
  }

  fn one(x: i16, y: i16) -> Result<TouchSample, ()> {
    Ok(touches(&[(x, y)]))
  }

  #[test]
  fn first_sample_never_reports_change() {
    let mut tracker = TouchTracker::new(Script::new(&[Ok(touches(&[(1, 1), (300, 400), (80, 90)]))]));
    assert_eq!(tracker.state(), TrackerState::Uninitialized);
    assert!(!tracker.sample());
    assert_eq!(tracker.state(), TrackerState::Tracking);
    assert_eq!(tracker.point_count(), 3);
  }

  #[test]
  fn identical_frames_are_unchanged() {
    let frame = Ok(touches(&[(10, 20), (30, 40)]));
    let mut tracker = TouchTracker::new(Script::new(&[frame, frame, frame]));
    tracker.sample();
    assert!(!tracker.sample());
    assert!(!tracker.sample());
  }

  #[test]
  fn margin_boundary_is_exclusive() {
    let mut tracker = TouchTracker::new(Script::new(&[one(100, 100), one(105, 100), one(105, 111)]));
    tracker.sample();
    assert!(!tracker.sample(), "delta equal to margin is jitter");
    assert!(tracker.sample(), "delta of margin + 1 is movement");
  }

  #[test]
  fn jitter_walkthrough() {
    let mut tracker =
      TouchTracker::new(Script::new(&[one(100, 100), one(103, 100), one(110, 100), Ok(TouchSample::empty())]));

    assert!(!tracker.sample());
    assert!(!tracker.sample());
    assert!(tracker.sample());
    assert_eq!(tracker.point_x(1), 110);
    assert_eq!(tracker.point_y(1), 100);

    assert!(tracker.sample());
    assert_eq!(tracker.point_count(), 0);
    assert_eq!(tracker.consume_release_count(), 1);
  }

  #[test]
  fn slow_drift_does_not_accumulate() {
    let frames = [one(100, 100), one(104, 100), one(108, 100), one(112, 100), one(116, 100)];
    let mut tracker = TouchTracker::new(Script::new(&frames));
    for _ in 0..frames.len() {
      assert!(!tracker.sample());
    }
    assert_eq!(tracker.point_x(1), 116);
  }

  #[test]
  fn release_count_is_consumed_once() {
    let mut tracker =
      TouchTracker::new(Script::new(&[Ok(touches(&[(1, 1), (2, 2), (3, 3)])), Ok(touches(&[(1, 1)]))]));
    tracker.sample();
    assert_eq!(tracker.consume_release_count(), 0);

    assert!(tracker.sample());
    assert_eq!(tracker.consume_release_count(), 2);
    assert_eq!(tracker.consume_release_count(), 0);
  }

  #[test]
  fn release_count_reflects_latest_frame_only() {
    let mut tracker = TouchTracker::new(Script::new(&[
      Ok(touches(&[(1, 1), (2, 2)])),
      Ok(touches(&[(1, 1)])),
      Ok(touches(&[(1, 1), (5, 5)])),
    ]));
    tracker.sample();
    tracker.sample();
    tracker.sample();
    assert_eq!(tracker.consume_release_count(), 0);
  }

  #[test]
  fn coordinate_queries_are_one_based() {
    let mut tracker = TouchTracker::new(Script::new(&[Ok(touches(&[(11, 12), (21, 22)]))]));
    tracker.sample();

    assert_eq!(tracker.point_coordinate(0, Axis::X), -1);
    assert_eq!(tracker.point_coordinate(1, Axis::X), 11);
    assert_eq!(tracker.point_coordinate(2, Axis::Y), 22);
    assert_eq!(tracker.point_coordinate(3, Axis::X), -1);
    assert_eq!(tracker.point_coordinate(6, Axis::X), -1);
    assert_eq!(tracker.points(), &[TouchPoint::new(11, 12), TouchPoint::new(21, 22)]);
  }

  #[test]
  fn stale_slots_past_count_are_hidden() {
    let mut slots = [TouchPoint::new(7, 7); MAX_TOUCH_POINTS];
    slots[0] = TouchPoint::new(1, 2);
    let mut tracker = TouchTracker::new(Script::new(&[Ok(TouchSample::from_parts(slots, 1))]));
    tracker.sample();
    assert_eq!(tracker.point_x(2), -1);
    assert_eq!(tracker.points().len(), 1);
  }

  #[test]
  fn max_points_caps_reported_count() {
    let five = Ok(touches(&[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]));
    let mut tracker = TouchTracker::new(Script::new(&[five]));

    assert_eq!(tracker.set_max_points(7), 5);
    assert_eq!(tracker.max_points(), 5);
    assert_eq!(tracker.set_max_points(3), 3);

    tracker.sample();
    assert_eq!(tracker.point_count(), 3);
    assert_eq!(tracker.point_x(4), -1);
  }

  #[test]
  fn lowering_cap_trims_current_frame() {
    let five = Ok(touches(&[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]));
    let mut tracker = TouchTracker::new(Script::new(&[five]));
    tracker.sample();
    assert_eq!(tracker.point_count(), 5);

    assert_eq!(tracker.set_max_points(2), 2);
    assert_eq!(tracker.point_count(), 2);
    assert!(tracker.point_count() <= tracker.max_points());
    assert_eq!(tracker.point_x(3), -1);
    assert_eq!(tracker.points(), &[TouchPoint::new(1, 1), TouchPoint::new(2, 2)]);

    assert_eq!(tracker.set_max_points(5), 5);
    assert_eq!(tracker.point_count(), 2);
  }

  #[test]
  fn point_count_never_exceeds_cap() {
    let frames = [
      Ok(touches(&[(1, 1)])),
      Ok(touches(&[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)])),
      Ok(touches(&[(1, 1), (2, 2), (3, 3)])),
      Ok(TouchSample::empty()),
    ];
    let mut tracker = TouchTracker::new(Script::new(&frames)).with_config(&Config::new().with_max_points(2));
    for _ in 0..frames.len() {
      tracker.sample();
      assert!(tracker.point_count() <= tracker.max_points());
    }
  }

  #[test]
  fn jitter_margin_setter_is_unbounded() {
    let mut tracker = TouchTracker::new(Script::new(&[one(0, 0), one(900, 0)]));
    assert_eq!(tracker.jitter_margin(), 5);
    assert_eq!(tracker.set_jitter_margin(1000), 1000);
    tracker.sample();
    assert!(!tracker.sample());
  }

  #[test]
  fn growing_count_reports_change() {
    let mut tracker = TouchTracker::new(Script::new(&[one(50, 50), Ok(touches(&[(50, 50), (200, 200)]))]));
    tracker.sample();
    assert!(tracker.sample());
    assert_eq!(tracker.point_count(), 2);
  }

  #[test]
  fn zero_margin_flags_any_movement() {
    let mut tracker = TouchTracker::new(Script::new(&[one(10, 10), one(10, 11)]));
    tracker.set_jitter_margin(0);
    tracker.sample();
    assert!(tracker.sample());
  }

  #[test]
  fn trigger_gates_bus_reads() {
    let trigger = TouchTrigger::new();
    let mut tracker = TouchTracker::with_trigger(Script::new(&[one(1, 1), one(50, 50)]), &trigger);

    assert!(!tracker.sample());
    assert_eq!(tracker.source().reads, 0);
    assert_eq!(tracker.state(), TrackerState::Uninitialized);

    trigger.on_edge();
    assert!(!tracker.sample());
    assert_eq!(tracker.source().reads, 1);
    assert!(!trigger.is_pending());
    assert!(trigger.is_armed());

    assert!(!tracker.sample());
    assert_eq!(tracker.source().reads, 1);

    trigger.on_edge();
    assert!(tracker.sample());
    assert_eq!(tracker.source().reads, 2);
  }

  #[test]
  fn failed_read_counts_as_empty_frame() {
    let mut tracker = TouchTracker::new(Script::new(&[Ok(touches(&[(1, 1), (2, 2)])), Err(())]));
    tracker.sample();
    assert!(tracker.sample());
    assert_eq!(tracker.point_count(), 0);
    assert_eq!(tracker.consume_release_count(), 2);
  }

  #[test]
  fn try_sample_leaves_state_on_error() {
    let trigger = TouchTrigger::new();
    let mut tracker = TouchTracker::with_trigger(Script::new(&[one(5, 5), Err(()), one(5, 5)]), &trigger);

    trigger.on_edge();
    assert_eq!(tracker.try_sample(), Ok(false));

    trigger.on_edge();
    assert_eq!(tracker.try_sample(), Err(()));
    assert_eq!(tracker.point_count(), 1);
    assert!(trigger.is_pending());

    assert_eq!(tracker.try_sample(), Ok(false));
    assert!(!trigger.is_pending());
  }

  #[test]
  fn ingest_accepts_external_frames() {
    let mut tracker = TouchTracker::new(Script::new(&[]));
    assert!(!tracker.ingest(touches(&[(3, 3)])));
    assert!(tracker.ingest(touches(&[(30, 3)])));
    assert_eq!(tracker.source().reads, 0);
  }
}
