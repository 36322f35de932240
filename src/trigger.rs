//! Edge handshake between the INT line and the tracker.
//!
//! The controller pulls INT low when a new touch frame is ready. A
//! [`TouchTrigger`] records that edge in a single flag so the application loop
//! only talks to the bus when there is something to read. It is meant to live
//! in a `static` so an interrupt handler can reach it:
//!
//! ```no_run
//! use ft5436::TouchTrigger;
//!
//! static TOUCH_INT: TouchTrigger = TouchTrigger::new();
//!
//! // In the GPIO interrupt handler:
//! fn on_touch_irq() {
//!   TOUCH_INT.on_edge();
//! }
//! ```
//!
//! Once an edge is recorded the trigger disarms itself, and the tracker re-arms
//! it after the next read. Edges arriving in between are dropped, so at most
//! one frame can be missed per cycle; the next edge or poll picks the state up
//! again.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal_async::digital::Wait;

/// Single-bit "data pending" flag shared with interrupt context.
#[derive(Debug)]
pub struct TouchTrigger {
  pending: AtomicBool,
  armed: AtomicBool,
}

impl TouchTrigger {
  /// A trigger that is armed and has nothing pending.
  pub const fn new() -> Self {
    Self { pending: AtomicBool::new(false), armed: AtomicBool::new(true) }
  }

  /// Record an edge. Safe to call from an interrupt handler.
  ///
  /// Does nothing while disarmed.
  pub fn on_edge(&self) {
    if self.armed.swap(false, Ordering::AcqRel) {
      self.pending.store(true, Ordering::Release);
    }
  }

  /// `true` if an edge was recorded and not yet serviced.
  pub fn is_pending(&self) -> bool {
    self.pending.load(Ordering::Acquire)
  }

  pub fn is_armed(&self) -> bool {
    self.armed.load(Ordering::Acquire)
  }

  /// Allow the next edge to be recorded.
  pub fn arm(&self) {
    self.armed.store(true, Ordering::Release);
  }

  /// Ignore edges until [`TouchTrigger::arm`] is called.
  pub fn disarm(&self) {
    self.armed.store(false, Ordering::Release);
  }

  /// Clear the pending flag and re-arm. Called once the triggering frame has
  /// been read.
  pub(crate) fn rearm(&self) {
    self.pending.store(false, Ordering::Release);
    self.arm();
  }

  /// Await a falling edge on the INT pin and record it.
  ///
  /// For executor-based firmware this replaces a hand-written interrupt
  /// handler: run it in a loop from its own task.
  pub async fn wait_for_edge<P: Wait>(&self, int: &mut P) -> Result<(), P::Error> {
    int.wait_for_falling_edge().await?;
    self.on_edge();
    Ok(())
  }
}

impl Default for TouchTrigger {
  fn default() -> Self {
    Self::new()
  }
}
