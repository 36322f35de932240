use crate::TouchSample;

/// Anything that can produce a fresh, decoded touch sample on demand.
///
/// The call is synchronous and may block on the bus. Implementations clamp the
/// point count to the hardware limit; the tracker applies its own
/// `max_points` cap on top and performs no further validation.
pub trait PointSource {
  type Error;

  fn read_sample(&mut self) -> Result<TouchSample, Self::Error>;
}

impl<T: PointSource + ?Sized> PointSource for &mut T {
  type Error = T::Error;

  fn read_sample(&mut self) -> Result<TouchSample, Self::Error> {
    T::read_sample(self)
  }
}
