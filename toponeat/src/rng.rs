use rand::rngs::ThreadRng;
use rand::{thread_rng, Rng};

/// A source of uniformly distributed values in `[0, 1)`.
///
/// Mutation draws all of its randomness through this
/// trait, so tests can substitute a scripted source
/// for a real generator.
pub trait RandomSource {
    /// Returns the next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns `true` with probability `chance`.
    fn chance(&mut self, chance: f64) -> bool {
        self.next_f64() < chance
    }
}

/// Simple wrapper for a `T: Rng`,
/// needed for dependency inversion
/// (generic `Rng`s can't be handed to
/// a trait object directly).
///
/// # Examples
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use toponeat::{RandomSource, UniformSource};
///
/// let mut source = UniformSource::new(StdRng::seed_from_u64(7));
/// let x = source.next_f64();
/// assert!((0.0..1.0).contains(&x));
/// ```
#[derive(Clone, Debug)]
pub struct UniformSource<T: Rng>(T);

impl<T> UniformSource<T>
where
    T: Rng,
{
    pub fn new(rng: T) -> UniformSource<T> {
        UniformSource(rng)
    }

    /// Unwraps the inner generator.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl UniformSource<ThreadRng> {
    /// A source backed by the thread-local generator.
    pub fn thread() -> UniformSource<ThreadRng> {
        UniformSource(thread_rng())
    }
}

impl<T> RandomSource for UniformSource<T>
where
    T: Rng,
{
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = UniformSource::new(StdRng::seed_from_u64(42));
        let mut b = UniformSource::new(StdRng::seed_from_u64(42));
        for _ in 0..100 {
            let x = a.next_f64();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x.to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn chance_bounds() {
        let mut source = UniformSource::new(StdRng::seed_from_u64(1));
        assert!((0..1000).all(|_| source.chance(1.0)));
        assert!((0..1000).all(|_| !source.chance(0.0)));
    }

    #[test]
    fn into_inner_keeps_position() {
        let mut source = UniformSource::new(StdRng::seed_from_u64(9));
        let first = source.next_f64();
        let mut inner = source.into_inner();

        let mut fresh = StdRng::seed_from_u64(9);
        assert_eq!(first.to_bits(), fresh.gen::<f64>().to_bits());
        assert_eq!(inner.gen::<f64>().to_bits(), fresh.gen::<f64>().to_bits());
    }
}
