use rand::Rng;

/// Uniform choice among `options` alternatives, the only randomness the carver needs.
pub trait RandomSource {
    fn pick(&mut self, options: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn pick(&mut self, options: usize) -> usize {
        debug_assert!(options > 0, "cannot pick from zero options");
        self.random_range(0..options)
    }
}
