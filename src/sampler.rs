use log::debug;
use ndarray::ArrayD;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    initialization::{Initializer, Result},
    specs::SamplerSpec,
};

/// Owns an initializer together with the random number generator it draws from.
///
/// Consecutive samples consume the same random stream, so a seeded `Sampler` always
/// produces the same sequence of tensors.
pub struct Sampler {
    initializer: Box<dyn Initializer>,
    rng: StdRng,
}

impl Sampler {
    /// Creates a new `Sampler`.
    ///
    /// # Arguments
    /// * `initializer` - The initializer to sample from.
    /// * `rng` - The random number generator to draw from.
    pub fn new(initializer: Box<dyn Initializer>, rng: StdRng) -> Self {
        Self { initializer, rng }
    }

    /// Builds a new `Sampler` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification of the sampler.
    ///
    /// # Returns
    /// A `Sampler` seeded from `spec.seed`, or from the os if there's none.
    pub fn from_spec(spec: SamplerSpec) -> Self {
        let rng = match spec.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        debug!("building sampler for {:?}", spec.init);
        Self::new(spec.init.build(), rng)
    }

    /// Samples a tensor of the given shape.
    ///
    /// # Arguments
    /// * `shape` - The shape of the tensor to generate.
    ///
    /// # Returns
    /// A tensor of exactly `shape` or an error if the initializer doesn't support it.
    pub fn sample(&mut self, shape: &[usize]) -> Result<ArrayD<f32>> {
        self.initializer.sample_with(shape, &mut self.rng)
    }
}
