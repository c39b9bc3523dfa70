use log::debug;
use ndarray::{ArrayD, IxDyn};
use ndarray_rand::RandomExt;
use rand::RngCore;
use rand_distr::{Normal as NormalDist, Uniform as UniformDist};

use super::{Initializer, Result, initializer::check_shape};

/// Samples i.i.d. values from a gaussian distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    std: f32,
    mean: f32,
}

impl Normal {
    /// Creates a new `Normal` initializer.
    ///
    /// # Arguments
    /// * `std` - The standard deviation of the distribution.
    /// * `mean` - The mean of the distribution.
    pub fn new(std: f32, mean: f32) -> Self {
        Self { std, mean }
    }

    pub fn std(&self) -> f32 {
        self.std
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }
}

impl Default for Normal {
    fn default() -> Self {
        Self::new(0.01, 0.)
    }
}

impl Initializer for Normal {
    fn sample_with(&self, shape: &[usize], rng: &mut dyn RngCore) -> Result<ArrayD<f32>> {
        check_shape("Normal", shape)?;
        let distribution = NormalDist::new(self.mean, self.std)?;
        debug!("sampling {shape:?} from N({}, {})", self.mean, self.std);

        Ok(ArrayD::random_using(IxDyn(shape), distribution, rng))
    }
}

/// Samples i.i.d. values from a uniform distribution over an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    low: f32,
    high: f32,
}

impl Uniform {
    /// Creates a new `Uniform` initializer over `[-range, range]`.
    ///
    /// # Arguments
    /// * `range` - The half width of the symmetric range.
    pub fn new(range: f32) -> Self {
        Self::bounds(-range, range)
    }

    /// Creates a new `Uniform` initializer over `[low, high]`.
    ///
    /// # Arguments
    /// * `low` - The inclusive lower limit.
    /// * `high` - The inclusive upper limit.
    pub fn bounds(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Creates a new `Uniform` initializer whose samples have the given mean and
    /// standard deviation.
    ///
    /// A uniform distribution of width `w` has a standard deviation of `w / sqrt(12)`,
    /// so the range is `mean ± sqrt(3) * std`.
    ///
    /// # Arguments
    /// * `std` - The standard deviation of the samples.
    /// * `mean` - The mean of the samples.
    pub fn with_std(std: f32, mean: f32) -> Self {
        let half_width = 3f32.sqrt() * std;
        Self::bounds(mean - half_width, mean + half_width)
    }

    pub fn low(&self) -> f32 {
        self.low
    }

    pub fn high(&self) -> f32 {
        self.high
    }
}

impl Default for Uniform {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl Initializer for Uniform {
    fn sample_with(&self, shape: &[usize], rng: &mut dyn RngCore) -> Result<ArrayD<f32>> {
        check_shape("Uniform", shape)?;
        let distribution = UniformDist::new_inclusive(self.low, self.high)?;
        debug!("sampling {shape:?} from U[{}, {}]", self.low, self.high);

        Ok(ArrayD::random_using(IxDyn(shape), distribution, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InitErr;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn symmetric_range() {
        let uniform = Uniform::new(0.5);
        assert_eq!((uniform.low(), uniform.high()), (-0.5, 0.5));
    }

    #[test]
    fn std_range() {
        let uniform = Uniform::with_std(1., 5.);
        let half_width = 3f32.sqrt();

        assert_eq!(uniform.low(), 5. - half_width);
        assert_eq!(uniform.high(), 5. + half_width);
    }

    #[test]
    fn seeded_samples_repeat() {
        let normal = Normal::default();

        let a = normal.sample_with(&[4, 5], &mut StdRng::seed_from_u64(42)).unwrap();
        let b = normal.sample_with(&[4, 5], &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_range() {
        let sample = Uniform::bounds(2., 2.).sample(&[3, 3]).unwrap();
        assert!(sample.iter().all(|&x| x == 2.));
    }

    #[test]
    fn inverted_range() {
        let err = Uniform::bounds(1., -1.).sample(&[3, 3]).unwrap_err();
        assert!(matches!(err, InitErr::Distribution(_)));
    }

    #[test]
    fn non_finite_std() {
        let err = Normal::new(f32::NAN, 0.).sample(&[3, 3]).unwrap_err();
        assert!(matches!(err, InitErr::Distribution(_)));
    }
}
