use ndarray::ArrayD;
use rand::RngCore;

use super::{InitErr, Rank, Result};

/// An `Initializer` generates the initial values of a parameter tensor.
///
/// Implementors hold their configuration only, so the same instance can be
/// sampled any number of times with independent results.
pub trait Initializer {
    /// Samples a tensor of the given shape using `rng` as the entropy source.
    ///
    /// # Arguments
    /// * `shape` - The shape of the tensor to generate.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// A tensor of exactly `shape` or an error if the shape isn't supported.
    fn sample_with(&self, shape: &[usize], rng: &mut dyn RngCore) -> Result<ArrayD<f32>>;

    /// Samples a tensor of the given shape using the thread local generator.
    ///
    /// # Arguments
    /// * `shape` - The shape of the tensor to generate.
    ///
    /// # Returns
    /// A tensor of exactly `shape` or an error if the shape isn't supported.
    fn sample(&self, shape: &[usize]) -> Result<ArrayD<f32>> {
        self.sample_with(shape, &mut rand::rng())
    }
}

impl<I: Initializer + ?Sized> Initializer for Box<I> {
    fn sample_with(&self, shape: &[usize], rng: &mut dyn RngCore) -> Result<ArrayD<f32>> {
        (**self).sample_with(shape, rng)
    }
}

/// Rejects empty shapes.
pub(crate) fn check_shape(initializer: &'static str, shape: &[usize]) -> Result<()> {
    if shape.is_empty() {
        return Err(InitErr::EmptyShape { initializer });
    }

    Ok(())
}

/// Rejects shapes whose dimensionality `expected` doesn't accept.
pub(crate) fn check_rank(
    initializer: &'static str,
    shape: &[usize],
    expected: Rank,
) -> Result<()> {
    check_shape(initializer, shape)?;

    if !expected.accepts(shape.len()) {
        return Err(InitErr::RankMismatch {
            initializer,
            got: shape.len(),
            expected,
        });
    }

    Ok(())
}
