use log::debug;
use ndarray::{Array2, ArrayD, Axis};
use rand::{RngCore, seq::index};
use rand_distr::{Distribution, Normal as NormalDist};

use super::{InitErr, Initializer, Rank, Result, initializer::check_rank};

/// Initializes a `(n_inputs, n_outputs)` matrix where only a fraction of the weights
/// reaching each output are nonzero.
///
/// For every column, `floor(sparsity * n_inputs)` distinct rows are drawn at random
/// and filled with gaussian values, every other weight stays at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparse {
    sparsity: f32,
    std: f32,
}

impl Sparse {
    /// Creates a new `Sparse` initializer.
    ///
    /// # Arguments
    /// * `sparsity` - The fraction of nonzero weights per column, in `[0, 1]`.
    /// * `std` - The standard deviation of the nonzero weights.
    pub fn new(sparsity: f32, std: f32) -> Self {
        Self { sparsity, std }
    }
}

impl Default for Sparse {
    fn default() -> Self {
        Self::new(0.1, 0.01)
    }
}

impl Initializer for Sparse {
    fn sample_with(&self, shape: &[usize], rng: &mut dyn RngCore) -> Result<ArrayD<f32>> {
        check_rank("Sparse", shape, Rank::Exactly(2))?;

        if !(0. ..=1.).contains(&self.sparsity) {
            return Err(InitErr::InvalidParam {
                initializer: "Sparse",
                param: "sparsity",
                value: self.sparsity,
            });
        }

        let (n_inputs, n_outputs) = (shape[0], shape[1]);
        let nonzero = (self.sparsity * n_inputs as f32) as usize;
        let distribution = NormalDist::new(0., self.std)?;
        debug!("sampling {shape:?} with {nonzero} nonzero weights per column");

        let mut weights = Array2::zeros((n_inputs, n_outputs));
        for mut column in weights.axis_iter_mut(Axis(1)) {
            for row in index::sample(rng, n_inputs, nonzero) {
                column[row] = distribution.sample(rng);
            }
        }

        Ok(weights.into_dyn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn nonzero_per_column() {
        let mut rng = StdRng::seed_from_u64(42);
        let sample = Sparse::new(0.3, 1.).sample_with(&[10, 20], &mut rng).unwrap();

        for column in sample.axis_iter(Axis(1)) {
            assert_eq!(column.iter().filter(|&&x| x != 0.).count(), 3);
        }
    }

    #[test]
    fn dense_when_full() {
        let sample = Sparse::new(1., 1.).sample(&[8, 4]).unwrap();
        assert!(sample.iter().all(|&x| x != 0.));
    }

    #[test]
    fn only_2d() {
        for shape in [&[10][..], &[10, 20, 30]] {
            let err = Sparse::default().sample(shape).unwrap_err();
            assert!(matches!(err, InitErr::RankMismatch { .. }));
        }
    }

    #[test]
    fn sparsity_out_of_range() {
        let err = Sparse::new(1.5, 0.01).sample(&[10, 20]).unwrap_err();
        assert!(matches!(err, InitErr::InvalidParam { param: "sparsity", .. }));
    }
}
