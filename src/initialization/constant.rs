use log::debug;
use ndarray::{ArrayD, IxDyn};
use rand::RngCore;

use super::{Initializer, Result, initializer::check_shape};

/// An initializer that fills the whole tensor with the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f32,
}

impl Constant {
    /// Creates a new `Constant` initializer.
    ///
    /// # Arguments
    /// * `value` - The value every element will take.
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Default for Constant {
    fn default() -> Self {
        Self::new(0.)
    }
}

impl Initializer for Constant {
    fn sample_with(&self, shape: &[usize], _rng: &mut dyn RngCore) -> Result<ArrayD<f32>> {
        check_shape("Constant", shape)?;
        debug!("filling {shape:?} with {}", self.value);

        Ok(ArrayD::from_elem(IxDyn(shape), self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InitErr;

    #[test]
    fn fills() {
        let sample = Constant::new(1.).sample(&[10, 20]).unwrap();

        assert_eq!(sample.shape(), [10, 20]);
        assert!(sample.iter().all(|&x| x == 1.));
    }

    #[test]
    fn default_is_zero() {
        let sample = Constant::default().sample(&[3, 4, 5]).unwrap();
        assert!(sample.iter().all(|&x| x == 0.));
    }

    #[test]
    fn empty_shape() {
        let err = Constant::new(1.).sample(&[]).unwrap_err();
        assert!(matches!(err, InitErr::EmptyShape { .. }));
    }
}
