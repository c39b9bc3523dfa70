//! Variance scaling initializers.
//!
//! Both schemes derive a standard deviation from the fan sizes of the requested shape
//! and then delegate the actual sampling to a [`Normal`] or [`Uniform`] initializer
//! built from it.

use std::{f32::consts::SQRT_2, marker::PhantomData};

use log::trace;
use ndarray::ArrayD;
use rand::RngCore;

use super::{Initializer, Normal, Rank, Result, Uniform, initializer::check_rank};

/// The recommended gain for layers followed by a rectifier.
pub const RELU_GAIN: f32 = SQRT_2;

/// An initializer fully described by a zero mean and a standard deviation.
pub trait FromStd: Initializer {
    fn from_std(std: f32) -> Self;
}

impl FromStd for Normal {
    fn from_std(std: f32) -> Self {
        Normal::new(std, 0.)
    }
}

impl FromStd for Uniform {
    fn from_std(std: f32) -> Self {
        Uniform::with_std(std, 0.)
    }
}

/// How the dimensions of a weight tensor are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// `(n_inputs, n_outputs)` for dense layers, `(out, in, dim0, dim1, ...)` for
    /// convolutions.
    #[default]
    Standard,
    /// `(channels, dim0, dim1, batch)`, only defined for 4 dimensional tensors.
    C01b,
}

/// The amount of input and output connections of a weight tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fans {
    pub fan_in: usize,
    pub fan_out: usize,
}

impl Fans {
    /// Computes the fans of `shape`.
    ///
    /// Every dimension after the channel dimensions is part of the receptive field
    /// and multiplies both fans.
    ///
    /// # Arguments
    /// * `initializer` - The name reported if the shape is rejected.
    /// * `shape` - The shape of the weight tensor.
    /// * `layout` - How the dimensions of `shape` are ordered.
    ///
    /// # Returns
    /// The fans or a `RankMismatch` error if `layout` doesn't admit the shape.
    pub fn new(initializer: &'static str, shape: &[usize], layout: Layout) -> Result<Self> {
        match layout {
            Layout::Standard => {
                check_rank(initializer, shape, Rank::AtLeast(2))?;

                if shape.len() == 2 {
                    return Ok(Self {
                        fan_in: shape[0],
                        fan_out: shape[1],
                    });
                }

                let receptive_field: usize = shape[2..].iter().product();
                Ok(Self {
                    fan_in: shape[1] * receptive_field,
                    fan_out: shape[0] * receptive_field,
                })
            }
            Layout::C01b => {
                check_rank(initializer, shape, Rank::Exactly(4))?;

                let receptive_field = shape[1] * shape[2];
                Ok(Self {
                    fan_in: shape[0] * receptive_field,
                    fan_out: shape[3] * receptive_field,
                })
            }
        }
    }
}

/// Samples with `std = gain * sqrt(2 / (fan_in + fan_out))`.
///
/// Also known as Xavier initialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glorot<I> {
    gain: f32,
    layout: Layout,
    initializer: PhantomData<fn() -> I>,
}

/// Samples with `std = gain * sqrt(1 / fan_in)`.
///
/// Also known as Kaiming initialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct He<I> {
    gain: f32,
    layout: Layout,
    initializer: PhantomData<fn() -> I>,
}

pub type GlorotNormal = Glorot<Normal>;
pub type GlorotUniform = Glorot<Uniform>;
pub type HeNormal = He<Normal>;
pub type HeUniform = He<Uniform>;

impl<I: FromStd> Glorot<I> {
    /// Creates a new `Glorot` initializer for the standard layout.
    ///
    /// # Arguments
    /// * `gain` - Scaling factor applied to the derived standard deviation.
    pub fn new(gain: f32) -> Self {
        Self::with_layout(gain, Layout::Standard)
    }

    /// Creates a new `Glorot` initializer that only accepts `c01b` shapes.
    ///
    /// # Arguments
    /// * `gain` - Scaling factor applied to the derived standard deviation.
    pub fn c01b(gain: f32) -> Self {
        Self::with_layout(gain, Layout::C01b)
    }

    pub fn with_layout(gain: f32, layout: Layout) -> Self {
        Self {
            gain,
            layout,
            initializer: PhantomData,
        }
    }

    /// Resolves the standard deviation used for `shape`.
    pub fn std(&self, shape: &[usize]) -> Result<f32> {
        let name = match self.layout {
            Layout::Standard => "Glorot",
            Layout::C01b => "Glorot c01b",
        };

        let fans = Fans::new(name, shape, self.layout)?;
        let std = self.gain as f64 * (2. / (fans.fan_in + fans.fan_out) as f64).sqrt();
        trace!(fan_in = fans.fan_in, fan_out = fans.fan_out, std = std; "glorot scaling");

        Ok(std as f32)
    }
}

impl<I: FromStd> Default for Glorot<I> {
    fn default() -> Self {
        Self::new(1.)
    }
}

impl<I: FromStd> Initializer for Glorot<I> {
    fn sample_with(&self, shape: &[usize], rng: &mut dyn RngCore) -> Result<ArrayD<f32>> {
        I::from_std(self.std(shape)?).sample_with(shape, rng)
    }
}

impl<I: FromStd> He<I> {
    /// Creates a new `He` initializer for the standard layout.
    ///
    /// # Arguments
    /// * `gain` - Scaling factor applied to the derived standard deviation.
    pub fn new(gain: f32) -> Self {
        Self::with_layout(gain, Layout::Standard)
    }

    /// Creates a new `He` initializer that only accepts `c01b` shapes.
    ///
    /// # Arguments
    /// * `gain` - Scaling factor applied to the derived standard deviation.
    pub fn c01b(gain: f32) -> Self {
        Self::with_layout(gain, Layout::C01b)
    }

    pub fn with_layout(gain: f32, layout: Layout) -> Self {
        Self {
            gain,
            layout,
            initializer: PhantomData,
        }
    }

    /// Resolves the standard deviation used for `shape`.
    pub fn std(&self, shape: &[usize]) -> Result<f32> {
        let name = match self.layout {
            Layout::Standard => "He",
            Layout::C01b => "He c01b",
        };

        let fans = Fans::new(name, shape, self.layout)?;
        let std = self.gain as f64 * (1. / fans.fan_in as f64).sqrt();
        trace!(fan_in = fans.fan_in, std = std; "he scaling");

        Ok(std as f32)
    }
}

impl<I: FromStd> Default for He<I> {
    fn default() -> Self {
        Self::new(1.)
    }
}

impl<I: FromStd> Initializer for He<I> {
    fn sample_with(&self, shape: &[usize], rng: &mut dyn RngCore) -> Result<ArrayD<f32>> {
        I::from_std(self.std(shape)?).sample_with(shape, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InitErr;

    #[test]
    fn dense_fans() {
        let fans = Fans::new("test", &[150, 450], Layout::Standard).unwrap();
        assert_eq!(fans, Fans { fan_in: 150, fan_out: 450 });
    }

    #[test]
    fn conv_fans() {
        let fans = Fans::new("test", &[16, 3, 5, 5], Layout::Standard).unwrap();
        assert_eq!(fans, Fans { fan_in: 75, fan_out: 400 });
    }

    #[test]
    fn c01b_fans() {
        let fans = Fans::new("test", &[3, 5, 5, 16], Layout::C01b).unwrap();
        assert_eq!(fans, Fans { fan_in: 75, fan_out: 400 });
    }

    #[test]
    fn c01b_only_4d() {
        for shape in [&[100][..], &[100, 100], &[100, 100, 100], &[2, 2, 2, 2, 2]] {
            let err = Fans::new("test", shape, Layout::C01b).unwrap_err();
            assert!(matches!(
                err,
                InitErr::RankMismatch { expected: Rank::Exactly(4), .. }
            ));
        }
    }

    #[test]
    fn standard_needs_2d() {
        let err = GlorotNormal::default().sample(&[100]).unwrap_err();
        assert!(matches!(err, InitErr::RankMismatch { got: 1, .. }));
    }

    #[test]
    fn glorot_std() {
        let std = GlorotUniform::default().std(&[150, 450]).unwrap();
        assert!((std - (2f32 / 600.).sqrt()).abs() < 1e-7);

        let std = GlorotNormal::c01b(1.).std(&[25, 2, 2, 25]).unwrap();
        assert!((std - 0.1).abs() < 1e-7);
    }

    #[test]
    fn he_std() {
        let std = HeNormal::new(RELU_GAIN).std(&[16, 3, 5, 5]).unwrap();
        assert!((std - (2f32 / 75.).sqrt()).abs() < 1e-7);

        let std = HeUniform::default().std(&[100, 20]).unwrap();
        assert!((std - 0.1).abs() < 1e-7);

        let std = HeNormal::c01b(1.).std(&[3, 5, 5, 16]).unwrap();
        assert!((std - (1f32 / 75.).sqrt()).abs() < 1e-7);
    }
}
