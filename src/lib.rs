//! Weight initialization strategies for neural network parameter tensors.
//!
//! Every strategy implements [`Initializer`]: given a shape it returns an
//! [`ndarray::ArrayD`] of exactly that shape drawn from its distribution.
//!
//! ```
//! use weight_init::{GlorotUniform, Initializer};
//!
//! let weights = GlorotUniform::default().sample(&[150, 450]).unwrap();
//! assert_eq!(weights.shape(), [150, 450]);
//! ```

pub mod initialization;
mod sampler;
pub mod specs;

pub use initialization::*;
pub use sampler::Sampler;
pub use specs::{GainSpec, InitSpec, NamedGain, RangeSpec, SamplerSpec};
