mod constant;
mod error;
mod initializer;
mod orthogonal;
mod random;
mod scaling;
mod sparse;

pub use constant::Constant;
pub use error::{InitErr, Rank, Result};
pub use initializer::Initializer;
pub use orthogonal::Orthogonal;
pub use random::{Normal, Uniform};
pub use scaling::{
    Fans, FromStd, Glorot, GlorotNormal, GlorotUniform, He, HeNormal, HeUniform, Layout,
    RELU_GAIN,
};
pub use sparse::Sparse;
