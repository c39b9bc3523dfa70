use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;
use rand_distr::{NormalError, uniform::Error as UniformError};

/// The result type shared by every initializer.
pub type Result<T> = std::result::Result<T, InitErr>;

/// The rank an initializer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Exactly(usize),
    AtLeast(usize),
}

impl Rank {
    /// Checks whether a shape of `rank` dimensions is accepted.
    pub fn accepts(&self, rank: usize) -> bool {
        match *self {
            Rank::Exactly(n) => rank == n,
            Rank::AtLeast(n) => rank >= n,
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Exactly(n) => write!(f, "exactly {n}"),
            Rank::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Error returned when sampling fails.
///
/// Parameters are validated lazily, so every variant surfaces from `sample`,
/// never from a constructor.
#[derive(Debug)]
pub enum InitErr {
    EmptyShape {
        initializer: &'static str,
    },
    RankMismatch {
        initializer: &'static str,
        got: usize,
        expected: Rank,
    },
    InvalidParam {
        initializer: &'static str,
        param: &'static str,
        value: f32,
    },
    Distribution(String),
    Shape(ShapeError),
}

impl Display for InitErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitErr::EmptyShape { initializer } => {
                write!(f, "{initializer} can't sample an empty shape")
            }
            InitErr::RankMismatch {
                initializer,
                got,
                expected,
            } => write!(
                f,
                "{initializer} only works with shapes of {expected} dimensions, got {got}"
            ),
            InitErr::InvalidParam {
                initializer,
                param,
                value,
            } => write!(f, "invalid {param} for {initializer}: {value}"),
            InitErr::Distribution(msg) => write!(f, "invalid distribution: {msg}"),
            InitErr::Shape(e) => write!(f, "shape error: {e}"),
        }
    }
}

impl Error for InitErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InitErr::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NormalError> for InitErr {
    fn from(value: NormalError) -> Self {
        Self::Distribution(value.to_string())
    }
}

impl From<UniformError> for InitErr {
    fn from(value: UniformError) -> Self {
        Self::Distribution(value.to_string())
    }
}

impl From<ShapeError> for InitErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_accepts() {
        assert!(Rank::Exactly(4).accepts(4));
        assert!(!Rank::Exactly(4).accepts(3));
        assert!(Rank::AtLeast(2).accepts(5));
        assert!(!Rank::AtLeast(2).accepts(1));
    }

    #[test]
    fn rank_mismatch_message() {
        let err = InitErr::RankMismatch {
            initializer: "Orthogonal",
            got: 1,
            expected: Rank::AtLeast(2),
        };

        assert_eq!(
            err.to_string(),
            "Orthogonal only works with shapes of at least 2 dimensions, got 1"
        );
    }
}
