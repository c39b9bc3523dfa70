use serde::{Deserialize, Serialize};

use crate::initialization::{
    Constant, GlorotNormal, GlorotUniform, HeNormal, HeUniform, Initializer, Normal, Orthogonal,
    RELU_GAIN, Sparse, Uniform,
};

/// A gain named after the nonlinearity it compensates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedGain {
    Linear,
    Relu,
}

/// The specification of a gain, either a plain number or a `NamedGain`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GainSpec {
    Named(NamedGain),
    Value(f32),
}

impl GainSpec {
    /// Resolves the numeric value of this gain.
    pub fn value(self) -> f32 {
        match self {
            GainSpec::Named(NamedGain::Linear) => 1.,
            GainSpec::Named(NamedGain::Relu) => RELU_GAIN,
            GainSpec::Value(gain) => gain,
        }
    }
}

impl Default for GainSpec {
    fn default() -> Self {
        Self::Value(1.)
    }
}

/// The specification of a uniform range, either `r` for `[-r, r]` or `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeSpec {
    Symmetric(f32),
    Bounds(f32, f32),
}

impl Default for RangeSpec {
    fn default() -> Self {
        Self::Symmetric(0.01)
    }
}

fn default_std() -> f32 {
    0.01
}

fn default_sparsity() -> f32 {
    0.1
}

/// The specification for the `Initializer` trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitSpec {
    Constant {
        #[serde(default)]
        value: f32,
    },
    Normal {
        #[serde(default = "default_std")]
        std: f32,
        #[serde(default)]
        mean: f32,
    },
    Uniform {
        #[serde(default)]
        range: RangeSpec,
        #[serde(default)]
        std: Option<f32>,
        #[serde(default)]
        mean: f32,
    },
    Sparse {
        #[serde(default = "default_sparsity")]
        sparsity: f32,
        #[serde(default = "default_std")]
        std: f32,
    },
    Orthogonal {
        #[serde(default)]
        gain: GainSpec,
    },
    GlorotNormal {
        #[serde(default)]
        gain: GainSpec,
        #[serde(default)]
        c01b: bool,
    },
    GlorotUniform {
        #[serde(default)]
        gain: GainSpec,
        #[serde(default)]
        c01b: bool,
    },
    HeNormal {
        #[serde(default)]
        gain: GainSpec,
        #[serde(default)]
        c01b: bool,
    },
    HeUniform {
        #[serde(default)]
        gain: GainSpec,
        #[serde(default)]
        c01b: bool,
    },
}

impl InitSpec {
    /// Builds the initializer this specification describes.
    ///
    /// Parameters are only checked against the requested shape when sampling, so
    /// building never fails.
    ///
    /// # Returns
    /// A boxed `Initializer`.
    pub fn build(&self) -> Box<dyn Initializer> {
        match *self {
            InitSpec::Constant { value } => Box::new(Constant::new(value)),
            InitSpec::Normal { std, mean } => Box::new(Normal::new(std, mean)),
            InitSpec::Uniform {
                std: Some(std),
                mean,
                ..
            } => Box::new(Uniform::with_std(std, mean)),
            InitSpec::Uniform { range, .. } => match range {
                RangeSpec::Symmetric(range) => Box::new(Uniform::new(range)),
                RangeSpec::Bounds(low, high) => Box::new(Uniform::bounds(low, high)),
            },
            InitSpec::Sparse { sparsity, std } => Box::new(Sparse::new(sparsity, std)),
            InitSpec::Orthogonal { gain } => Box::new(Orthogonal::new(gain.value())),
            InitSpec::GlorotNormal { gain, c01b: false } => {
                Box::new(GlorotNormal::new(gain.value()))
            }
            InitSpec::GlorotNormal { gain, c01b: true } => {
                Box::new(GlorotNormal::c01b(gain.value()))
            }
            InitSpec::GlorotUniform { gain, c01b: false } => {
                Box::new(GlorotUniform::new(gain.value()))
            }
            InitSpec::GlorotUniform { gain, c01b: true } => {
                Box::new(GlorotUniform::c01b(gain.value()))
            }
            InitSpec::HeNormal { gain, c01b: false } => Box::new(HeNormal::new(gain.value())),
            InitSpec::HeNormal { gain, c01b: true } => Box::new(HeNormal::c01b(gain.value())),
            InitSpec::HeUniform { gain, c01b: false } => Box::new(HeUniform::new(gain.value())),
            InitSpec::HeUniform { gain, c01b: true } => Box::new(HeUniform::c01b(gain.value())),
        }
    }
}

/// The specification for a `Sampler`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerSpec {
    pub init: InitSpec,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_gain() {
        let gain: GainSpec = serde_json::from_str(r#""relu""#).unwrap();
        assert_eq!(gain.value(), RELU_GAIN);

        let gain: GainSpec = serde_json::from_str("2.5").unwrap();
        assert_eq!(gain.value(), 2.5);
    }

    #[test]
    fn defaults() {
        let spec: InitSpec = serde_json::from_str(r#"{"normal": {}}"#).unwrap();
        assert_eq!(spec, InitSpec::Normal { std: 0.01, mean: 0. });

        let spec: InitSpec = serde_json::from_str(r#"{"sparse": {}}"#).unwrap();
        assert_eq!(spec, InitSpec::Sparse { sparsity: 0.1, std: 0.01 });

        let spec: InitSpec = serde_json::from_str(r#"{"glorot_uniform": {}}"#).unwrap();
        assert_eq!(
            spec,
            InitSpec::GlorotUniform {
                gain: GainSpec::Value(1.),
                c01b: false
            }
        );
    }

    #[test]
    fn uniform_range() {
        let spec: InitSpec = serde_json::from_str(r#"{"uniform": {"range": [0.0, 1.0]}}"#).unwrap();
        assert_eq!(
            spec,
            InitSpec::Uniform {
                range: RangeSpec::Bounds(0., 1.),
                std: None,
                mean: 0.
            }
        );
    }

    #[test]
    fn uniform_std_wins_over_range() {
        let spec = InitSpec::Uniform {
            range: RangeSpec::Symmetric(100.),
            std: Some(1.),
            mean: 5.,
        };

        let sample = spec.build().sample(&[50, 50]).unwrap();
        assert!(sample.iter().all(|&x| (5. - 3f32.sqrt()..=5. + 3f32.sqrt()).contains(&x)));
    }

    #[test]
    fn c01b_flag() {
        let spec: InitSpec =
            serde_json::from_str(r#"{"glorot_normal": {"gain": "relu", "c01b": true}}"#).unwrap();

        assert!(spec.build().sample(&[100, 100]).is_err());
        assert!(spec.build().sample(&[4, 3, 3, 8]).is_ok());
    }
}
