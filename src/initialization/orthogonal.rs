use log::{debug, trace};
use ndarray::{Array1, Array2, ArrayD, ArrayViewMut2, Axis, IxDyn, s};
use ndarray_rand::RandomExt;
use rand::RngCore;
use rand_distr::StandardNormal;

use super::{Initializer, Rank, Result, initializer::check_rank};

/// Initializes a tensor with a (scaled) orthogonal matrix.
///
/// The shape is flattened to `(shape[0], prod(shape[1..]))`. The result has
/// orthonormal rows if there are fewer rows than columns and orthonormal columns
/// otherwise, multiplied by `gain`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthogonal {
    gain: f32,
}

impl Orthogonal {
    /// Creates a new `Orthogonal` initializer.
    ///
    /// # Arguments
    /// * `gain` - Scaling factor applied to the orthogonal matrix.
    pub fn new(gain: f32) -> Self {
        Self { gain }
    }
}

impl Default for Orthogonal {
    fn default() -> Self {
        Self::new(1.)
    }
}

impl Initializer for Orthogonal {
    fn sample_with(&self, shape: &[usize], rng: &mut dyn RngCore) -> Result<ArrayD<f32>> {
        check_rank("Orthogonal", shape, Rank::AtLeast(2))?;

        let rows = shape[0];
        let cols: usize = shape[1..].iter().product();
        debug!("sampling {shape:?} as an orthogonal {rows}x{cols} matrix");

        let q = if rows >= cols {
            let a = Array2::<f64>::random_using((rows, cols), StandardNormal, rng);
            orthonormal_columns(a)
        } else {
            let a = Array2::<f64>::random_using((cols, rows), StandardNormal, rng);
            orthonormal_columns(a).reversed_axes()
        };

        let gain = self.gain as f64;
        let values: Vec<f32> = q.iter().map(|&x| (gain * x) as f32).collect();
        Ok(ArrayD::from_shape_vec(IxDyn(shape), values)?)
    }
}

/// Computes the `m x n` orthonormal factor `Q` of the thin QR decomposition of `a`
/// using Householder reflections.
///
/// The columns of `Q` are flipped so that `R` has a nonnegative diagonal, which makes
/// `Q` uniformly distributed when `a` is gaussian.
///
/// Requires `m >= n`.
fn orthonormal_columns(mut a: Array2<f64>) -> Array2<f64> {
    let (m, n) = a.dim();
    debug_assert!(m >= n);
    trace!(rows = m, cols = n; "householder qr");

    let mut reflectors: Vec<Array1<f64>> = Vec::with_capacity(n);
    let mut flip = Vec::with_capacity(n);

    for k in 0..n {
        let mut v = a.slice(s![k.., k]).to_owned();
        let norm = v.dot(&v).sqrt();

        // `x - alpha * e1` with alpha of the opposite sign of `x[0]` avoids cancellation.
        let alpha = if v[0] > 0. { -norm } else { norm };
        v[0] -= alpha;

        let v_norm = v.dot(&v).sqrt();
        if v_norm > 0. {
            v /= v_norm;
            reflect(&v, a.slice_mut(s![k.., k..]));
        }

        // After the reflection `r[k, k] == alpha`.
        flip.push(alpha < 0.);
        reflectors.push(v);
    }

    // Q = H_0 H_1 ... H_{n-1} I[.., ..n]
    let mut q = Array2::from_shape_fn((m, n), |(i, j)| if i == j { 1. } else { 0. });
    for (k, v) in reflectors.iter().enumerate().rev() {
        reflect(v, q.slice_mut(s![k.., ..]));
    }

    for (mut column, flip) in q.axis_iter_mut(Axis(1)).zip(flip) {
        if flip {
            column.mapv_inplace(|x| -x);
        }
    }

    q
}

/// Applies the reflection `I - 2 v vᵀ` to `a` in place, `v` must be a unit vector.
fn reflect(v: &Array1<f64>, mut a: ArrayViewMut2<'_, f64>) {
    let w = v.dot(&a.view());
    let outer = v
        .view()
        .insert_axis(Axis(1))
        .dot(&w.view().insert_axis(Axis(0)));

    a.scaled_add(-2., &outer);
}
