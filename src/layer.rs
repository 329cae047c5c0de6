use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::{Error, Matrix, Result};

/// Weight initialization scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// Every weight is zero. All units of a layer then compute the same value.
    Zeros,
    /// Uniform over `[0, scale)`.
    Uniform { scale: f32 },
    /// Uniform over `[-epsilon, epsilon)`.
    Symmetric { epsilon: f32 },
}

impl Default for Init {
    fn default() -> Self {
        Init::Uniform { scale: 1.0 }
    }
}

impl Init {
    pub fn validate(self) -> Result<()> {
        match self {
            Init::Zeros => Ok(()),
            Init::Uniform { scale: v } | Init::Symmetric { epsilon: v } => {
                if !(v.is_finite() && v > 0.0) {
                    return Err(Error::InvalidConfig(format!(
                        "init range must be finite and > 0, got {v}"
                    )));
                }
                // [-epsilon, epsilon) must have a finite width.
                if matches!(self, Init::Symmetric { .. }) && !(2.0 * v).is_finite() {
                    return Err(Error::InvalidConfig(format!(
                        "symmetric init epsilon {v} is too large"
                    )));
                }
                Ok(())
            }
        }
    }

    fn sample_matrix<R: Rng + ?Sized>(self, rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let dist = match self {
            Init::Zeros => return Matrix::zeros(rows, cols),
            Init::Uniform { scale } => Uniform::new(0.0_f32, scale),
            Init::Symmetric { epsilon } => Uniform::new(-epsilon, epsilon),
        };
        Matrix::from_fn(rows, cols, |_, _| dist.sample(&mut *rng))
    }
}

/// How a layer's weight matrix Θ is laid out.
///
/// Both layouts include one bias weight per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThetaLayout {
    /// `(units, inputs + 1)`: one row per unit; applied as `a * Θ^T`.
    UnitsByInputs,
    /// `(inputs + 1, units)`: one column per unit; applied as `a * Θ`.
    InputsByUnits,
}

/// One fully connected sigmoid layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    theta: Matrix,
    layout: ThetaLayout,
}

impl Layer {
    /// Wrap an existing weight matrix. Its shape is checked against the input on use.
    pub fn new(theta: Matrix, layout: ThetaLayout) -> Self {
        Self { theta, layout }
    }

    /// Allocate a layer mapping `in_dim` inputs (plus bias) to `out_dim` units.
    pub fn new_with_rng<R: Rng + ?Sized>(
        in_dim: usize,
        out_dim: usize,
        layout: ThetaLayout,
        init: Init,
        rng: &mut R,
    ) -> Result<Self> {
        if in_dim == 0 || out_dim == 0 {
            return Err(Error::InvalidConfig(format!(
                "layer dims must be > 0, got {in_dim} -> {out_dim}"
            )));
        }
        init.validate()?;

        let (rows, cols) = match layout {
            ThetaLayout::UnitsByInputs => (out_dim, in_dim + 1),
            ThetaLayout::InputsByUnits => (in_dim + 1, out_dim),
        };
        Ok(Self::new(init.sample_matrix(rows, cols, rng), layout))
    }

    #[inline]
    pub fn theta(&self) -> &Matrix {
        &self.theta
    }

    #[inline]
    pub fn layout(&self) -> ThetaLayout {
        self.layout
    }

    /// Inputs this layer expects, excluding the bias.
    #[inline]
    pub fn in_dim(&self) -> usize {
        match self.layout {
            ThetaLayout::UnitsByInputs => self.theta.cols().saturating_sub(1),
            ThetaLayout::InputsByUnits => self.theta.rows().saturating_sub(1),
        }
    }

    /// Units in this layer.
    #[inline]
    pub fn out_dim(&self) -> usize {
        match self.layout {
            ThetaLayout::UnitsByInputs => self.theta.rows(),
            ThetaLayout::InputsByUnits => self.theta.cols(),
        }
    }

    /// Weighted input sum `z` for a batch whose first column is the bias.
    ///
    /// `input` is `(m, in_dim + 1)`; the result is `(m, out_dim)`.
    pub(crate) fn pre_activation(&self, input: &Matrix, op: &str) -> Result<Matrix> {
        let transposed = self.layout == ThetaLayout::UnitsByInputs;
        input.product(&self.theta, transposed, op)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn shapes_follow_layout() {
        let mut rng = StdRng::seed_from_u64(0);

        let l1 = Layer::new_with_rng(4, 3, ThetaLayout::UnitsByInputs, Init::default(), &mut rng)
            .unwrap();
        assert_eq!(l1.theta().shape(), (3, 5));
        assert_eq!((l1.in_dim(), l1.out_dim()), (4, 3));

        let l2 = Layer::new_with_rng(3, 2, ThetaLayout::InputsByUnits, Init::default(), &mut rng)
            .unwrap();
        assert_eq!(l2.theta().shape(), (4, 2));
        assert_eq!((l2.in_dim(), l2.out_dim()), (3, 2));
    }

    #[test]
    fn init_ranges_are_respected() {
        let mut rng = StdRng::seed_from_u64(7);

        let u = Init::Uniform { scale: 0.5 }.sample_matrix(20, 20, &mut rng);
        assert!(u.as_slice().iter().all(|&w| (0.0..0.5).contains(&w)));

        let s = Init::Symmetric { epsilon: 0.12 }.sample_matrix(20, 20, &mut rng);
        assert!(s.as_slice().iter().all(|&w| (-0.12..0.12).contains(&w)));
        assert!(s.as_slice().iter().any(|&w| w < 0.0));

        let z = Init::Zeros.sample_matrix(3, 3, &mut rng);
        assert!(z.as_slice().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn init_validation() {
        assert!(Init::Zeros.validate().is_ok());
        assert!(Init::Uniform { scale: 1.0 }.validate().is_ok());
        assert!(Init::Uniform { scale: 0.0 }.validate().is_err());
        assert!(Init::Symmetric { epsilon: f32::NAN }.validate().is_err());
        assert!(Init::Symmetric { epsilon: -0.1 }.validate().is_err());
        assert!(Init::Symmetric { epsilon: 2e38 }.validate().is_err());
        assert!(Init::Uniform { scale: 2e38 }.validate().is_ok());
    }

    #[test]
    fn zero_dims_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(
            Layer::new_with_rng(0, 3, ThetaLayout::UnitsByInputs, Init::Zeros, &mut rng).is_err()
        );
    }
}
