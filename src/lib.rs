//! A small multilayer perceptron for handwritten letter features.
//!
//! `letter-mlp` loads a delimited dataset (integer class label followed by pixel
//! features), allocates randomly initialized weights for a sigmoid network with
//! one hidden layer by default, and runs batched forward propagation over the
//! whole dataset at once.
//!
//! # Data layout and shapes
//!
//! - Scalars are `f32`; matrices are dense and row-major.
//! - `X` is `(m, n)`: one row per example, one column per feature.
//! - Θ1 is `(hidden, n + 1)` and Θ2 is `(hidden + 1, num_labels)`; the extra
//!   column/row holds the bias weights.
//! - A forward pass yields `a1 = [1 | X]`, `z2 = a1 Θ1^T`, `a2 = [1 | σ(z2)]`,
//!   `z3 = a2 Θ2` and `a3 = σ(z3)`.
//!
//! # Errors
//!
//! Malformed input data is an [`Error::DataFormat`]; operands whose inner
//! dimensions disagree are an [`Error::ShapeMismatch`]. Nothing broadcasts.
//!
//! # Quick start
//!
//! ```rust
//! use letter_mlp::{Dataset, LoaderConfig, NetworkBuilder};
//!
//! # fn main() -> letter_mlp::Result<()> {
//! let csv = "1,0.1,0.2\n2,0.3,0.4\n3,0.5,0.6\n";
//! let data = Dataset::from_reader(csv.as_bytes(), &LoaderConfig::default())?;
//!
//! let net = NetworkBuilder::new()
//!     .hidden_layer(2)?
//!     .num_labels(3)?
//!     .build_with_seed(data, 0)?;
//!
//! let pass = net.forward_pass()?;
//! assert_eq!(pass.output().shape(), (3, 3));
//! assert!(pass.output().as_slice().iter().all(|&p| p > 0.0 && p < 1.0));
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod builder;
pub mod data;
pub mod error;
pub mod layer;
pub(crate) mod matmul;
pub mod matrix;
pub mod network;

pub use activation::sigmoid;
pub use builder::{DEFAULT_HIDDEN_LAYER_SIZE, DEFAULT_NUM_LABELS, DEFAULT_SEED, NetworkBuilder};
pub use data::{Dataset, LoaderConfig};
pub use error::{Error, Result, Shape};
pub use layer::{Init, Layer, ThetaLayout};
pub use matrix::Matrix;
pub use network::{ForwardPass, Network};
