use log::debug;

use crate::activation::sigmoid_matrix;
use crate::builder::NetworkBuilder;
use crate::{Dataset, Error, Layer, Matrix, Result};

/// A feed-forward sigmoid network bound to the dataset it was built for.
///
/// Layers are numbered from 1 (the input layer). With the default single hidden
/// layer, `theta(1)` is Θ1 `(hidden, n + 1)` and `theta(2)` is Θ2
/// `(hidden + 1, num_labels)`.
#[derive(Debug, Clone)]
pub struct Network {
    dataset: Dataset,
    layers: Vec<Layer>,
}

/// Every matrix produced by one batched forward pass.
///
/// `activation(1)` is the input with its bias column; `activation(l)` for
/// `1 < l < L` is a hidden layer's output with its bias column; `activation(L)`
/// is the network output. `pre_activation(l)` is `z(l)` for `l >= 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    activations: Vec<Matrix>,
    pre_activations: Vec<Matrix>,
    output: Matrix,
}

impl Network {
    /// Default single-hidden-layer network with the default seed.
    pub fn new(dataset: Dataset) -> Result<Self> {
        NetworkBuilder::new().build(dataset)
    }

    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::new()
    }

    /// Assemble a network from explicit layers.
    ///
    /// Layer shapes are not checked here; `forward_pass` reports any mismatch.
    pub fn from_parts(dataset: Dataset, layers: Vec<Layer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(Error::InvalidConfig(
                "network must have at least one layer".to_owned(),
            ));
        }
        Ok(Self { dataset, layers })
    }

    #[inline]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Weight matrix feeding layer `l + 1`, for `l >= 1`.
    pub fn theta(&self, l: usize) -> Option<&Matrix> {
        l.checked_sub(1)
            .and_then(|i| self.layers.get(i))
            .map(Layer::theta)
    }

    /// Features per example, taken from the dataset.
    #[inline]
    pub fn input_layer_size(&self) -> usize {
        self.dataset.num_features()
    }

    /// Units in the output layer.
    #[inline]
    pub fn num_labels(&self) -> usize {
        self.layers.last().map_or(0, Layer::out_dim)
    }

    /// Layer count including the input layer.
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len() + 1
    }

    /// Forward propagation over the whole stored dataset.
    pub fn forward_pass(&self) -> Result<ForwardPass> {
        self.forward(self.dataset.features())
    }

    /// Forward propagation over an arbitrary `(m, n)` batch.
    ///
    /// Fails with `Error::ShapeMismatch` if `x`, or any layer, does not line up
    /// with the next layer's weights.
    pub fn forward(&self, x: &Matrix) -> Result<ForwardPass> {
        let last = self.layers.len();
        let mut activations = Vec::with_capacity(last);
        let mut pre_activations = Vec::with_capacity(last);

        let mut a = x.with_bias_column();
        for (idx, layer) in self.layers.iter().enumerate() {
            let l = idx + 1;
            let z = layer.pre_activation(&a, &format!("a{l} * theta{l}"))?;
            debug!(
                "layer {}: a{l} {:?} -> z{} {:?}",
                l + 1,
                a.shape(),
                l + 1,
                z.shape()
            );

            let h = sigmoid_matrix(z.clone());
            activations.push(a);
            pre_activations.push(z);
            a = if l == last { h } else { h.with_bias_column() };
        }

        Ok(ForwardPass {
            activations,
            pre_activations,
            output: a,
        })
    }
}

impl ForwardPass {
    /// Number of layers, including input and output.
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.activations.len() + 1
    }

    /// `a(l)`, 1-based.
    pub fn activation(&self, l: usize) -> Option<&Matrix> {
        if l == self.num_layers() {
            return Some(&self.output);
        }
        l.checked_sub(1).and_then(|i| self.activations.get(i))
    }

    /// `z(l)`, defined for `2 <= l <= L`.
    pub fn pre_activation(&self, l: usize) -> Option<&Matrix> {
        l.checked_sub(2).and_then(|i| self.pre_activations.get(i))
    }

    /// Output activations, shape `(m, num_labels)`.
    #[inline]
    pub fn output(&self) -> &Matrix {
        &self.output
    }

    /// `(activations a(1)..=a(L), pre-activations z(2)..=z(L))`.
    pub fn into_parts(self) -> (Vec<Matrix>, Vec<Matrix>) {
        let mut activations = self.activations;
        activations.push(self.output);
        (activations, self.pre_activations)
    }
}
