//! Network builder.
//!
//! `NetworkBuilder` fixes the architecture (hidden layer sizes, number of classes)
//! and the weight initializer, then allocates the weights for a concrete
//! `Dataset`. The input layer size is always taken from the dataset's feature
//! count.
//!
//! The random generator is always explicit: either a seed (`build_with_seed`,
//! or `build` with [`DEFAULT_SEED`]) or a caller-owned RNG (`build_with_rng`).

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Dataset, Error, Init, Layer, Network, Result, ThetaLayout};

pub const DEFAULT_HIDDEN_LAYER_SIZE: usize = 25;
/// One class per letter a-z.
pub const DEFAULT_NUM_LABELS: usize = 26;
pub const DEFAULT_SEED: u64 = 0;

#[derive(Debug, Clone)]
/// Builder for a `Network`.
///
/// ```rust
/// use letter_mlp::{Dataset, Init, LoaderConfig, NetworkBuilder};
///
/// # fn main() -> letter_mlp::Result<()> {
/// let data = Dataset::from_reader("1,0.1,0.2\n2,0.3,0.4\n".as_bytes(), &LoaderConfig::default())?;
/// let net = NetworkBuilder::new()
///     .hidden_layer(2)?
///     .num_labels(3)?
///     .init(Init::Symmetric { epsilon: 0.12 })?
///     .build_with_seed(data, 42)?;
/// assert_eq!(net.theta(1).unwrap().shape(), (2, 3));
/// assert_eq!(net.theta(2).unwrap().shape(), (3, 3));
/// # Ok(())
/// # }
/// ```
pub struct NetworkBuilder {
    hidden: Vec<usize>,
    num_labels: usize,
    init: Init,
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkBuilder {
    /// Defaults: one hidden layer of [`DEFAULT_HIDDEN_LAYER_SIZE`] units,
    /// [`DEFAULT_NUM_LABELS`] classes, `Init::Uniform { scale: 1.0 }`.
    pub fn new() -> Self {
        Self {
            hidden: Vec::new(),
            num_labels: DEFAULT_NUM_LABELS,
            init: Init::default(),
        }
    }

    /// Append a hidden layer of `size` units.
    ///
    /// If never called, a single hidden layer of the default size is used.
    pub fn hidden_layer(mut self, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig(
                "hidden layer size must be > 0".to_owned(),
            ));
        }
        self.hidden.push(size);
        Ok(self)
    }

    pub fn num_labels(mut self, num_labels: usize) -> Result<Self> {
        if num_labels == 0 {
            return Err(Error::InvalidConfig("num_labels must be > 0".to_owned()));
        }
        self.num_labels = num_labels;
        Ok(self)
    }

    pub fn init(mut self, init: Init) -> Result<Self> {
        init.validate()?;
        self.init = init;
        Ok(self)
    }

    /// Build with [`DEFAULT_SEED`].
    pub fn build(self, dataset: Dataset) -> Result<Network> {
        self.build_with_seed(dataset, DEFAULT_SEED)
    }

    /// Build using a deterministic seed.
    pub fn build_with_seed(self, dataset: Dataset, seed: u64) -> Result<Network> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build_with_rng(dataset, &mut rng)
    }

    /// Build using the provided RNG.
    ///
    /// The first weight matrix is `(units, inputs + 1)`; every later one is
    /// `(inputs + 1, units)`.
    pub fn build_with_rng<R: Rng + ?Sized>(self, dataset: Dataset, rng: &mut R) -> Result<Network> {
        if dataset.is_empty() {
            return Err(Error::data(
                "dataset is empty; cannot infer input layer size",
            ));
        }
        let input_layer_size = dataset.num_features();
        if input_layer_size == 0 {
            return Err(Error::data("examples have no features"));
        }

        if let Some(msg) = label_range_mismatch(dataset.label_range(), self.num_labels) {
            warn!("{msg}");
        }

        let hidden = if self.hidden.is_empty() {
            vec![DEFAULT_HIDDEN_LAYER_SIZE]
        } else {
            self.hidden
        };

        let mut sizes = Vec::with_capacity(hidden.len() + 2);
        sizes.push(input_layer_size);
        sizes.extend(hidden);
        sizes.push(self.num_labels);

        let mut layers = Vec::with_capacity(sizes.len() - 1);
        for (idx, w) in sizes.windows(2).enumerate() {
            let layout = if idx == 0 {
                ThetaLayout::UnitsByInputs
            } else {
                ThetaLayout::InputsByUnits
            };
            let layer = Layer::new_with_rng(w[0], w[1], layout, self.init, rng)?;
            debug!("theta{}: {:?} ({layout:?})", idx + 1, layer.theta().shape());
            layers.push(layer);
        }

        Network::from_parts(dataset, layers)
    }
}

/// Describes how `(min, max)` labels fit neither `0..num_labels` nor
/// `1..=num_labels`, or `None` if one of the two conventions holds.
fn label_range_mismatch((min, max): (u32, u32), num_labels: usize) -> Option<String> {
    let (min, max) = (min as usize, max as usize);
    let zero_based = max < num_labels;
    let one_based = min >= 1 && max <= num_labels;
    if zero_based || one_based {
        None
    } else {
        Some(format!(
            "labels span {min}..={max}, which fits neither 0..{num_labels} nor 1..={num_labels}"
        ))
    }
}
