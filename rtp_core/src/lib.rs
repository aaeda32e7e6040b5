pub mod error;
pub mod generator;
pub mod params;
pub mod rng;
pub mod simulate;

pub use crate::error::{ConfigError, ConfigResult};
pub use crate::generator::{
    build_generator, Draw, GeneratorMode, PayoutGenerator, StatefulGenerator, StatelessGenerator,
};
pub use crate::params::PayoutParams;
pub use crate::rng::{derive_hash_hex, FixedSource, RandomSource, SeededSource, ThreadSource};
pub use crate::simulate::{simulate, SimulationSummary};
