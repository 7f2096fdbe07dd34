//! Conf module: miner tuning knobs and their loading.

pub mod model;
pub mod load;

pub use model::MinerConfig;
