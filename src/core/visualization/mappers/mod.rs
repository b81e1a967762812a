pub mod base;
mod choice;
mod circuit_breaker;
mod data_mapper;
mod do_try;
mod parallel;
mod step;

pub use base::BaseNodeMapper;
pub use choice::ChoiceNodeMapper;
pub use circuit_breaker::CircuitBreakerNodeMapper;
pub use data_mapper::DataMapperNodeMapper;
pub use do_try::DoTryNodeMapper;
pub use parallel::ParallelNodeMapper;
pub use step::{is_data_mapper, StepNodeMapper};

/// Registry key of the data-mapper projector.
pub const DATAMAPPER: &str = "kaoto-datamapper";
