pub mod classify;
pub mod config;
pub mod footprint;
pub mod measure;
pub mod provision;
pub mod types;

pub use classify::FileClassifier;
pub use config::Config;
pub use footprint::FootprintPipeline;
pub use provision::{Environment, InspectError, Inspector, ProvisionError, Provisioner};
pub use types::*;
