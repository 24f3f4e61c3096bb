pub mod types;
pub mod conversion;
pub mod config;

pub use types::*;
pub use conversion::{Conversion, ConversionError, RoundingMode, SourceSpec, TargetSpec};
pub use config::{ConfigError, ConversionConfig};
