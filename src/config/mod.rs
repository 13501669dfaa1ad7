pub mod traits;
pub mod sequence;
pub mod harness;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use sequence::SequenceConfig;
pub use harness::HarnessConfig;
pub use traits::{ConfigSection, ConfigManifest, FieldManifest};
