pub mod monitor;

pub use monitor::{
    HttpConfig, ListingSelectors, MessageConfig, MonitorConfig, OutputConfig, SourceConfig,
    SourceKind,
};
