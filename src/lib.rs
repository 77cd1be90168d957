#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod bundle;
pub mod config;
pub mod error;
pub mod minify;
pub mod models;
pub mod resolve;

pub use builder::AssetBundler;
pub use config::{BundleConfig, TaskConfig};
pub use error::{BundleError, BundleResult};
pub use minify::minify_css;
pub use models::{BundleOutput, BundleReport, MinifyOptions, ResolvedFileSet, SourceSpec};
