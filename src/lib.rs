//! # nuscenes-meta
//!
//! In-memory metadata index for nuScenes-style driving-scene datasets.
//!
//! A dataset directory carries four JSON collections (`scene.json`,
//! `sample.json`, `sample_data.json`, `ego_pose.json`) linked only by
//! opaque string tokens. This crate decodes them into typed records and
//! builds the indices a conversion pipeline needs: samples grouped by
//! scene, sensor captures grouped by sample, and ego poses re-keyed by
//! scene through the sample-data join.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (tokens, errors)
//! - [`record`] - Typed records for the four metadata collections
//! - [`index`] - Index construction and the read-only query surface
//!
//! ## Example
//!
//! ```ignore
//! use nuscenes_meta::MetaDataIndex;
//!
//! let index = MetaDataIndex::load_from_directory("data/v1.0-mini")?;
//!
//! for token in index.scene_tokens() {
//!     let scene = index.scene_info(token).unwrap();
//!     println!("{}: {} captures", scene.name, index.scene_sample_data(token).len());
//! }
//! ```

pub mod util;
pub mod record;
pub mod index;

// Re-export commonly used types
pub use util::{Error, Result, SceneId, Token};
pub use record::{EgoPoseInfo, EgoPoseRecord, SampleDataInfo, SampleInfo, SceneInfo};
pub use index::{MetaDataBuilder, MetaDataIndex};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::index::{MetaDataBuilder, MetaDataIndex};
    pub use crate::record::{EgoPoseInfo, EgoPoseRecord, SampleDataInfo, SampleInfo, SceneInfo};
    pub use crate::util::{Error, Result, SceneId, Token};
}
