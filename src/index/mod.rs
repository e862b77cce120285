//! Index construction and the read-only query surface.
//!
//! [`MetaDataIndex`] is the main entry point: load a dataset directory
//! with [`MetaDataIndex::load_from_directory`], or feed already-decoded
//! collections through [`MetaDataBuilder`]. Once built the index is
//! immutable; every accessor takes `&self`, so it is safe to share
//! across threads without synchronization.
//!
//! Unknown scene tokens are handled uniformly: [`MetaDataIndex::scene_info`]
//! returns `None` and is the existence test, while the sequence accessors
//! return an empty result. An empty result is "nothing found", not proof
//! the scene exists.

mod builder;

pub use builder::MetaDataBuilder;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::record::{EgoPoseInfo, EgoPoseRecord, SampleDataInfo, SampleInfo, SceneInfo};
use crate::util::{Error, Result, Token};

const SCENE_FILE: &str = "scene.json";
const SAMPLE_FILE: &str = "sample.json";
const SAMPLE_DATA_FILE: &str = "sample_data.json";
const EGO_POSE_FILE: &str = "ego_pose.json";

/// Immutable metadata index over one dataset directory.
///
/// Holds the scenes in load order plus three derived maps: samples by
/// scene, captures by sample, and ego poses by scene (resolved through
/// the sample-data join).
#[derive(Debug, Clone, PartialEq)]
pub struct MetaDataIndex {
    pub(crate) scenes: Vec<SceneInfo>,
    pub(crate) scene_samples: HashMap<Token, Vec<SampleInfo>>,
    pub(crate) sample_data: HashMap<Token, Vec<SampleDataInfo>>,
    pub(crate) scene_ego_poses: HashMap<Token, Vec<EgoPoseInfo>>,
}

impl MetaDataIndex {
    /// Load the four metadata collections from a dataset directory and
    /// build the index.
    ///
    /// Expects `scene.json`, `sample.json`, `sample_data.json` and
    /// `ego_pose.json` directly under `dir`. Any file that cannot be
    /// opened or decoded aborts the whole load; there is no partial
    /// index.
    pub fn load_from_directory(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let scenes: Vec<SceneInfo> = slurp_json(&dir.join(SCENE_FILE))?;
        let samples: Vec<SampleInfo> = slurp_json(&dir.join(SAMPLE_FILE))?;
        let sample_data: Vec<SampleDataInfo> = slurp_json(&dir.join(SAMPLE_DATA_FILE))?;
        let ego_poses: Vec<EgoPoseRecord> = slurp_json(&dir.join(EGO_POSE_FILE))?;

        tracing::debug!(
            scenes = scenes.len(),
            samples = samples.len(),
            sample_data = sample_data.len(),
            ego_poses = ego_poses.len(),
            "loaded metadata collections"
        );

        Ok(MetaDataBuilder::new(scenes, samples, sample_data, ego_poses).build())
    }

    /// All scene tokens, in load order.
    pub fn scene_tokens(&self) -> impl Iterator<Item = &Token> {
        self.scenes.iter().map(|scene| &scene.token)
    }

    /// All scene tokens as an owned vector, in load order.
    pub fn all_scene_tokens(&self) -> Vec<Token> {
        self.scene_tokens().cloned().collect()
    }

    /// Number of loaded scenes.
    pub fn num_scenes(&self) -> usize {
        self.scenes.len()
    }

    /// Look up a scene by token. `None` if the token is unknown.
    pub fn scene_info(&self, scene_token: &str) -> Option<&SceneInfo> {
        self.scenes.iter().find(|scene| scene.token == scene_token)
    }

    /// The ordered samples of a scene. Empty for an unknown token.
    pub fn scene_samples(&self, scene_token: &str) -> &[SampleInfo] {
        self.scene_samples
            .get(scene_token)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All sensor captures of a scene, flattened in sample order.
    ///
    /// Walks every sample of the scene and concatenates its captures in
    /// load order. Samples without captures contribute nothing; an
    /// unknown scene token yields an empty vector.
    pub fn scene_sample_data(&self, scene_token: &str) -> Vec<SampleDataInfo> {
        let mut captures = Vec::new();
        for sample in self.scene_samples(scene_token) {
            if let Some(sample_captures) = self.sample_data.get(&sample.token) {
                captures.extend(sample_captures.iter().cloned());
            }
        }
        captures
    }

    /// The ego poses recorded during a scene, in pose-collection order.
    /// Empty for an unknown token.
    pub fn ego_pose_info(&self, scene_token: &str) -> &[EgoPoseInfo] {
        self.scene_ego_poses
            .get(scene_token)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Read one JSON collection file into typed records.
fn slurp_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::Json {
        file: path.to_path_buf(),
        source: e,
    })
}
