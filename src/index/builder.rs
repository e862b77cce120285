//! Index construction from decoded record collections.
//!
//! Construction runs in a fixed order: samples are grouped by owning
//! scene, sample-data by owning sample, then an inverse closure
//! (ego-pose key -> scene token) is walked scene -> sample -> capture,
//! and finally every ego pose is re-keyed by scene through that closure.
//! All maps are fully built before [`MetaDataIndex`] is handed out;
//! nothing here is visible half-constructed.

use std::collections::HashMap;

use crate::index::MetaDataIndex;
use crate::record::{EgoPoseInfo, EgoPoseRecord, SampleDataInfo, SampleInfo, SceneInfo};
use crate::util::Token;

/// Builder for [`MetaDataIndex`].
///
/// Takes the four decoded collections and produces the immutable index
/// in one shot. Callers that read the JSON files themselves (or obtain
/// records some other way) use this directly;
/// [`MetaDataIndex::load_from_directory`] is a thin wrapper around it.
#[derive(Debug, Default)]
pub struct MetaDataBuilder {
    scenes: Vec<SceneInfo>,
    samples: Vec<SampleInfo>,
    sample_data: Vec<SampleDataInfo>,
    ego_poses: Vec<EgoPoseRecord>,
}

impl MetaDataBuilder {
    pub fn new(
        scenes: Vec<SceneInfo>,
        samples: Vec<SampleInfo>,
        sample_data: Vec<SampleDataInfo>,
        ego_poses: Vec<EgoPoseRecord>,
    ) -> Self {
        Self {
            scenes,
            samples,
            sample_data,
            ego_poses,
        }
    }

    /// Build the immutable index.
    ///
    /// Single-threaded and one-shot; the only non-fatal conditions
    /// (orphaned ego poses, a closure key claimed by two scenes) are
    /// reported as warn-level events and construction continues.
    pub fn build(self) -> MetaDataIndex {
        let scene_samples = group_by_parent(self.samples, |sample| &sample.scene_token);
        let sample_data = group_by_parent(self.sample_data, |data| &data.sample_token);
        let closure = ego_pose_closure(&self.scenes, &scene_samples, &sample_data);
        let scene_ego_poses = resolve_ego_poses(self.ego_poses, &closure);

        MetaDataIndex {
            scenes: self.scenes,
            scene_samples,
            sample_data,
            scene_ego_poses,
        }
    }
}

/// Group a flat sequence of child records by their parent token.
///
/// Order within each group matches input order; a parent with zero
/// children is simply absent from the map. This is the one grouping
/// algorithm, used for both Sample-by-Scene and SampleData-by-Sample.
fn group_by_parent<T>(records: Vec<T>, parent_token: impl Fn(&T) -> &Token) -> HashMap<Token, Vec<T>> {
    let mut groups: HashMap<Token, Vec<T>> = HashMap::new();
    for record in records {
        let key = parent_token(&record).clone();
        groups.entry(key).or_default().push(record);
    }
    groups
}

/// Build the inverse closure: ego-pose key -> owning scene token.
///
/// The key stored is each capture's `ego_pose_token` (the value an
/// ego-pose record will carry as its own token), not the capture's own
/// token. Under well-formed data every key maps to exactly one scene;
/// a key claimed by two scenes keeps the later write and is reported.
fn ego_pose_closure(
    scenes: &[SceneInfo],
    scene_samples: &HashMap<Token, Vec<SampleInfo>>,
    sample_data: &HashMap<Token, Vec<SampleDataInfo>>,
) -> HashMap<Token, Token> {
    let mut closure = HashMap::new();

    for scene in scenes {
        let Some(samples) = scene_samples.get(&scene.token) else {
            continue;
        };
        for sample in samples {
            let Some(captures) = sample_data.get(&sample.token) else {
                continue;
            };
            for capture in captures {
                let previous = closure.insert(capture.ego_pose_token.clone(), scene.token.clone());
                if let Some(previous) = previous {
                    if previous != scene.token {
                        tracing::warn!(
                            key = %capture.ego_pose_token,
                            previous_scene = %previous,
                            scene = %scene.token,
                            "ego pose key claimed by two scenes; keeping the later one"
                        );
                    }
                }
            }
        }
    }

    closure
}

/// Re-key every ego pose by scene token through the closure.
///
/// Poses whose token matches no reachable capture are skipped with a
/// warn-level event; order within each scene matches input order.
fn resolve_ego_poses(
    ego_poses: Vec<EgoPoseRecord>,
    closure: &HashMap<Token, Token>,
) -> HashMap<Token, Vec<EgoPoseInfo>> {
    let mut scene_poses: HashMap<Token, Vec<EgoPoseInfo>> = HashMap::new();

    for pose in ego_poses {
        match closure.get(&pose.token) {
            Some(scene_token) => {
                scene_poses
                    .entry(scene_token.clone())
                    .or_default()
                    .push(pose.into());
            }
            None => {
                tracing::warn!(token = %pose.token, "ego pose matches no sample data; skipping");
            }
        }
    }

    scene_poses
}
