//! Typed records for the four metadata collections.
//!
//! Each record kind mirrors one JSON collection of the dataset directory:
//! - [`SceneInfo`] - `scene.json`, one per recorded drive segment
//! - [`SampleInfo`] - `sample.json`, one per synchronized timestep
//! - [`SampleDataInfo`] - `sample_data.json`, one per sensor capture
//! - [`EgoPoseRecord`] / [`EgoPoseInfo`] - `ego_pose.json`, the vehicle
//!   pose at the instant of one capture
//!
//! Field names follow the JSON schema verbatim; unknown source fields
//! (`prev`, `next`, …) are ignored. A missing required field is a decode
//! error, never a silent default.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::util::{Error, Result, SceneId, Token};

/// One recorded drive segment.
///
/// `scene_id` is not stored in the source data; it is parsed from the
/// `name` field during decode ("scene-0061" -> 61). A name that does not
/// match the pattern fails the decode of the whole collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "SceneRecord")]
pub struct SceneInfo {
    pub token: Token,
    pub nbr_samples: u32,
    pub scene_id: SceneId,
    pub name: String,
    pub description: String,
    pub first_sample_token: Token,
}

/// Raw scene record as stored in `scene.json`.
#[derive(Debug, Deserialize)]
struct SceneRecord {
    token: Token,
    nbr_samples: u32,
    name: String,
    description: String,
    first_sample_token: Token,
}

impl TryFrom<SceneRecord> for SceneInfo {
    type Error = Error;

    fn try_from(raw: SceneRecord) -> Result<Self> {
        let scene_id = parse_scene_id(&raw.name)?;
        Ok(Self {
            token: raw.token,
            nbr_samples: raw.nbr_samples,
            scene_id,
            name: raw.name,
            description: raw.description,
            first_sample_token: raw.first_sample_token,
        })
    }
}

/// One synchronized timestep within a scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleInfo {
    pub scene_token: Token,
    pub token: Token,
    pub timestamp: u64,
}

/// One sensor capture (camera frame, lidar sweep, ...) within a sample.
///
/// `ego_pose_token` shares its identity space with [`EgoPoseRecord::token`];
/// that pairing is the join key the ego-pose resolution pass uses. The
/// source data does not guarantee a matching pose exists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SampleDataInfo {
    pub sample_token: Token,
    pub token: Token,
    pub timestamp: u64,
    pub ego_pose_token: Token,
    pub calibrated_sensor_token: Token,
    pub fileformat: String,
    pub is_key_frame: bool,
    pub filename: String,
}

/// Raw ego-pose record as stored in `ego_pose.json`, token included.
///
/// The token is only needed during index construction (it is matched
/// against [`SampleDataInfo::ego_pose_token`]); the stored form is
/// [`EgoPoseInfo`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EgoPoseRecord {
    pub token: Token,
    pub translation: [f64; 3],
    pub rotation: [f64; 4],
    pub timestamp: u64,
}

/// Vehicle position and orientation at one capture instant.
///
/// `rotation` is a quaternion whose component order is taken verbatim
/// from the source field order; no scalar/vector split is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EgoPoseInfo {
    pub translation: [f64; 3],
    pub rotation: [f64; 4],
    pub timestamp: u64,
}

impl From<EgoPoseRecord> for EgoPoseInfo {
    fn from(raw: EgoPoseRecord) -> Self {
        Self {
            translation: raw.translation,
            rotation: raw.rotation,
            timestamp: raw.timestamp,
        }
    }
}

static SCENE_ID_RE: OnceLock<Regex> = OnceLock::new();

/// Parse the numeric scene id out of a scene name.
///
/// The name must contain the pattern `scene-<digits>`; anything else is
/// an [`Error::InvalidSceneName`].
pub fn parse_scene_id(name: &str) -> Result<SceneId> {
    let re = SCENE_ID_RE.get_or_init(|| Regex::new(r"scene-(\d+)").expect("valid literal regex"));
    let caps = re
        .captures(name)
        .ok_or_else(|| Error::InvalidSceneName(name.to_string()))?;
    caps[1]
        .parse()
        .map_err(|_| Error::InvalidSceneName(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_scene_id() {
        assert_eq!(parse_scene_id("scene-0061").unwrap(), 61);
        assert_eq!(parse_scene_id("scene-1100").unwrap(), 1100);
        assert_eq!(parse_scene_id("scene-0").unwrap(), 0);
    }

    #[test]
    fn test_parse_scene_id_rejects_bad_names() {
        assert!(matches!(
            parse_scene_id("drive-0061"),
            Err(Error::InvalidSceneName(_))
        ));
        assert!(matches!(
            parse_scene_id("scene-"),
            Err(Error::InvalidSceneName(_))
        ));
        assert!(matches!(parse_scene_id(""), Err(Error::InvalidSceneName(_))));
    }

    #[test]
    fn test_scene_decode() {
        let scene: SceneInfo = serde_json::from_value(json!({
            "token": "sc1",
            "nbr_samples": 39,
            "name": "scene-0061",
            "description": "Parked truck, construction",
            "first_sample_token": "sa1",
            "log_token": "ignored-extra-field"
        }))
        .unwrap();

        assert_eq!(scene.token, "sc1");
        assert_eq!(scene.nbr_samples, 39);
        assert_eq!(scene.scene_id, 61);
        assert_eq!(scene.name, "scene-0061");
        assert_eq!(scene.first_sample_token, "sa1");
    }

    #[test]
    fn test_scene_decode_fails_on_bad_name() {
        let result: std::result::Result<SceneInfo, _> = serde_json::from_value(json!({
            "token": "sc1",
            "nbr_samples": 1,
            "name": "not-a-scene",
            "description": "",
            "first_sample_token": "sa1"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_scene_decode_fails_on_missing_field() {
        // no "name"
        let result: std::result::Result<SceneInfo, _> = serde_json::from_value(json!({
            "token": "sc1",
            "nbr_samples": 1,
            "description": "",
            "first_sample_token": "sa1"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_data_decode() {
        let data: SampleDataInfo = serde_json::from_value(json!({
            "token": "sd1",
            "sample_token": "sa1",
            "ego_pose_token": "sd1",
            "calibrated_sensor_token": "cs1",
            "timestamp": 1532402927612460u64,
            "fileformat": "jpg",
            "is_key_frame": true,
            "height": 900,
            "width": 1600,
            "filename": "samples/CAM_FRONT/n015.jpg",
            "prev": "",
            "next": "sd2"
        }))
        .unwrap();

        assert_eq!(data.sample_token, "sa1");
        assert_eq!(data.ego_pose_token, "sd1");
        assert!(data.is_key_frame);
        assert_eq!(data.fileformat, "jpg");
    }

    #[test]
    fn test_ego_pose_decode_preserves_component_order() {
        let pose: EgoPoseRecord = serde_json::from_value(json!({
            "token": "ep1",
            "translation": [411.3, 1180.9, 0.0],
            "rotation": [0.572, -0.002, 0.011, -0.82],
            "timestamp": 1532402927612460u64
        }))
        .unwrap();

        assert_eq!(pose.translation, [411.3, 1180.9, 0.0]);
        assert_eq!(pose.rotation, [0.572, -0.002, 0.011, -0.82]);

        let info = EgoPoseInfo::from(pose);
        assert_eq!(info.rotation, [0.572, -0.002, 0.011, -0.82]);
    }

    #[test]
    fn test_ego_pose_decode_fails_on_wrong_arity() {
        // three rotation components instead of four
        let result: std::result::Result<EgoPoseRecord, _> = serde_json::from_value(json!({
            "token": "ep1",
            "translation": [0.0, 0.0, 0.0],
            "rotation": [1.0, 0.0, 0.0],
            "timestamp": 0u64
        }));
        assert!(result.is_err());
    }
}
