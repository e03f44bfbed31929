use serde::{Deserialize, Serialize};

/// What a submission does when its identifier is already registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Tear down the existing primitive and register the new one in its place.
    #[default]
    Replace,
    /// Fail with `DuplicateIdentifier` and keep the existing primitive.
    Reject,
}

/// Tunables for an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of live primitives.
    pub max_primitives: usize,
    pub duplicate_policy: DuplicatePolicy,
    /// Distance a selected primitive moves per tick per held arrow key.
    pub nudge_step: f32,
    /// Camera distance per tick.
    pub camera_speed: f32,
    /// Camera speed factor while the boost key is held.
    pub boost_multiplier: f32,
    /// Room extent that imported models are scaled to fit.
    pub room_size: [f32; 3],
    /// Directory texture names are resolved against.
    pub texture_root: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_primitives: 10,
            duplicate_policy: DuplicatePolicy::Replace,
            nudge_step: 0.05,
            camera_speed: 0.1,
            boost_multiplier: 2.0,
            room_size: [10.0, 10.0, 10.0],
            texture_root: "../textures".into(),
        }
    }
}
