use anyhow::Context;
use roomspace_author::{EditError, EditorConfig, EditorSession, LightForm, PrimitiveForm};
use roomspace_input::Key;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A recorded editing session: optional config plus the user actions in
/// the order they happened.
#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: Option<EditorConfig>,
    pub steps: Vec<Step>,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    AddPrimitive {
        form: PrimitiveForm,
    },
    Select {
        id: String,
    },
    Deselect,
    /// Press `keys`, run `frames` frames, then release the ones this step
    /// pressed. Keys already held by an earlier `key_down` stay held.
    Hold {
        keys: Vec<Key>,
        #[serde(default = "one")]
        frames: u32,
    },
    KeyDown {
        key: Key,
    },
    KeyUp {
        key: Key,
    },
    ReleaseAll,
    Frames {
        #[serde(default = "one")]
        count: u32,
    },
    Look {
        dx: f32,
        dy: f32,
    },
    AddLight {
        #[serde(default)]
        form: LightForm,
    },
    ResetLight,
    ImportModel {
        path: PathBuf,
    },
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }
}

/// Replays steps against one session. Relative model paths resolve
/// against `base_dir`.
pub struct Player {
    base_dir: PathBuf,
}

impl Player {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Apply one step. Returns a line worth printing, if any.
    pub fn apply(&self, session: &mut EditorSession, step: &Step) -> Result<Option<String>, EditError> {
        match step {
            Step::AddPrimitive { form } => {
                let record = session.submit_primitive(form)?;
                Ok(Some(format!("added {} ({:?})", record.id, record.kind)))
            }
            Step::Select { id } => Ok(session
                .select(id)?
                .then(|| format!("selected {}", id.trim()))),
            Step::Deselect => Ok(session.deselect().then(|| "deselected".to_string())),
            Step::Hold { keys, frames } => {
                let pressed: Vec<Key> = keys
                    .iter()
                    .copied()
                    .filter(|key| !session.held_keys().is_held(*key))
                    .collect();
                for key in &pressed {
                    session.key_down(*key);
                }
                session.run_frames(*frames);
                for key in pressed {
                    session.key_up(key);
                }
                Ok(None)
            }
            Step::KeyDown { key } => {
                session.key_down(*key);
                Ok(None)
            }
            Step::KeyUp { key } => {
                session.key_up(*key);
                Ok(None)
            }
            Step::ReleaseAll => {
                session.release_all_keys();
                Ok(None)
            }
            Step::Frames { count } => {
                session.run_frames(*count);
                Ok(None)
            }
            Step::Look { dx, dy } => {
                session.look(*dx, *dy);
                Ok(None)
            }
            Step::AddLight { form } => {
                let light = session.add_light(form);
                Ok(Some(format!("light #{:06x}", light.color)))
            }
            Step::ResetLight => Ok(session.reset_light().then(|| "light removed".to_string())),
            Step::ImportModel { path } => {
                let path = if path.is_relative() {
                    self.base_dir.join(path)
                } else {
                    path.clone()
                };
                let id = session.import_model(&path)?;
                Ok(Some(format!("imported {} as {}", path.display(), id.short())))
            }
        }
    }
}
