use glam::Vec3;
use roomspace_assets::{TextureLibrary, fit_scale, import_obj, parse_obj_bounds};
use roomspace_common::ObjectId;
use roomspace_input::{CameraMapper, HeldKeys, InputMapper, Key};
use roomspace_kernel::{DirectionalLight, Scene};
use roomspace_render::FlyCamera;
use std::path::Path;

use crate::config::EditorConfig;
use crate::error::EditError;
use crate::form::{PrimitiveForm, PrimitiveRecord};
use crate::light::{self, LightForm};
use crate::registry::PrimitiveRegistry;
use crate::selection::{SelectionController, TickOutcome};

/// Everything one editing session owns: the room scene, the primitive
/// registry, the selection, the camera and the held keys.
///
/// Form handlers and the frame driver all go through this value; there is
/// no process-wide state.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    scene: Scene,
    registry: PrimitiveRegistry,
    selection: SelectionController,
    textures: TextureLibrary,
    camera: FlyCamera,
    camera_input: CameraMapper,
    keys: HeldKeys,
    frame: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        tracing::debug!(?config, "editor session created");
        let textures = TextureLibrary::new(config.texture_root.clone());
        Self {
            scene: Scene::with_room_textures(&textures),
            registry: PrimitiveRegistry::from_config(&config),
            selection: SelectionController::new(config.nudge_step),
            textures,
            camera: FlyCamera::default(),
            camera_input: CameraMapper {
                speed: config.camera_speed,
                boost_multiplier: config.boost_multiplier,
            },
            keys: HeldKeys::new(),
            frame: 0,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access, for draining the event log.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn registry(&self) -> &PrimitiveRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn held_keys(&self) -> &HeldKeys {
        &self.keys
    }

    /// Frames driven so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Identifiers offered by the manipulate-object list.
    pub fn manipulable_ids(&self) -> Vec<String> {
        self.registry.ids().map(str::to_string).collect()
    }

    /// Handle an add-primitive form submission.
    pub fn submit_primitive(&mut self, form: &PrimitiveForm) -> Result<PrimitiveRecord, EditError> {
        let commit = self
            .registry
            .submit(&mut self.scene, &self.textures, form)?;
        if let Some(old) = commit.replaced {
            self.selection.forget(old);
        }
        Ok(commit.record)
    }

    /// Handle a manipulate-object submission.
    ///
    /// A blank identifier is ignored and returns `Ok(false)`.
    pub fn select(&mut self, id: &str) -> Result<bool, EditError> {
        if id.trim().is_empty() {
            return Ok(false);
        }
        self.selection
            .select_by_id(id, &self.registry, &mut self.scene)?;
        Ok(true)
    }

    pub fn deselect(&mut self) -> bool {
        self.selection.deselect(&mut self.scene)
    }

    pub fn add_light(&mut self, form: &LightForm) -> DirectionalLight {
        light::add_light(&mut self.scene, form)
    }

    pub fn reset_light(&mut self) -> bool {
        light::reset_light(&mut self.scene)
    }

    /// Import an OBJ file and scale it to fit the room.
    pub fn import_model(&mut self, path: impl AsRef<Path>) -> Result<ObjectId, EditError> {
        let path = path.as_ref();
        let bounds = import_obj(path)?;
        Ok(self.place_model(path.display().to_string(), bounds.size()))
    }

    /// Import OBJ text that is already in memory.
    pub fn import_model_source(&mut self, name: &str, source: &str) -> Result<ObjectId, EditError> {
        let bounds = parse_obj_bounds(source)?;
        Ok(self.place_model(name.to_string(), bounds.size()))
    }

    fn place_model(&mut self, source: String, size: Vec3) -> ObjectId {
        let scale = fit_scale(size, Vec3::from_array(self.config.room_size));
        tracing::info!(source = %source, scale, "model imported");
        self.scene.add_model(source, size, scale)
    }

    pub fn key_down(&mut self, key: Key) {
        self.keys.press(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    /// Drop every held key, as when the window loses focus.
    pub fn release_all_keys(&mut self) {
        self.keys.clear();
    }

    /// Relative pointer motion while the pointer is locked.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.camera.rotate(dx, dy);
    }

    /// Run one frame: poll the held keys once, move the camera, then tick
    /// the selection.
    pub fn frame(&mut self) -> TickOutcome {
        self.frame += 1;

        let delta = self.camera_input.map(&self.keys);
        if !delta.is_zero() {
            self.camera.move_forward(delta.forward);
            self.camera.move_right(delta.right);
            self.camera.move_up(delta.up);
            tracing::trace!(frame = self.frame, ?delta, "camera moved");
        }

        let outcome = self
            .selection
            .tick(&self.keys, &mut self.registry, &mut self.scene);
        match outcome {
            TickOutcome::Moved(offset) if offset != Vec3::ZERO => {
                tracing::debug!(frame = self.frame, ?offset, "selection nudged");
            }
            _ => {}
        }
        outcome
    }

    /// Run `count` frames with the current keys held.
    pub fn run_frames(&mut self, count: u32) -> Vec<TickOutcome> {
        (0..count).map(|_| self.frame()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;
    use roomspace_kernel::{NodeKind, SceneEvent};
    use std::io::Write;

    fn form(id: &str) -> PrimitiveForm {
        PrimitiveForm {
            id: id.into(),
            ..PrimitiveForm::default()
        }
    }

    fn position_of(session: &EditorSession, id: &str) -> Vec3 {
        let object = session.registry().object_id(id).unwrap();
        session.scene().get(object).unwrap().transform.position
    }

    #[test]
    fn new_session_has_room_only() {
        let session = EditorSession::default();
        assert_eq!(session.scene().count_of(NodeKind::Fixture), 3);
        assert!(session.registry().is_empty());
        assert!(session.selection().is_idle());
        assert!(session.scene().light().is_none());
        assert!(session.scene().events().is_empty());
    }

    #[test]
    fn registry_size_never_exceeds_maximum() {
        let mut session = EditorSession::default();
        for i in 0..25 {
            let _ = session.submit_primitive(&form(&format!("p{i}")));
            assert!(session.registry().len() <= 10);
        }
        assert_eq!(session.registry().len(), 10);
        assert_eq!(session.scene().count_of(NodeKind::Primitive), 10);
    }

    #[test]
    fn empty_identifier_fails_without_mutation() {
        let mut session = EditorSession::default();
        session.submit_primitive(&form("a")).unwrap();
        session.scene_mut().drain_events();

        for blank in ["", "   ", "\t\n"] {
            let err = session.submit_primitive(&form(blank)).unwrap_err();
            assert!(matches!(err, EditError::EmptyIdentifier));
        }
        assert_eq!(session.manipulable_ids(), vec!["a".to_string()]);
        assert!(session.scene().events().is_empty());
    }

    #[test]
    fn duplicate_identifier_replaces_once() {
        let mut session = EditorSession::default();
        session.submit_primitive(&form("a")).unwrap();
        session.submit_primitive(&form("b")).unwrap();
        let before = session.registry().len();

        let mut again = form("a");
        again.kind = "pyramid".into();
        session.submit_primitive(&again).unwrap();

        assert_eq!(session.registry().len(), before);
        assert_eq!(session.scene().count_of(NodeKind::Primitive), before);
        let removed = session
            .scene()
            .events()
            .iter()
            .filter(|e| matches!(e, SceneEvent::NodeRemoved { name, .. } if name == "a"))
            .count();
        assert_eq!(removed, 1);
    }

    #[test]
    fn reject_policy_from_config() {
        let mut session = EditorSession::new(EditorConfig {
            duplicate_policy: DuplicatePolicy::Reject,
            ..EditorConfig::default()
        });
        session.submit_primitive(&form("a")).unwrap();
        let err = session.submit_primitive(&form("a")).unwrap_err();
        assert!(matches!(err, EditError::DuplicateIdentifier(_)));
        assert_eq!(session.registry().len(), 1);
    }

    #[test]
    fn lenient_numeric_coercion() {
        let mut session = EditorSession::default();
        let mut f = form("a");
        f.height = "abc".into();
        f.rotation_x = String::new();
        let record = session.submit_primitive(&f).unwrap();
        assert_eq!(record.height, 1.0);
        assert_eq!(record.rotation.x, 0.0);
    }

    #[test]
    fn documented_submission() {
        let mut session = EditorSession::default();
        let record = session
            .submit_primitive(&PrimitiveForm {
                id: "a".into(),
                kind: "box".into(),
                width: "2".into(),
                height: "".into(),
                depth: "1".into(),
                x: "0".into(),
                y: "".into(),
                z: "0".into(),
                ..PrimitiveForm::default()
            })
            .unwrap();
        assert_eq!((record.width, record.height, record.depth), (2.0, 1.0, 1.0));
        assert_eq!(record.position, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(position_of(&session, "a"), Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn eleventh_submission_is_refused() {
        let mut session = EditorSession::default();
        for i in 0..10 {
            session.submit_primitive(&form(&format!("p{i}"))).unwrap();
        }
        let ids = session.manipulable_ids();
        let err = session.submit_primitive(&form("p10")).unwrap_err();
        assert!(matches!(err, EditError::CapacityExceeded { max: 10 }));
        assert_eq!(session.manipulable_ids(), ids);
    }

    #[test]
    fn select_unknown_keeps_state() {
        let mut session = EditorSession::default();
        session.submit_primitive(&form("a")).unwrap();
        session.select("a").unwrap();

        let err = session.select("never").unwrap_err();
        assert!(matches!(err, EditError::UnknownIdentifier(_)));
        assert_eq!(session.selection().selected_id(), Some("a"));
    }

    #[test]
    fn blank_select_is_ignored() {
        let mut session = EditorSession::default();
        assert!(!session.select("  ").unwrap());
        assert!(session.selection().is_idle());
    }

    #[test]
    fn selecting_b_deselects_a() {
        let mut session = EditorSession::default();
        session.submit_primitive(&form("a")).unwrap();
        session.submit_primitive(&form("b")).unwrap();
        session.select("a").unwrap();
        session.select("b").unwrap();

        assert_eq!(session.selection().selected_id(), Some("b"));
        assert_eq!(session.scene().outlined_count(), 1);
        let b = session.registry().object_id("b").unwrap();
        assert!(session.scene().get(b).unwrap().outline.is_some());
    }

    #[test]
    fn hold_right_then_confirm() {
        let mut session = EditorSession::default();
        session.submit_primitive(&form("a")).unwrap();
        session.select("a").unwrap();
        let start = position_of(&session, "a");

        session.key_down(Key::ArrowRight);
        session.frame();
        session.key_up(Key::ArrowRight);
        assert_eq!(position_of(&session, "a").x, start.x + 0.05);

        session.key_down(Key::Enter);
        assert_eq!(session.frame(), TickOutcome::Released);
        assert!(session.selection().is_idle());
        assert_eq!(session.scene().outlined_count(), 0);
    }

    #[test]
    fn nudging_keeps_record_in_step_with_node() {
        let mut session = EditorSession::default();
        session.submit_primitive(&form("a")).unwrap();
        session.select("a").unwrap();
        session.key_down(Key::ArrowRight);
        session.run_frames(10);

        let record = session.registry().get("a").unwrap().record.position;
        assert_eq!(record, position_of(&session, "a"));
        assert!((record.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn release_all_keys_stops_motion() {
        let mut session = EditorSession::default();
        session.key_down(Key::W);
        session.key_down(Key::Q);
        session.release_all_keys();
        assert!(session.held_keys().is_empty());
        let eye = session.camera().position;
        session.frame();
        assert_eq!(session.camera().position, eye);
    }

    #[test]
    fn room_textures_follow_texture_root() {
        let session = EditorSession::new(EditorConfig {
            texture_root: "/srv/tex".into(),
            ..EditorConfig::default()
        });
        let floor = session
            .scene()
            .nodes()
            .values()
            .find(|n| n.name == "floor")
            .unwrap();
        assert_eq!(
            floor.material,
            Some(roomspace_kernel::Material::Texture {
                path: "/srv/tex/floor.jpg".into()
            })
        );
    }

    #[test]
    fn frame_moves_camera_and_selection_together() {
        let mut session = EditorSession::default();
        session.submit_primitive(&form("a")).unwrap();
        session.select("a").unwrap();
        let eye = session.camera().position;
        let start = position_of(&session, "a");

        session.key_down(Key::Q);
        session.key_down(Key::PageUp);
        session.run_frames(2);

        assert!((session.camera().position.y - (eye.y + 0.2)).abs() < 1e-5);
        assert!((position_of(&session, "a").y - (start.y + 0.1)).abs() < 1e-6);
        assert_eq!(session.frame_count(), 2);
    }

    #[test]
    fn boost_doubles_camera_speed() {
        let mut session = EditorSession::default();
        let eye = session.camera().position;
        session.key_down(Key::Q);
        session.key_down(Key::Space);
        session.frame();
        assert!((session.camera().position.y - (eye.y + 0.2)).abs() < 1e-5);
    }

    #[test]
    fn forward_key_moves_camera_toward_room() {
        let mut session = EditorSession::default();
        let eye = session.camera().position;
        session.key_down(Key::W);
        session.frame();
        let moved = session.camera().position;
        assert!(((moved - eye).length() - 0.1).abs() < 1e-5);
        assert!(moved.z < eye.z);
        assert_eq!(moved.y, eye.y);
    }

    #[test]
    fn frames_without_selection_leave_primitives_alone() {
        let mut session = EditorSession::default();
        session.submit_primitive(&form("a")).unwrap();
        let start = position_of(&session, "a");
        session.key_down(Key::ArrowLeft);
        assert_eq!(session.frame(), TickOutcome::Idle);
        assert_eq!(position_of(&session, "a"), start);
    }

    #[test]
    fn replacing_selected_primitive_clears_selection() {
        let mut session = EditorSession::default();
        session.submit_primitive(&form("a")).unwrap();
        session.select("a").unwrap();
        session.submit_primitive(&form("a")).unwrap();

        assert!(session.selection().is_idle());
        assert_eq!(session.scene().outlined_count(), 0);
        session.key_down(Key::ArrowRight);
        assert_eq!(session.frame(), TickOutcome::Idle);
    }

    #[test]
    fn light_slot_holds_one_light() {
        let mut session = EditorSession::default();
        session.add_light(&LightForm::default());
        let light = session.add_light(&LightForm {
            b: "0".into(),
            ..LightForm::default()
        });
        assert_eq!(light.color, 0xffff00);
        assert_eq!(session.scene().light().unwrap().color, 0xffff00);
        assert!(session.reset_light());
        assert!(!session.reset_light());
    }

    #[test]
    fn import_scales_model_to_room() {
        let mut session = EditorSession::default();
        let obj = "# cube\nv 0 0 0\nv 20 5 2\nvn 0 1 0\nf 1 2 1\n";
        let id = session.import_model_source("statue.obj", obj).unwrap();
        let node = session.scene().get(id).unwrap();
        assert_eq!(node.kind, NodeKind::Model);
        assert_eq!(node.transform.scale, Vec3::splat(0.5));
        assert!(session.registry().is_empty());
        assert!(session.select("statue.obj").is_err());
    }

    #[test]
    fn import_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "v -1 0 -1").unwrap();
        writeln!(file, "v 1 4 1").unwrap();
        let mut session = EditorSession::default();
        let id = session.import_model(file.path()).unwrap();
        assert_eq!(session.scene().get(id).unwrap().transform.scale.x, 2.5);
    }

    #[test]
    fn import_failures_are_recoverable() {
        let mut session = EditorSession::default();
        let err = session.import_model_source("empty.obj", "# nothing\n").unwrap_err();
        assert!(matches!(err, EditError::Import(_)));
        let err = session.import_model("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, EditError::Import(_)));
        assert!(session.submit_primitive(&form("a")).is_ok());
    }

    #[test]
    fn texture_root_from_config() {
        let mut session = EditorSession::new(EditorConfig {
            texture_root: "/srv/tex/".into(),
            ..EditorConfig::default()
        });
        let mut f = form("t");
        f.attribute = "texture".into();
        f.attribute_value = "brick.jpg".into();
        session.submit_primitive(&f).unwrap();
        let object = session.registry().object_id("t").unwrap();
        let node = session.scene().get(object).unwrap();
        assert_eq!(
            node.material,
            Some(roomspace_kernel::Material::Texture {
                path: "/srv/tex/brick.jpg".into()
            })
        );
    }
}
