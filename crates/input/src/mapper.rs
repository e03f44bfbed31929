use glam::Vec3;

use crate::key::{HeldKeys, Key};

/// Turns the held-key set into a per-tick delta.
///
/// Both the fly camera and the selected-object nudge run through this on
/// every frame; the frame driver polls [`HeldKeys`] once and hands it to each.
pub trait InputMapper {
    type Delta;

    fn map(&self, keys: &HeldKeys) -> Self::Delta;
}

/// -1, 0 or +1 depending on which of the two keys is held. Both held cancel.
pub fn axis(keys: &HeldKeys, negative: Key, positive: Key) -> f32 {
    let mut value = 0.0;
    if keys.is_held(negative) {
        value -= 1.0;
    }
    if keys.is_held(positive) {
        value += 1.0;
    }
    value
}

/// Distances to move the camera this tick, in camera-relative terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraDelta {
    /// Along the horizontal look direction.
    pub forward: f32,
    /// Along the horizontal right vector.
    pub right: f32,
    /// Along world up.
    pub up: f32,
}

impl CameraDelta {
    pub fn is_zero(&self) -> bool {
        self.forward == 0.0 && self.right == 0.0 && self.up == 0.0
    }
}

/// WASD flight with `q`/`e` for vertical motion and Space as the speed boost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMapper {
    /// Distance per tick without the boost.
    pub speed: f32,
    /// Factor applied to `speed` while Space is held.
    pub boost_multiplier: f32,
}

impl Default for CameraMapper {
    fn default() -> Self {
        Self {
            speed: 0.1,
            boost_multiplier: 2.0,
        }
    }
}

impl CameraMapper {
    pub fn current_speed(&self, keys: &HeldKeys) -> f32 {
        if keys.is_held(Key::Space) {
            self.speed * self.boost_multiplier
        } else {
            self.speed
        }
    }
}

impl InputMapper for CameraMapper {
    type Delta = CameraDelta;

    fn map(&self, keys: &HeldKeys) -> CameraDelta {
        let speed = self.current_speed(keys);
        CameraDelta {
            forward: axis(keys, Key::S, Key::W) * speed,
            right: axis(keys, Key::A, Key::D) * speed,
            up: axis(keys, Key::E, Key::Q) * speed,
        }
    }
}

/// What the selected object should do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nudge {
    /// Confirm key held: leave editing mode without moving.
    Exit,
    /// Move by this world-space offset (possibly zero).
    Translate(Vec3),
}

/// Arrow keys move on the floor plane, PageUp/PageDown move vertically,
/// Enter confirms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NudgeMapper {
    pub step: f32,
}

impl Default for NudgeMapper {
    fn default() -> Self {
        Self { step: 0.05 }
    }
}

impl InputMapper for NudgeMapper {
    type Delta = Nudge;

    fn map(&self, keys: &HeldKeys) -> Nudge {
        if keys.is_held(Key::Enter) {
            return Nudge::Exit;
        }
        Nudge::Translate(
            Vec3::new(
                axis(keys, Key::ArrowLeft, Key::ArrowRight),
                axis(keys, Key::PageDown, Key::PageUp),
                axis(keys, Key::ArrowUp, Key::ArrowDown),
            ) * self.step,
        )
    }
}
