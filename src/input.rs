//! Live user input read by the chain once per frame.

use std::sync::{Arc, Mutex};

use cgmath::prelude::*;
use cgmath::Vector3;

use super::vector;

/// Force applied per pixel of horizontal drag.
pub const DRAG_FORCE_SCALE: f32 = 100.;

/// The values an input source may change between frames.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Controls {
    /// Force applied to the free end of the chain.
    pub external_force: Vector3<f32>,
    /// View rotation about the vertical axis, in degrees. Only affects the
    /// render transforms.
    pub rotation_y: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Controls { external_force: Vector3::zero(), rotation_y: 0. }
    }
}

/// Controls shared between an input thread and the frame loop.
///
/// For front ends that handle pointer events on a different thread than the
/// one calling [`Chain::step`](crate::Chain::step): the input side writes
/// through [`update`](Self::update) and the frame loop passes a
/// [`snapshot`](Self::snapshot) into each step.
#[derive(Clone, Debug, Default)]
pub struct SharedControls(Arc<Mutex<Controls>>);

impl SharedControls {
    /// Copy of the current values, read under one lock so the force and the
    /// angle always come from the same write.
    pub fn snapshot(&self) -> Controls {
        *self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn update<F: FnOnce(&mut Controls)>(&self, f: F) {
        let mut controls = self.0.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut controls);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MouseButton {
    Primary,
    Secondary,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Drag {
    None,
    Force { start_x: f32 },
    Rotate { start_x: f32, start_angle: f32 },
}

/// Turns pointer events into controls: a primary drag tugs the free end
/// sideways, a secondary drag spins the view.
#[derive(Copy, Clone, Debug)]
pub struct DragInput {
    drag: Drag,
}

impl Default for DragInput {
    fn default() -> Self {
        DragInput { drag: Drag::None }
    }
}

impl DragInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, controls: &mut Controls, button: MouseButton, x: f32) {
        self.drag = match button {
            MouseButton::Primary => Drag::Force { start_x: x },
            MouseButton::Secondary => Drag::Rotate { start_x: x, start_angle: controls.rotation_y },
        };
    }

    pub fn release(&mut self, controls: &mut Controls, button: MouseButton) {
        match (button, self.drag) {
            (MouseButton::Primary, Drag::Force { .. }) => {
                self.drag = Drag::None;
                controls.external_force = Vector3::zero();
            }
            (MouseButton::Secondary, Drag::Rotate { .. }) => self.drag = Drag::None,
            _ => {}
        }
    }

    pub fn move_to(&mut self, controls: &mut Controls, x: f32) {
        match self.drag {
            Drag::Force { start_x } => {
                // Only the X component is replaced before rotating; the rest
                // carries over from the previous move.
                let mut force = controls.external_force;
                force.x = (x - start_x) * DRAG_FORCE_SCALE;
                controls.external_force = vector::rotate_y(force, controls.rotation_y);
            }
            Drag::Rotate { start_x, start_angle } => {
                controls.rotation_y = start_angle + start_x - x;
            }
            Drag::None => {}
        }
    }

    /// Pointer left the view: drop any drag and the force with it.
    pub fn leave(&mut self, controls: &mut Controls) {
        self.drag = Drag::None;
        controls.external_force = Vector3::zero();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != Drag::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_drag_sets_and_clears_force() {
        let mut controls = Controls::default();
        let mut input = DragInput::new();
        input.press(&mut controls, MouseButton::Primary, 10.);
        input.move_to(&mut controls, 13.);
        assert_eq!(controls.external_force, Vector3::new(300., 0., 0.));
        input.release(&mut controls, MouseButton::Primary);
        assert_eq!(controls.external_force, Vector3::zero());
        assert!(!input.is_dragging());
    }

    #[test]
    fn drag_force_follows_view_rotation() {
        let mut controls = Controls { rotation_y: 90., ..Controls::default() };
        let mut input = DragInput::new();
        input.press(&mut controls, MouseButton::Primary, 0.);
        input.move_to(&mut controls, 1.);
        assert!((controls.external_force - Vector3::new(0., 0., 100.)).magnitude() < 1e-3);
    }

    #[test]
    fn secondary_drag_rotates_from_saved_angle() {
        let mut controls = Controls { rotation_y: 30., ..Controls::default() };
        let mut input = DragInput::new();
        input.press(&mut controls, MouseButton::Secondary, 100.);
        input.move_to(&mut controls, 80.);
        assert_eq!(controls.rotation_y, 50.);
        input.move_to(&mut controls, 110.);
        assert_eq!(controls.rotation_y, 20.);
        assert_eq!(controls.external_force, Vector3::zero());
    }

    #[test]
    fn leave_drops_force() {
        let mut controls = Controls::default();
        let mut input = DragInput::new();
        input.press(&mut controls, MouseButton::Primary, 0.);
        input.move_to(&mut controls, -5.);
        input.leave(&mut controls);
        assert_eq!(controls.external_force, Vector3::zero());
        input.move_to(&mut controls, 50.);
        assert_eq!(controls.external_force, Vector3::zero());
    }

    #[test]
    fn shared_snapshot_sees_updates() {
        let shared = SharedControls::default();
        let writer = shared.clone();
        std::thread::spawn(move || writer.update(|c| c.rotation_y = 45.))
            .join()
            .unwrap();
        assert_eq!(shared.snapshot().rotation_y, 45.);
    }
}
