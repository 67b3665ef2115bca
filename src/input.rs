//! Logical input actions.
//!
//! The simulation never looks at keys.  It asks an [`ActionInput`] snapshot
//! whether an [`Action`] is held, was just pressed, or was just released.
//! Keyboard state is folded into an [`InputLatch`] every rendered frame and
//! handed to the fixed-rate tick, which takes the accumulated edges so that a
//! tap between two ticks is never lost.

use bevy::prelude::*;

/// Everything the player can ask the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    TurnLeft,
    TurnRight,
    Thrust,
    Reverse,
    Fire,
    Shield,
    Hyperspace,
    Restart,
    Quit,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::TurnLeft,
        Action::TurnRight,
        Action::Thrust,
        Action::Reverse,
        Action::Fire,
        Action::Shield,
        Action::Hyperspace,
        Action::Restart,
        Action::Quit,
    ];

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Action state for one simulation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionInput {
    held: u16,
    pressed: u16,
    released: u16,
}

impl ActionInput {
    pub fn held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed & action.bit() != 0
    }

    pub fn just_released(&self, action: Action) -> bool {
        self.released & action.bit() != 0
    }

    /// Marks `action` as pressed this tick (and held).
    pub fn press(&mut self, action: Action) {
        self.held |= action.bit();
        self.pressed |= action.bit();
    }

    /// Marks `action` as held without a fresh press edge.
    pub fn hold(&mut self, action: Action) {
        self.held |= action.bit();
    }

    /// Marks `action` as released this tick.
    pub fn release(&mut self, action: Action) {
        self.held &= !action.bit();
        self.released |= action.bit();
    }

    /// Builder form of [`ActionInput::hold`].
    pub fn with_held(mut self, action: Action) -> Self {
        self.hold(action);
        self
    }

    /// Builder form of [`ActionInput::press`].
    pub fn with_pressed(mut self, action: Action) -> Self {
        self.press(action);
        self
    }

    /// Builder form of [`ActionInput::release`].
    pub fn with_released(mut self, action: Action) -> Self {
        self.release(action);
        self
    }

    /// Same held state, no edges.
    pub fn without_edges(self) -> Self {
        Self {
            held: self.held,
            pressed: 0,
            released: 0,
        }
    }
}

/// Default keyboard layout.
pub const KEY_BINDINGS: &[(KeyCode, Action)] = &[
    (KeyCode::ArrowLeft, Action::TurnLeft),
    (KeyCode::KeyA, Action::TurnLeft),
    (KeyCode::ArrowRight, Action::TurnRight),
    (KeyCode::KeyD, Action::TurnRight),
    (KeyCode::ArrowUp, Action::Thrust),
    (KeyCode::KeyW, Action::Thrust),
    (KeyCode::ArrowDown, Action::Reverse),
    (KeyCode::Space, Action::Fire),
    (KeyCode::KeyS, Action::Shield),
    (KeyCode::KeyH, Action::Hyperspace),
    (KeyCode::Space, Action::Restart),
    (KeyCode::Enter, Action::Restart),
    (KeyCode::KeyQ, Action::Quit),
    (KeyCode::Escape, Action::Quit),
];

/// Input accumulated since the last fixed tick.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputLatch {
    current: ActionInput,
}

impl InputLatch {
    /// Snapshot for the next tick; edges are cleared, held state is kept.
    pub fn take(&mut self) -> ActionInput {
        let snapshot = self.current;
        self.current = snapshot.without_edges();
        snapshot
    }

    pub fn peek(&self) -> ActionInput {
        self.current
    }
}

/// Folds this frame's keyboard state into the latch.
pub fn latch_input_system(keys: Res<ButtonInput<KeyCode>>, mut latch: ResMut<InputLatch>) {
    let mut held = 0u16;
    for &(key, action) in KEY_BINDINGS {
        if keys.pressed(key) {
            held |= action.bit();
        }
        if keys.just_pressed(key) {
            latch.current.pressed |= action.bit();
        }
        if keys.just_released(key) {
            latch.current.released |= action.bit();
        }
    }
    latch.current.held = held;
}
