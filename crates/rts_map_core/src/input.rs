//! Host-independent pointer events fed to tools

use crate::TileCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
}

/// Press lifecycle of a button within one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonPhase {
    /// Pressed this frame
    Down,
    /// Still pressed
    Held,
    /// Released this frame
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// A button event at a (possibly out-of-map) cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub button: PointerButton,
    pub phase: ButtonPhase,
    pub coord: TileCoord,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(button: PointerButton, phase: ButtonPhase, coord: TileCoord) -> Self {
        Self {
            button,
            phase,
            coord,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn left(phase: ButtonPhase, coord: TileCoord) -> Self {
        Self::new(PointerButton::Left, phase, coord)
    }

    pub fn right(phase: ButtonPhase, coord: TileCoord) -> Self {
        Self::new(PointerButton::Right, phase, coord)
    }
}
