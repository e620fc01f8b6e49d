//! Material template and per-plane uniform state.
//!
//! One immutable template describes the shader pair and uniform defaults;
//! every plane gets its own [`MaterialState`] from the factory so hover state
//! never aliases between planes. Texture bindings and GPU handles live on the
//! wasm side; this module is only the CPU-side uniform values.

use glam::Vec2;

/// What to do with a plane's hover uniform when the pointer stops hitting
/// anything. The original effect never reset it (hovered planes stay warped
/// until the pointer finds another one), so `Sticky` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverMode {
    #[default]
    Sticky,
    /// Recenter hover on a miss so displacement fades at the plane's middle.
    Reset,
}

/// Immutable description shared by every plane's material.
#[derive(Debug, Clone, Copy)]
pub struct MaterialTemplate {
    pub vertex_source: &'static str,
    pub fragment_source: &'static str,
    pub initial_hover: Vec2,
}

impl MaterialTemplate {
    pub fn new(vertex_source: &'static str, fragment_source: &'static str) -> Self {
        Self {
            vertex_source,
            fragment_source,
            initial_hover: Vec2::new(0.5, 0.5),
        }
    }

    /// Produce an independent per-plane uniform instance.
    pub fn instantiate(&self) -> MaterialState {
        MaterialState {
            hover: self.initial_hover,
            initial_hover: self.initial_hover,
        }
    }
}

/// Mutable per-plane uniform values.
#[derive(Debug, Clone, Copy)]
pub struct MaterialState {
    hover: Vec2,
    initial_hover: Vec2,
}

impl MaterialState {
    pub fn hover(&self) -> Vec2 {
        self.hover
    }

    /// Called with the hit UV when this plane is the nearest intersection.
    pub fn set_hover(&mut self, uv: Vec2) {
        self.hover = uv;
    }

    /// Called on every plane when the pointer hits nothing.
    pub fn on_miss(&mut self, mode: HoverMode) {
        if mode == HoverMode::Reset {
            self.hover = self.initial_hover;
        }
    }
}
