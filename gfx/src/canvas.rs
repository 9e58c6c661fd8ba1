//! Logical drawing surface: native panel size plus rotation

use log::debug;
use shared::Rotation;

/// Dimensions seen by the drawing routines.
///
/// The panel's native size never changes; odd rotations report it
/// transposed. Mapping logical coordinates onto the panel is the
/// driver's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    native_width: i16,
    native_height: i16,
    rotation: Rotation,
}

impl Canvas {
    pub const fn new(width: i16, height: i16) -> Self {
        Self {
            native_width: width,
            native_height: height,
            rotation: Rotation::Deg0,
        }
    }

    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the rotation in quarter turns; only the low two bits are used
    pub fn set_rotation(&mut self, quarter_turns: u8) {
        self.rotation = Rotation::from_index(quarter_turns);
        debug!(
            "rotation {:?}: {}x{}",
            self.rotation,
            self.width(),
            self.height()
        );
    }

    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Width after rotation
    pub const fn width(&self) -> i16 {
        self.rotation.apply(self.native_width, self.native_height).0
    }

    /// Height after rotation
    pub const fn height(&self) -> i16 {
        self.rotation.apply(self.native_width, self.native_height).1
    }

    /// Unrotated panel size
    pub const fn native_size(&self) -> (i16, i16) {
        (self.native_width, self.native_height)
    }

    pub const fn contains(&self, x: i16, y: i16) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }
}
