//! Matrix composition for the part hierarchy.
//!
//! Every body part is positioned by a single 4x4 model matrix built by
//! right-multiplying local operations onto a copy of the parent's matrix.
//! [`Transform`] is that accumulator: a small `Copy` value, so "copy the
//! parent and append" is just method chaining and composition stays a pure
//! function of its inputs.

use glam::{Mat4, Vec3, Vec4};

/// A model transform built by right-multiplying local operations.
///
/// Operations apply in call order when the matrix is used on a vertex:
/// `Transform::IDENTITY.translate(..).rotate_x(..).scale(..)` produces
/// `T * R * S`, so the translation acts last on the vertex. Order is
/// significant; swapping a rotate and a scale yields a different matrix.
///
/// All rotation angles are in degrees.
///
/// # Example
///
/// ```
/// use blockling::Transform;
///
/// let parent = Transform::IDENTITY.scale(0.4, 0.4, 0.4);
/// let child = parent.translate(1.0, 0.0, 0.0).scale(0.5, 0.5, 0.5);
///
/// // The parent copy is untouched by the child chain.
/// assert_ne!(parent.matrix(), child.matrix());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        matrix: Mat4::IDENTITY,
    };

    /// Append a translation.
    pub fn translate(self, x: f32, y: f32, z: f32) -> Self {
        Self {
            matrix: self.matrix * Mat4::from_translation(Vec3::new(x, y, z)),
        }
    }

    /// Append a rotation about the x axis, in degrees.
    pub fn rotate_x(self, degrees: f32) -> Self {
        Self {
            matrix: self.matrix * Mat4::from_rotation_x(degrees.to_radians()),
        }
    }

    /// Append a rotation about the y axis, in degrees.
    pub fn rotate_y(self, degrees: f32) -> Self {
        Self {
            matrix: self.matrix * Mat4::from_rotation_y(degrees.to_radians()),
        }
    }

    /// Append an axis-aligned scale.
    pub fn scale(self, x: f32, y: f32, z: f32) -> Self {
        Self {
            matrix: self.matrix * Mat4::from_scale(Vec3::new(x, y, z)),
        }
    }

    /// The accumulated matrix.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Map a local point (w = 1) through the accumulated matrix.
    pub fn point(&self, x: f32, y: f32, z: f32) -> Vec3 {
        (self.matrix * Vec4::new(x, y, z, 1.0)).truncate()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
