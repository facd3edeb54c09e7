//! CPU-side transform stack with GL fixed-function semantics
//!
//! Core-profile GL has no matrix stack, so the GLFW platform keeps one here and
//! hands the top matrix to whoever renders the overlay.

pub use nalgebra::Matrix4;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// A push/pop stack of 4x4 transforms that always holds at least one entry
#[derive(Debug, Clone, PartialEq)]
pub struct TransformStack {
    stack: Vec<Mat4>,
}

impl TransformStack {
    /// Create a stack holding a single identity matrix
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::identity()],
        }
    }

    /// Duplicate the top entry
    pub fn push(&mut self) {
        let top = *self.top();
        self.stack.push(top);
    }

    /// Remove the top entry
    ///
    /// The base entry is never removed. Returns `false` on underflow, leaving
    /// the stack untouched.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    /// Multiply the top entry by an orthographic projection
    ///
    /// Same parameter order and mapping as `glOrtho`.
    pub fn ortho(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        let projection = Mat4::new_orthographic(left, right, bottom, top, near, far);
        let current = self.top_mut();
        *current *= projection;
    }

    /// The current transform
    pub fn top(&self) -> &Mat4 {
        // Never empty: pop() keeps the base entry.
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Number of entries, including the base entry
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    #[test]
    fn test_new_stack_is_identity() {
        let stack = TransformStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.top(), Mat4::identity());
    }

    #[test]
    fn test_pop_never_removes_base() {
        let mut stack = TransformStack::new();
        assert!(!stack.pop());
        assert_eq!(stack.depth(), 1);

        stack.push();
        assert_eq!(stack.depth(), 2);
        assert!(stack.pop());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_push_isolates_changes() {
        let mut stack = TransformStack::new();
        stack.push();
        stack.ortho(0.0, 100.0, 50.0, 0.0, -1.0, 1.0);
        assert_ne!(*stack.top(), Mat4::identity());

        stack.pop();
        assert_eq!(*stack.top(), Mat4::identity());
    }

    #[test]
    fn test_ortho_maps_top_left_origin() {
        let mut stack = TransformStack::new();
        stack.ortho(0.0, 1280.0, 720.0, 0.0, -1.0, 1.0);
        let m = stack.top();

        let top_left = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(top_left.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(top_left.y, 1.0, epsilon = 1e-6);

        let bottom_right = m * Vector4::new(1280.0, 720.0, 0.0, 1.0);
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(bottom_right.y, -1.0, epsilon = 1e-6);

        let center = m * Vector4::new(640.0, 360.0, 0.0, 1.0);
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_frame_bracket_stays_balanced() {
        let mut stack = TransformStack::new();
        for _ in 0..3 {
            stack.pop();
            stack.push();
            stack.ortho(0.0, 640.0, 480.0, 0.0, -1.0, 1.0);
            assert_eq!(stack.depth(), 2);
        }
    }
}
