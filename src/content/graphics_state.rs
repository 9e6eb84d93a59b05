//! Transformation matrices and the text state that positions glyphs.

/// A 2D affine transformation matrix `[a b c d e f]`.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Horizontal scaling component
    pub a: f32,
    /// Rotation/skew component
    pub b: f32,
    /// Rotation/skew component
    pub c: f32,
    /// Vertical scaling component
    pub d: f32,
    /// Horizontal translation
    pub e: f32,
    /// Vertical translation
    pub f: f32,
}

impl Matrix {
    /// Create an identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use statsheet::content::Matrix;
    ///
    /// let m = Matrix::identity();
    /// assert_eq!(m.a, 1.0);
    /// assert_eq!(m.e, 0.0);
    /// ```
    pub fn identity() -> Self {
        Self::from_array([1.0, 0.0, 0.0, 1.0, 0.0, 0.0])
    }

    /// Create a translation matrix.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::from_array([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// Build from the six operands of `cm` or `Tm`.
    pub fn from_array(m: [f32; 6]) -> Self {
        Self {
            a: m[0],
            b: m[1],
            c: m[2],
            d: m[3],
            e: m[4],
            f: m[5],
        }
    }

    /// Multiply this matrix with another matrix.
    ///
    /// The result represents first applying `self`, then applying `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use statsheet::content::Matrix;
    ///
    /// let text = Matrix::translation(10.0, 0.0);
    /// let ctm = Matrix::from_array([2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    /// let m = text.multiply(&ctm);
    /// assert_eq!(m.e, 20.0);
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Transform a point.
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Graphics state parameters that matter for text placement.
#[derive(Debug, Clone)]
pub struct GraphicsState {
    /// Current transformation matrix
    pub ctm: Matrix,
    /// Character spacing (Tc)
    pub char_space: f32,
    /// Word spacing (Tw)
    pub word_space: f32,
    /// Horizontal scaling percentage (Tz)
    pub horizontal_scaling: f32,
    /// Text leading (TL)
    pub leading: f32,
    /// Current font resource name
    pub font_name: Option<String>,
    /// Current font size (Tf)
    pub font_size: f32,
    /// Text rise (Ts)
    pub text_rise: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::identity(),
            char_space: 0.0,
            word_space: 0.0,
            horizontal_scaling: 100.0,
            leading: 0.0,
            font_name: None,
            font_size: 12.0,
            text_rise: 0.0,
        }
    }
}

/// Stack of graphics states for `q`/`Q`.
///
/// An unbalanced `Q` leaves the bottom state in place.
#[derive(Debug, Clone)]
pub struct GraphicsStateStack {
    stack: Vec<GraphicsState>,
}

impl GraphicsStateStack {
    /// Create a stack holding one state.
    pub fn new(initial: GraphicsState) -> Self {
        Self { stack: vec![initial] }
    }

    /// Current state.
    pub fn current(&self) -> &GraphicsState {
        // The stack never drops below one entry.
        &self.stack[self.stack.len() - 1]
    }

    /// Mutable current state.
    pub fn current_mut(&mut self) -> &mut GraphicsState {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Push a copy of the current state (`q`).
    pub fn save(&mut self) {
        let top = self.current().clone();
        self.stack.push(top);
    }

    /// Pop the current state (`Q`).
    pub fn restore(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            log::debug!("unbalanced Q operator ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_translation_then_scale() {
        let t = Matrix::translation(5.0, 10.0);
        let s = Matrix::from_array([2.0, 0.0, 0.0, 3.0, 0.0, 0.0]);
        let m = t.multiply(&s);
        assert_eq!(m.transform_point(0.0, 0.0), (10.0, 30.0));
    }

    #[test]
    fn test_stack_save_restore() {
        let mut stack = GraphicsStateStack::new(GraphicsState::default());
        stack.save();
        stack.current_mut().font_size = 8.0;
        stack.restore();
        assert_eq!(stack.current().font_size, 12.0);
        stack.restore();
        assert_eq!(stack.current().font_size, 12.0);
    }
}
