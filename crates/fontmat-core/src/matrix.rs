//! The 2x2 heart of a glyph transform
//!
//! Rotation, scale, and shear for glyph outlines live in four scalars.
//! Translation belongs to glyph positioning, not to this type. Every
//! builder pre-multiplies, so transforms compose in the order the
//! calls are made: `scale` then `rotate` means "scale, then rotate".

use std::ops::Mul;

/// A 2x2 linear map over glyph coordinates
///
/// Plain value type with exact field-wise equality. Two matrices that
/// differ in the last bit are distinct as far as cache identity is
/// concerned, so no epsilon creeps in here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub xx: f64,
    pub xy: f64,
    pub yx: f64,
    pub yy: f64,
}

impl Matrix {
    /// The do-nothing transform
    pub const IDENTITY: Matrix = Matrix {
        xx: 1.0,
        xy: 0.0,
        yx: 0.0,
        yy: 1.0,
    };

    pub const fn new(xx: f64, xy: f64, yx: f64, yy: f64) -> Self {
        Self { xx, xy, yx, yy }
    }

    /// Standard 2x2 product `a * b`, computed into a fresh value
    pub fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
        Matrix {
            xx: a.xx * b.xx + a.xy * b.yx,
            xy: a.xx * b.xy + a.xy * b.yy,
            yx: a.yx * b.xx + a.yy * b.yx,
            yy: a.yx * b.xy + a.yy * b.yy,
        }
    }

    /// Rotate by an angle given as its cosine and sine
    ///
    /// Glyph space runs with the Y axis pointing down, so the sine
    /// signs are swapped from the textbook rotation: a positive angle
    /// must still read as a counter-clockwise turn on screen.
    pub fn rotate(&mut self, cos: f64, sin: f64) {
        let r = Matrix::new(cos, -sin, sin, cos);
        *self = Matrix::multiply(&r, self);
    }

    /// Scale X and Y independently
    pub fn scale(&mut self, sx: f64, sy: f64) {
        let r = Matrix::new(sx, 0.0, 0.0, sy);
        *self = Matrix::multiply(&r, self);
    }

    /// Shear horizontally by `shear_x` and vertically by `shear_y`
    pub fn shear(&mut self, shear_x: f64, shear_y: f64) {
        let r = Matrix::new(1.0, shear_x, shear_y, 1.0);
        *self = Matrix::multiply(&r, self);
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        Matrix::multiply(&self, &rhs)
    }
}
