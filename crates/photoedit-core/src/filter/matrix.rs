//! 4×5 affine color matrices.
//!
//! A matrix is stored row-major as 20 coefficients. Rows produce the R, G, B
//! and A output channels; the first four columns weight the R, G, B, A input
//! channels and the fifth column is a bias in 0-255 units:
//!
//! ```text
//! R' = a*R + b*G + c*B + d*A + e
//! G' = f*R + g*G + h*B + i*A + j
//! B' = k*R + l*G + m*B + n*A + o
//! A' = p*R + q*G + r*B + s*A + t
//! ```
//!
//! Every output channel is rounded and clamped to [0, 255] so that matrices
//! which overshoot (brightening, contrast, tints) saturate instead of wrapping.

/// Luminance weights used when building saturation matrices.
const SAT_LUM_R: f32 = 0.213;
const SAT_LUM_G: f32 = 0.715;
const SAT_LUM_B: f32 = 0.072;

/// A 4×5 color transform applied per RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    m: [f32; 20],
}

impl ColorMatrix {
    /// The identity transform (output = input).
    pub const IDENTITY: ColorMatrix = ColorMatrix {
        m: [
            1.0, 0.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0, //
        ],
    };

    /// Build a matrix from its 20 row-major coefficients.
    pub const fn new(m: [f32; 20]) -> Self {
        Self { m }
    }

    /// Build a matrix from the three color rows; alpha passes through.
    pub const fn from_rows(r: [f32; 5], g: [f32; 5], b: [f32; 5]) -> Self {
        Self {
            m: [
                r[0], r[1], r[2], r[3], r[4], //
                g[0], g[1], g[2], g[3], g[4], //
                b[0], b[1], b[2], b[3], b[4], //
                0.0, 0.0, 0.0, 1.0, 0.0, //
            ],
        }
    }

    /// Per-channel multiplier with no bias.
    pub const fn scale(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            m: [
                r, 0.0, 0.0, 0.0, 0.0, //
                0.0, g, 0.0, 0.0, 0.0, //
                0.0, 0.0, b, 0.0, 0.0, //
                0.0, 0.0, 0.0, a, 0.0, //
            ],
        }
    }

    /// Saturation matrix: 0 is grayscale, 1 is identity, >1 oversaturates.
    pub fn saturation(sat: f32) -> Self {
        let inv = 1.0 - sat;
        let r = SAT_LUM_R * inv;
        let g = SAT_LUM_G * inv;
        let b = SAT_LUM_B * inv;
        Self::from_rows(
            [r + sat, g, b, 0.0, 0.0],
            [r, g + sat, b, 0.0, 0.0],
            [r, g, b + sat, 0.0, 0.0],
        )
    }

    /// Raw coefficients, row-major.
    pub fn coefficients(&self) -> &[f32; 20] {
        &self.m
    }

    /// True when this matrix is exactly the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Transform a single RGBA pixel.
    #[inline]
    pub fn apply_to_pixel(&self, px: [u8; 4]) -> [u8; 4] {
        let input = [px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32];
        let mut out = [0u8; 4];
        for (channel, row) in out.iter_mut().zip(self.m.chunks_exact(5)) {
            let v = row[0] * input[0]
                + row[1] * input[1]
                + row[2] * input[2]
                + row[3] * input[3]
                + row[4];
            *channel = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}
