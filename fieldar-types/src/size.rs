//! 2d size of a rendering surface.

use num_traits::real::Real;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Width and height of a rendering surface. Values are clamped to be
/// non-negative on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Size<Num: num_traits::Num + PartialOrd + Copy = f64> {
    width: Num,
    height: Num,
}

impl<Num: Real + FromPrimitive> Size<Num> {
    /// Creates a new size. Negative values are replaced with zero.
    pub fn new(width: Num, height: Num) -> Self {
        Self {
            width: width.max(Num::zero()),
            height: height.max(Num::zero()),
        }
    }

    /// Width of the surface.
    pub fn width(&self) -> Num {
        self.width
    }

    /// Half of the width of the surface.
    pub fn half_width(&self) -> Num {
        self.width / Num::from_f64(2.0).unwrap_or(Num::one())
    }

    /// Height of the surface.
    pub fn height(&self) -> Num {
        self.height
    }

    /// Half of the height of the surface.
    pub fn half_height(&self) -> Num {
        self.height / Num::from_f64(2.0).unwrap_or(Num::one())
    }

    /// True if either of the dimensions is zero.
    pub fn is_zero(&self) -> bool {
        self.width.is_zero() || self.height.is_zero()
    }
}
