//! Axis-aligned clipping box appended to an open constraint set so the walker
//! sees a bounded region.

use nalgebra::Vector2;

use super::types::Hs2;

/// Optional box sides; unset sides add no constraint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
}

impl BoundingBox {
    /// Box with all four sides set.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin: Some(xmin),
            xmax: Some(xmax),
            ymin: Some(ymin),
            ymax: Some(ymax),
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Half-planes in the order xmin, xmax, ymin, ymax (set sides only).
    pub fn halfplanes(&self) -> Vec<Hs2> {
        let mut out = Vec::with_capacity(4);
        if let Some(xmin) = self.xmin {
            out.push(Hs2::new(Vector2::new(-1.0, 0.0), -xmin));
        }
        if let Some(xmax) = self.xmax {
            out.push(Hs2::new(Vector2::new(1.0, 0.0), xmax));
        }
        if let Some(ymin) = self.ymin {
            out.push(Hs2::new(Vector2::new(0.0, -1.0), -ymin));
        }
        if let Some(ymax) = self.ymax {
            out.push(Hs2::new(Vector2::new(0.0, 1.0), ymax));
        }
        out
    }

    /// `constraints` followed by the box half-planes.
    pub fn append_to(&self, constraints: &[Hs2]) -> Vec<Hs2> {
        let mut out = constraints.to_vec();
        out.extend(self.halfplanes());
        out
    }
}
