use std::f64::consts::SQRT_2;

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Path, Polygon, PolygonSet, Transform2};
use crate::math::Point;

/// Patterned ground shield inside a square outline of side `diameter`.
///
/// The square is cut by its two diagonals into four triangular sectors.
/// Each sector carries parallel fingers running from the diagonals to the
/// outline edge, one spacing apart; the diagonals themselves are solid
/// spines of finger width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldGrid {
    pub diameter: f64,
    pub finger_width: f64,
    pub finger_spacing: f64,
}

/// Generated shield geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ShieldPattern {
    /// Fingers of all four sectors, sector by sector.
    pub fingers: PolygonSet,
    /// The two diagonal spines, clipped to the outline.
    pub spines: PolygonSet,
}

impl ShieldGrid {
    #[must_use]
    pub fn new(diameter: f64, finger_width: f64, finger_spacing: f64) -> Self {
        Self {
            diameter,
            finger_width,
            finger_spacing,
        }
    }

    fn validate(&self) -> Result<()> {
        let ok = [self.diameter, self.finger_width, self.finger_spacing]
            .iter()
            .all(|v| *v > 0.0 && v.is_finite());
        if ok && 2.0 * self.finger_spacing < 0.5 * self.diameter {
            Ok(())
        } else {
            Err(OperationError::InvalidInput(format!(
                "shield {}/{}/{} leaves no room for fingers",
                self.diameter, self.finger_width, self.finger_spacing
            ))
            .into())
        }
    }

    /// Fingers of the sector facing `+x`, walked from the lower corner up.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for non-positive parameters.
    pub fn sector_fingers(&self) -> Result<Vec<Polygon>> {
        self.validate()?;
        let r = 0.5 * self.diameter;
        let (w, s) = (self.finger_width, self.finger_spacing);
        let pitch = w + s;
        let clearance = s / SQRT_2;

        let mut fingers = Vec::new();
        for k in 0_u32.. {
            let y_lo = -r + s + f64::from(k) * pitch;
            let y_hi = y_lo + w;
            if y_hi > r - s {
                break;
            }
            let x_in = y_lo.abs().max(y_hi.abs()) + clearance;
            if x_in >= r {
                continue;
            }
            fingers.push(Polygon::rectangle(Point::new(x_in, y_lo), Point::new(r, y_hi)));
        }
        Ok(fingers)
    }

    /// Builds all four sectors and the spines.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for non-positive parameters
    /// and propagates Boolean errors.
    pub fn execute(&self) -> Result<ShieldPattern> {
        let sector = self.sector_fingers()?;
        let fingers: PolygonSet = [0.0, 90.0, 180.0, 270.0]
            .into_iter()
            .flat_map(|angle| sector.iter().map(move |f| f.rotate(Point::origin(), angle)))
            .collect();

        let r = 0.5 * self.diameter;
        let outline = Polygon::rectangle(Point::new(-r, -r), Point::new(r, r));
        let rising = Path::new(vec![Point::new(-r, -r), Point::new(r, r)])?.thicken(self.finger_width)?;
        let falling = rising.rotate(Point::origin(), 90.0);
        let spines = rising
            .union(&falling)?
            .intersection(&outline.to_set())?;

        debug!(
            fingers = fingers.len(),
            per_sector = sector.len(),
            spines = spines.len(),
            "shield generated"
        );
        Ok(ShieldPattern { fingers, spines })
    }
}
