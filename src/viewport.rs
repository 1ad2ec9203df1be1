use kurbo::Point;

use crate::{
    curve::RawCurve,
    error::{SpiroError, SpiroResult},
};

/// Fraction of the viewport the fitted curve may occupy on its longer axis.
pub const DEFAULT_MARGIN_FACTOR: f64 = 0.8;

/// Epsilon used to widen a degenerate (zero-extent) bounding-box axis.
const DEGENERATE_AXIS_EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin_factor: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> SpiroResult<Self> {
        Self::with_margin(width, height, DEFAULT_MARGIN_FACTOR)
    }

    pub fn with_margin(width: f64, height: f64, margin_factor: f64) -> SpiroResult<Self> {
        if !(width > 0.0) || !(height > 0.0) {
            return Err(SpiroError::invalid_viewport(format!(
                "dimensions must be > 0, got {width}x{height}"
            )));
        }
        if !(margin_factor > 0.0) {
            return Err(SpiroError::invalid_viewport("margin_factor must be > 0"));
        }
        Ok(Self {
            width,
            height,
            margin_factor,
        })
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Curve samples in viewport coordinates, same length and traversal order as
/// the raw curve they were mapped from.
#[derive(Clone, Debug, PartialEq)]
pub struct MappedCurve {
    points: Vec<Point>,
}

impl MappedCurve {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Centers the curve in the viewport under a uniform scale, so the longer
/// bounding-box axis fills `margin_factor` of the available space.
pub fn fit_to_viewport(curve: &RawCurve, viewport: &Viewport) -> SpiroResult<MappedCurve> {
    if curve.is_empty() {
        return Err(SpiroError::EmptyInput);
    }

    let points = curve.points();
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    if max_x == min_x {
        max_x += DEGENERATE_AXIS_EPS;
    }
    if max_y == min_y {
        max_y += DEGENERATE_AXIS_EPS;
    }

    let range_x = max_x - min_x;
    let range_y = max_y - min_y;
    let scale = viewport.margin_factor * (viewport.width / range_x).min(viewport.height / range_y);

    let center_x = (max_x + min_x) / 2.0;
    let center_y = (max_y + min_y) / 2.0;

    let mapped = points
        .iter()
        .map(|p| {
            Point::new(
                (p.x - center_x) * scale + viewport.width / 2.0,
                (p.y - center_y) * scale + viewport.height / 2.0,
            )
        })
        .collect();

    Ok(MappedCurve { points: mapped })
}
