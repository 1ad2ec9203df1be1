use kurbo::Point;

use crate::error::{SpiroError, SpiroResult};

/// Fixed sampling resolution: samples per full 2π revolution of θ.
pub const SAMPLES_PER_CYCLE: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CurveKind {
    /// Pen circle rolling inside the fixed circle.
    Hypotrochoid,
    /// Pen circle rolling outside the fixed circle.
    Epitrochoid,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveParams {
    pub kind: CurveKind,
    /// Fixed (big) circle radius `R`.
    pub big_radius: f64,
    /// Rolling (small) circle radius `r`.
    pub small_radius: f64,
    /// Pen offset `l` from the rolling circle's center.
    pub pen_offset: f64,
    /// Full θ revolutions to trace.
    pub cycles: u32,
}

impl CurveParams {
    pub fn validate(&self) -> SpiroResult<()> {
        if !(self.big_radius > 0.0) {
            return Err(SpiroError::invalid_parameter("big_radius R must be > 0"));
        }
        if !(self.small_radius > 0.0) {
            return Err(SpiroError::invalid_parameter(
                "small_radius r must be > 0 (r = 0 makes the rolling ratio divide by zero)",
            ));
        }
        if !(self.pen_offset >= 0.0) {
            return Err(SpiroError::invalid_parameter("pen_offset l must be >= 0"));
        }
        if self.cycles < 1 {
            return Err(SpiroError::invalid_parameter("cycles must be >= 1"));
        }
        Ok(())
    }

    /// Samples the curve at `cycles * SAMPLES_PER_CYCLE + 1` points.
    ///
    /// Pure function of the parameters: identical inputs yield bit-identical
    /// point sequences. `R < r` is legal for hypotrochoids and produces
    /// self-intersecting patterns.
    pub fn generate(&self) -> SpiroResult<RawCurve> {
        self.validate()?;

        let big = self.big_radius;
        let small = self.small_radius;
        let offset = self.pen_offset;
        let total = self.cycles * SAMPLES_PER_CYCLE;

        let mut points = Vec::with_capacity(total as usize + 1);
        for i in 0..=total {
            let theta = 2.0 * std::f64::consts::PI * f64::from(i) / f64::from(SAMPLES_PER_CYCLE);
            let p = match self.kind {
                CurveKind::Hypotrochoid => {
                    let ratio = (big - small) / small;
                    Point::new(
                        (big - small) * theta.cos() + offset * (ratio * theta).cos(),
                        (big - small) * theta.sin() - offset * (ratio * theta).sin(),
                    )
                }
                CurveKind::Epitrochoid => {
                    let ratio = (big + small) / small;
                    Point::new(
                        (big + small) * theta.cos() - offset * (ratio * theta).cos(),
                        (big + small) * theta.sin() - offset * (ratio * theta).sin(),
                    )
                }
            };
            points.push(p);
        }

        Ok(RawCurve { points })
    }
}

/// Ordered pen-traversal samples in curve space.
#[derive(Clone, Debug, PartialEq)]
pub struct RawCurve {
    points: Vec<Point>,
}

impl RawCurve {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }
}
