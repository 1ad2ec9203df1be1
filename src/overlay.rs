use kurbo::{Point, Rect};

use crate::viewport::MappedCurve;

/// Dash pattern used for overlay circle outlines.
pub const OVERLAY_DASH: [f64; 2] = [3.0, 5.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn bounding_box(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }
}

/// Fixed and rolling circle positions for the playback overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleOverlay {
    pub fixed: Circle,
    pub rolling: Circle,
}

/// Approximates the fixed and rolling circles for overlay rendering.
///
/// The fixed radius is taken from the distance between the viewport center and
/// the curve's first mapped point; the rolling radius scales it by `r/R`. The
/// rolling circle sits on the ray from the center to the current point, pulled
/// inward by its own radius. This is an illustration aid, not an exact rolling
/// construction, and is meant to stay that way.
pub fn estimate(
    big_radius: f64,
    small_radius: f64,
    curve: &MappedCurve,
    point_index: usize,
    center: Point,
) -> CircleOverlay {
    let points = curve.points();

    let fixed_radius = points
        .first()
        .map(|p| center.distance(*p))
        .unwrap_or(100.0);

    let rolling_radius = if big_radius != 0.0 {
        (small_radius / big_radius) * fixed_radius
    } else {
        1.0
    };

    let current = points.get(point_index).copied().unwrap_or(center);
    let delta = current - center;
    let dist = delta.hypot();
    let ratio = if dist != 0.0 {
        (dist - rolling_radius) / dist
    } else {
        0.0
    };

    CircleOverlay {
        fixed: Circle {
            center,
            radius: fixed_radius,
        },
        rolling: Circle {
            center: center + delta * ratio,
            radius: rolling_radius,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        curve::{CurveKind, CurveParams},
        viewport::{Viewport, fit_to_viewport},
    };

    fn mapped() -> MappedCurve {
        let raw = CurveParams {
            kind: CurveKind::Hypotrochoid,
            big_radius: 125.0,
            small_radius: 75.0,
            pen_offset: 55.0,
            cycles: 1,
        }
        .generate()
        .unwrap();
        fit_to_viewport(&raw, &Viewport::new(700.0, 700.0).unwrap()).unwrap()
    }

    #[test]
    fn fixed_radius_comes_from_first_point() {
        let curve = mapped();
        let center = Point::new(350.0, 350.0);
        let overlay = estimate(125.0, 75.0, &curve, 0, center);
        let expected = center.distance(curve.points()[0]);
        assert!((overlay.fixed.radius - expected).abs() < 1e-12);
        assert_eq!(overlay.fixed.center, center);
    }

    #[test]
    fn rolling_radius_scales_by_radius_ratio() {
        let curve = mapped();
        let overlay = estimate(125.0, 75.0, &curve, 10, Point::new(350.0, 350.0));
        assert!((overlay.rolling.radius - overlay.fixed.radius * 75.0 / 125.0).abs() < 1e-12);
    }

    #[test]
    fn zero_big_radius_falls_back_to_unit_rolling_circle() {
        let curve = mapped();
        let overlay = estimate(0.0, 75.0, &curve, 0, Point::new(350.0, 350.0));
        assert_eq!(overlay.rolling.radius, 1.0);
    }

    #[test]
    fn rolling_circle_sits_inside_along_the_ray() {
        let curve = mapped();
        let center = Point::new(350.0, 350.0);
        let overlay = estimate(125.0, 75.0, &curve, 0, center);
        let to_point = center.distance(curve.points()[0]);
        let to_rolling = center.distance(overlay.rolling.center);
        assert!((to_rolling - (to_point - overlay.rolling.radius)).abs() < 1e-9);
    }

    #[test]
    fn current_point_at_center_leaves_rolling_circle_at_center() {
        let curve = mapped();
        let overlay = estimate(125.0, 75.0, &curve, usize::MAX, Point::new(350.0, 350.0));
        // Out-of-range index falls back to the center itself.
        assert_eq!(overlay.rolling.center, Point::new(350.0, 350.0));
    }

    #[test]
    fn bounding_box_encloses_circle() {
        let c = Circle {
            center: Point::new(10.0, 20.0),
            radius: 5.0,
        };
        let bb = c.bounding_box();
        assert_eq!(bb, Rect::new(5.0, 15.0, 15.0, 25.0));
    }
}
