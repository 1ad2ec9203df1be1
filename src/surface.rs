use kurbo::{Point, Rect};

use crate::{color::Rgb, error::SpiroResult};

/// Rendering surface collaborator. The playback side only ever calls these
/// three operations; window management and input stay with the caller.
pub trait Surface {
    /// Strokes one line segment from `from` to `to`.
    fn draw_segment(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb,
        thickness: f64,
    ) -> SpiroResult<()>;

    /// Strokes a dashed oval outline inscribed in `rect`.
    fn draw_oval(&mut self, rect: Rect, outline: Rgb, dash: &[f64]) -> SpiroResult<()>;

    /// Discards everything drawn so far.
    fn clear(&mut self) -> SpiroResult<()>;
}
