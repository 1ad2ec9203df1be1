use std::time::Duration;

use rand::Rng;

use crate::{
    color::{ColorMode, Rgb, assign_colors},
    curve::{CurveKind, CurveParams},
    error::{SpiroError, SpiroResult},
    overlay::{self, OVERLAY_DASH},
    playback::{Pacing, Sequencer, Tick},
    surface::Surface,
    viewport::{Viewport, fit_to_viewport},
};

pub use crate::playback::CurveInstance;

/// Overlay circles are drawn in a muted gray so they read as scaffolding.
const OVERLAY_OUTLINE: Rgb = Rgb {
    r: 128,
    g: 128,
    b: 128,
};

/// The full validated parameter set handed over by the caller, whether that
/// is the CLI or an embedding application's input panel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlotSpec {
    pub kind: CurveKind,
    pub big_radius: f64,
    pub small_radius: f64,
    pub pen_offset: f64,
    pub cycles: u32,
    pub nested_count: u32,
    pub color_mode: ColorMode,
    pub line_thickness: f64,
    pub show_circles: bool,
}

impl Default for PlotSpec {
    fn default() -> Self {
        Self {
            kind: CurveKind::Hypotrochoid,
            big_radius: 125.0,
            small_radius: 75.0,
            pen_offset: 55.0,
            cycles: 3,
            nested_count: 1,
            color_mode: ColorMode::RandomPerCycle,
            line_thickness: 2.0,
            show_circles: false,
        }
    }
}

impl PlotSpec {
    pub fn curve_params(&self) -> CurveParams {
        CurveParams {
            kind: self.kind,
            big_radius: self.big_radius,
            small_radius: self.small_radius,
            pen_offset: self.pen_offset,
            cycles: self.cycles,
        }
    }

    pub fn validate(&self) -> SpiroResult<()> {
        self.curve_params().validate()?;
        if self.nested_count < 1 {
            return Err(SpiroError::invalid_parameter("nested_count must be >= 1"));
        }
        if !(self.line_thickness > 0.0) {
            return Err(SpiroError::invalid_parameter("line_thickness must be > 0"));
        }
        Ok(())
    }

    /// Draws a fresh parameter set from documented ranges: R in [50, 150),
    /// r in [10, max(10, R-5)), l in [5, r), cycles in [2, 10],
    /// nested_count in [1, 4].
    pub fn randomized(rng: &mut impl Rng) -> Self {
        let kind = if rng.random_bool(0.5) {
            CurveKind::Hypotrochoid
        } else {
            CurveKind::Epitrochoid
        };
        let big_radius: f64 = rng.random_range(50.0..150.0);
        let r_max = (big_radius - 5.0).max(10.0);
        let small_radius = if r_max > 10.0 {
            rng.random_range(10.0..r_max)
        } else {
            10.0
        };
        let pen_offset = if small_radius > 5.0 {
            rng.random_range(5.0..small_radius)
        } else {
            5.0
        };
        Self {
            kind,
            big_radius,
            small_radius,
            pen_offset,
            cycles: rng.random_range(2..=10),
            nested_count: rng.random_range(1..=4),
            ..Self::default()
        }
    }
}

/// Generates, maps, and colors `nested_count` curve instances for playback.
///
/// All-or-nothing: any parameter failure surfaces before a single instance is
/// produced.
#[tracing::instrument(skip(rng))]
pub fn build_sequence(
    spec: &PlotSpec,
    viewport: &Viewport,
    rng: &mut impl Rng,
) -> SpiroResult<Vec<CurveInstance>> {
    spec.validate()?;

    let params = spec.curve_params();
    let mut sequence = Vec::with_capacity(spec.nested_count as usize);
    for _ in 0..spec.nested_count {
        let raw = params.generate()?;
        let mapped = fit_to_viewport(&raw, viewport)?;
        let colors = assign_colors(spec.color_mode, spec.cycles, rng);
        sequence.push(CurveInstance::new(params, mapped, colors)?);
    }
    Ok(sequence)
}

/// External scheduler collaborator pacing the tick loop.
///
/// `wait` blocks (or yields) for the requested delay; returning `false`
/// cancels playback, which is the single authoritative cancellation path
/// between ticks.
pub trait Scheduler {
    fn wait(&mut self, delay: Duration) -> bool;
}

/// Wall-clock pacing via thread sleep.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepScheduler;

impl Scheduler for SleepScheduler {
    fn wait(&mut self, delay: Duration) -> bool {
        std::thread::sleep(delay);
        true
    }
}

/// No pacing at all; used for headless export and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelayScheduler;

impl Scheduler for NoDelayScheduler {
    fn wait(&mut self, _delay: Duration) -> bool {
        true
    }
}

/// Drives a sequencer against a surface and a scheduler.
#[derive(Debug, Default)]
pub struct Player {
    sequencer: Sequencer,
    pacing: Pacing,
}

impl Player {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            sequencer: Sequencer::new(),
            pacing,
        }
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn stop(&mut self) {
        self.sequencer.stop();
    }

    /// Clears the surface, regenerates the sequence for `spec`, and plays it
    /// to completion (or until the scheduler cancels). Starting implicitly
    /// stops any sequence still drawing, so a stale run can never scribble on
    /// the freshly cleared surface. Returns the number of segments drawn.
    pub fn play(
        &mut self,
        spec: &PlotSpec,
        viewport: &Viewport,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
        rng: &mut impl Rng,
    ) -> SpiroResult<usize> {
        self.sequencer.stop();
        surface.clear()?;

        let sequence = build_sequence(spec, viewport, rng)?;
        self.sequencer.start(sequence)?;

        let mut segments = 0usize;
        loop {
            let tick = self.sequencer.tick();
            if let Some(ev) = tick.segment() {
                surface.draw_segment(ev.from, ev.to, ev.color, spec.line_thickness)?;
                segments += 1;
            }

            // A live canvas would redraw the circles every segment and erase
            // the previous pair; ops on a recording surface only accumulate,
            // so the overlay goes down once per curve, at its resting point.
            if spec.show_circles
                && let (Tick::CurveComplete(ev) | Tick::Finished(ev)) = tick
            {
                let curve = &self.sequencer.sequence()[ev.sequence_index];
                let circles = overlay::estimate(
                    spec.big_radius,
                    spec.small_radius,
                    curve.points(),
                    ev.point_index + 1,
                    viewport.center(),
                );
                surface.draw_oval(circles.fixed.bounding_box(), OVERLAY_OUTLINE, &OVERLAY_DASH)?;
                surface.draw_oval(
                    circles.rolling.bounding_box(),
                    OVERLAY_OUTLINE,
                    &OVERLAY_DASH,
                )?;
            }

            match self.pacing.delay_after(&tick) {
                Some(delay) => {
                    if !scheduler.wait(delay) {
                        self.sequencer.stop();
                        break;
                    }
                }
                None => break,
            }
        }
        Ok(segments)
    }
}
