use std::time::Duration;

use kurbo::Point;

use crate::{
    color::Rgb,
    curve::CurveParams,
    error::{SpiroError, SpiroResult},
    viewport::MappedCurve,
};

/// One generated curve ready for playback: mapped points plus the color list
/// resolved for it (one entry in single-color mode, one per cycle otherwise).
#[derive(Clone, Debug)]
pub struct CurveInstance {
    params: CurveParams,
    points: MappedCurve,
    colors: Vec<Rgb>,
}

impl CurveInstance {
    pub fn new(params: CurveParams, points: MappedCurve, colors: Vec<Rgb>) -> SpiroResult<Self> {
        if points.is_empty() {
            return Err(SpiroError::EmptyInput);
        }
        if points.len() < 2 {
            return Err(SpiroError::invalid_parameter(
                "curve instance needs at least two points to draw",
            ));
        }
        if colors.is_empty() {
            return Err(SpiroError::invalid_parameter(
                "curve instance needs at least one color",
            ));
        }
        Ok(Self {
            params,
            points,
            colors,
        })
    }

    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    pub fn points(&self) -> &MappedCurve {
        &self.points
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Cycle-color lookup via clamped floor division.
    ///
    /// `points_per_cycle` is fractional when the total count does not divide
    /// evenly, which assigns slightly uneven point ranges to boundary cycles.
    /// That rounding is kept as-is; the clamp keeps the index in range.
    pub fn color_at(&self, point_index: usize) -> Rgb {
        if self.colors.len() == 1 {
            return self.colors[0];
        }
        let points_per_cycle = self.points.len() as f64 / f64::from(self.params.cycles.max(1));
        let cycle_index = (point_index as f64 / points_per_cycle).floor() as usize;
        self.colors[cycle_index.min(self.colors.len() - 1)]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    Drawing,
    Finished,
}

/// One pen stroke between two consecutive mapped points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentEvent {
    pub from: Point,
    pub to: Point,
    pub color: Rgb,
    pub sequence_index: usize,
    pub point_index: usize,
}

/// Outcome of a single `tick()`. Every tick taken while Drawing emits exactly
/// one segment; curve and sequence completion ride on the tick that drew the
/// closing segment, so there is no separate drain tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// Drew a segment; more remain in the current curve.
    Segment(SegmentEvent),
    /// Drew the closing segment of the current curve; the next curve is up.
    CurveComplete(SegmentEvent),
    /// Drew the closing segment of the last curve; playback is Finished.
    Finished(SegmentEvent),
    /// Not running (never started, stopped, or already finished).
    Idle,
}

impl Tick {
    pub fn segment(&self) -> Option<&SegmentEvent> {
        match self {
            Self::Segment(ev) | Self::CurveComplete(ev) | Self::Finished(ev) => Some(ev),
            Self::Idle => None,
        }
    }
}

/// Tick pacing. The inter-curve pause is deliberately coarser than the
/// per-segment pause so curve transitions read as a visible beat. Both are
/// tunables, not contracts.
#[derive(Clone, Copy, Debug)]
pub struct Pacing {
    pub segment_delay: Duration,
    pub curve_transition_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            segment_delay: Duration::from_millis(1),
            curve_transition_delay: Duration::from_millis(50),
        }
    }
}

impl Pacing {
    /// Delay the external scheduler should wait before the next tick.
    /// `None` means no further tick is due.
    pub fn delay_after(&self, tick: &Tick) -> Option<Duration> {
        match tick {
            Tick::Segment(_) => Some(self.segment_delay),
            Tick::CurveComplete(_) => Some(self.curve_transition_delay),
            Tick::Finished(_) | Tick::Idle => None,
        }
    }
}

/// Walks a nested sequence of curves point by point.
///
/// The sequencer never blocks: each `tick()` does one bounded unit of work
/// and returns, leaving pacing to an external scheduler. Ticks must not
/// overlap; the driver guarantees at most one in flight.
#[derive(Debug, Default)]
pub struct Sequencer {
    sequence: Vec<CurveInstance>,
    sequence_index: usize,
    point_index: usize,
    running: bool,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        if self.running {
            State::Drawing
        } else if !self.sequence.is_empty() && self.sequence_index == self.sequence.len() {
            State::Finished
        } else {
            State::Idle
        }
    }

    pub fn sequence(&self) -> &[CurveInstance] {
        &self.sequence
    }

    /// Begins playback of a freshly generated sequence, resetting both
    /// indices. Starting while Drawing implicitly stops the old sequence
    /// first, so a stale sequence can never keep emitting.
    pub fn start(&mut self, sequence: Vec<CurveInstance>) -> SpiroResult<()> {
        if sequence.is_empty() {
            return Err(SpiroError::EmptySequence);
        }
        if self.running {
            self.stop();
        }
        tracing::debug!(curves = sequence.len(), "playback start");
        self.sequence = sequence;
        self.sequence_index = 0;
        self.point_index = 0;
        self.running = true;
        Ok(())
    }

    /// Halts playback. Safe from any state; indices are left where they are
    /// (the next `start` resets them) and no event is emitted again until then.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(
                sequence_index = self.sequence_index,
                point_index = self.point_index,
                "playback stop"
            );
        }
        self.running = false;
    }

    /// Advances playback by one segment.
    ///
    /// Segments within a curve come out strictly in point order, curves
    /// strictly in sequence order, each segment exactly once.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }

        let curve = &self.sequence[self.sequence_index];
        let points = curve.points().points();
        let event = SegmentEvent {
            from: points[self.point_index],
            to: points[self.point_index + 1],
            color: curve.color_at(self.point_index),
            sequence_index: self.sequence_index,
            point_index: self.point_index,
        };
        self.point_index += 1;

        if self.point_index + 1 < points.len() {
            return Tick::Segment(event);
        }

        // That was the closing segment of the current curve.
        self.sequence_index += 1;
        self.point_index = 0;
        if self.sequence_index == self.sequence.len() {
            tracing::debug!("playback finished");
            self.running = false;
            return Tick::Finished(event);
        }
        Tick::CurveComplete(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        curve::{CurveKind, CurveParams},
        viewport::{Viewport, fit_to_viewport},
    };

    fn instance(cycles: u32, colors: Vec<Rgb>) -> CurveInstance {
        let params = CurveParams {
            kind: CurveKind::Hypotrochoid,
            big_radius: 125.0,
            small_radius: 75.0,
            pen_offset: 55.0,
            cycles,
        };
        let raw = params.generate().unwrap();
        let mapped = fit_to_viewport(&raw, &Viewport::new(700.0, 700.0).unwrap()).unwrap();
        CurveInstance::new(params, mapped, colors).unwrap()
    }

    #[test]
    fn empty_sequence_is_rejected_and_stays_idle() {
        let mut seq = Sequencer::new();
        assert!(matches!(seq.start(vec![]), Err(SpiroError::EmptySequence)));
        assert_eq!(seq.state(), State::Idle);
        assert_eq!(seq.tick(), Tick::Idle);
    }

    #[test]
    fn empty_colors_are_rejected_at_construction() {
        let params = CurveParams {
            kind: CurveKind::Hypotrochoid,
            big_radius: 125.0,
            small_radius: 75.0,
            pen_offset: 55.0,
            cycles: 1,
        };
        let raw = params.generate().unwrap();
        let mapped = fit_to_viewport(&raw, &Viewport::new(700.0, 700.0).unwrap()).unwrap();
        assert!(CurveInstance::new(params, mapped, vec![]).is_err());
    }

    #[test]
    fn finishes_on_the_exact_tick_that_draws_the_last_segment() {
        // A sole curve with 1001 points: 1000 segments, Finished on tick 1000.
        let mut seq = Sequencer::new();
        seq.start(vec![instance(1, vec![Rgb::new(9, 9, 9)])]).unwrap();

        let mut indices = Vec::new();
        for n in 1..=1000 {
            match seq.tick() {
                Tick::Segment(ev) => {
                    assert!(n < 1000, "segment past the end at tick {n}");
                    indices.push(ev.point_index);
                }
                Tick::Finished(ev) => {
                    assert_eq!(n, 1000, "finished early at tick {n}");
                    indices.push(ev.point_index);
                }
                other => panic!("unexpected tick: {other:?}"),
            }
        }
        assert_eq!(indices.len(), 1000);
        assert!(indices.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(seq.state(), State::Finished);
        assert_eq!(seq.tick(), Tick::Idle);
    }

    #[test]
    fn nested_curves_play_in_order_with_one_transition() {
        let mut seq = Sequencer::new();
        seq.start(vec![
            instance(1, vec![Rgb::new(1, 1, 1)]),
            instance(1, vec![Rgb::new(2, 2, 2)]),
        ])
        .unwrap();

        let mut transitions = 0;
        let mut segments = 0;
        loop {
            match seq.tick() {
                Tick::Segment(ev) => {
                    segments += 1;
                    let expected = if segments <= 1000 { 0 } else { 1 };
                    assert_eq!(ev.sequence_index, expected);
                }
                Tick::CurveComplete(ev) => {
                    segments += 1;
                    transitions += 1;
                    assert_eq!(ev.sequence_index, 0);
                    assert_eq!(segments, 1000);
                }
                Tick::Finished(_) => {
                    segments += 1;
                    break;
                }
                Tick::Idle => panic!("ticked while idle"),
            }
        }
        assert_eq!(transitions, 1);
        assert_eq!(segments, 2000);
    }

    #[test]
    fn stop_halts_emission_from_any_state() {
        let mut seq = Sequencer::new();
        seq.stop(); // Idle: no-op.
        assert_eq!(seq.state(), State::Idle);

        seq.start(vec![instance(1, vec![Rgb::new(0, 0, 0)])]).unwrap();
        assert!(matches!(seq.tick(), Tick::Segment(_)));
        seq.stop();
        assert_eq!(seq.tick(), Tick::Idle);
        assert_eq!(seq.tick(), Tick::Idle);

        // Restart resets indices and replays from the top.
        seq.start(vec![instance(1, vec![Rgb::new(0, 0, 0)])]).unwrap();
        match seq.tick() {
            Tick::Segment(ev) => assert_eq!(ev.point_index, 0),
            other => panic!("unexpected tick: {other:?}"),
        }
        seq.stop();

        // Run to completion, then stop on Finished: still a no-op.
        seq.start(vec![instance(1, vec![Rgb::new(0, 0, 0)])]).unwrap();
        while !matches!(seq.tick(), Tick::Finished(_)) {}
        seq.stop();
        assert_eq!(seq.state(), State::Finished);
    }

    #[test]
    fn start_while_drawing_replaces_the_sequence() {
        let mut seq = Sequencer::new();
        seq.start(vec![instance(2, vec![Rgb::new(1, 1, 1)])]).unwrap();
        for _ in 0..500 {
            seq.tick();
        }
        seq.start(vec![instance(1, vec![Rgb::new(2, 2, 2)])]).unwrap();
        match seq.tick() {
            Tick::Segment(ev) => {
                assert_eq!(ev.point_index, 0);
                assert_eq!(ev.sequence_index, 0);
                assert_eq!(ev.color, Rgb::new(2, 2, 2));
            }
            other => panic!("unexpected tick: {other:?}"),
        }
    }

    #[test]
    fn per_cycle_colors_switch_at_cycle_boundaries() {
        let colors = vec![Rgb::new(10, 0, 0), Rgb::new(0, 10, 0), Rgb::new(0, 0, 10)];
        let inst = instance(3, colors.clone());
        // 3001 points over 3 cycles -> points_per_cycle = 1000.333...
        assert_eq!(inst.color_at(0), colors[0]);
        assert_eq!(inst.color_at(999), colors[0]);
        assert_eq!(inst.color_at(1001), colors[1]);
        assert_eq!(inst.color_at(2500), colors[2]);
        // Clamp at the tail.
        assert_eq!(inst.color_at(3000), colors[2]);
    }

    #[test]
    fn single_color_applies_to_all_segments() {
        let inst = instance(3, vec![Rgb::new(7, 7, 7)]);
        assert_eq!(inst.color_at(0), Rgb::new(7, 7, 7));
        assert_eq!(inst.color_at(2999), Rgb::new(7, 7, 7));
    }

    #[test]
    fn pacing_maps_ticks_to_delays() {
        let pacing = Pacing::default();
        let ev = SegmentEvent {
            from: Point::ZERO,
            to: Point::ZERO,
            color: Rgb::new(0, 0, 0),
            sequence_index: 0,
            point_index: 0,
        };
        assert_eq!(
            pacing.delay_after(&Tick::Segment(ev)),
            Some(pacing.segment_delay)
        );
        assert_eq!(
            pacing.delay_after(&Tick::CurveComplete(ev)),
            Some(pacing.curve_transition_delay)
        );
        assert!(pacing.curve_transition_delay > pacing.segment_delay);
        assert_eq!(pacing.delay_after(&Tick::Finished(ev)), None);
        assert_eq!(pacing.delay_after(&Tick::Idle), None);
    }
}
