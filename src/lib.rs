#![forbid(unsafe_code)]

pub mod color;
pub mod curve;
pub mod error;
pub mod overlay;
pub mod playback;
pub mod plot;
pub mod raster;
pub mod surface;
pub mod viewport;

pub use color::{ColorMode, Rgb, assign_colors};
pub use curve::{CurveKind, CurveParams, RawCurve, SAMPLES_PER_CYCLE};
pub use error::{SpiroError, SpiroResult};
pub use overlay::{Circle, CircleOverlay};
pub use playback::{CurveInstance, Pacing, SegmentEvent, Sequencer, State, Tick};
pub use plot::{NoDelayScheduler, Player, PlotSpec, Scheduler, SleepScheduler, build_sequence};
pub use raster::RasterSurface;
pub use surface::Surface;
pub use viewport::{MappedCurve, Viewport, fit_to_viewport};
