//! Presentation side of the pipeline: the sink contract and a concrete render
//! model a UI can bind to. All geometry and formatting mirrors what the
//! device's bundled web client displays.

use std::fmt;

use crate::record::{FeatureSet, GestureRecord, RawSample};

/// Glyph shown for any absent field.
pub const PLACEHOLDER: &str = "—";

/// Connection/read-loop state as surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Connected,
    Received,
    ReadError,
    Disconnected,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Idle => "Idle",
            Status::Connected => "Connected",
            Status::Received => "Received JSON",
            Status::ReadError => "Read error",
            Status::Disconnected => "Disconnected",
        })
    }
}

/// Consumer of decoded records. One call per record, side-effect-isolated;
/// processing a record twice must leave the same presentation state.
pub trait RecordSink {
    fn on_record(&mut self, record: &GestureRecord);

    fn on_status(&mut self, status: Status) {
        let _ = status;
    }
}

/// One point of the stroke to plot, in input units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

/// Resolves the point list to plot: normalized points verbatim when present,
/// else raw accelerometer X/Y scaled by 100, else nothing.
pub fn plot_points(record: &GestureRecord) -> Vec<PlotPoint> {
    let Some(input) = &record.input else {
        return Vec::new();
    };
    if !input.normalized.is_empty() {
        input
            .normalized
            .iter()
            .map(|p| PlotPoint { x: p.x, y: p.y, t: p.t })
            .collect()
    } else if !input.raw.is_empty() {
        input
            .raw
            .iter()
            .map(|s| PlotPoint {
                x: s.ax * 100.0,
                y: s.ay * 100.0,
                t: s.t,
            })
            .collect()
    } else {
        Vec::new()
    }
}

/// Drawing surface the stroke is fitted onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// User-adjustable multiplier; 12 is the neutral midpoint.
    pub scale: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 40.0,
            scale: 12.0,
        }
    }
}

/// Auto-fits the stroke to the surface: centered, margin respected, scaled by
/// the smaller axis ratio times `scale/12`. A zero-extent axis counts as one
/// unit so a straight line or single point never divides by zero.
pub fn fit_points(points: &[PlotPoint], surface: &Surface) -> Vec<(f64, f64)> {
    if points.is_empty() {
        return Vec::new();
    }
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let w = if max_x - min_x == 0.0 { 1.0 } else { max_x - min_x };
    let h = if max_y - min_y == 0.0 { 1.0 } else { max_y - min_y };

    let k = ((surface.width - 2.0 * surface.margin) / w)
        .min((surface.height - 2.0 * surface.margin) / h)
        * (surface.scale / 12.0);
    let cx = surface.width / 2.0;
    let cy = surface.height / 2.0;
    let mx = (min_x + max_x) / 2.0;
    let my = (min_y + max_y) / 2.0;

    points
        .iter()
        .map(|p| ((p.x - mx) * k + cx, (p.y - my) * k + cy))
        .collect()
}

/// Orientation of the tilt preview, in degrees. Applied as a roll→Y,
/// pitch→X, 0→Z rotation of the preview element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub roll: f64,
    pub pitch: f64,
}

impl Default for Tilt {
    fn default() -> Self {
        Self {
            roll: 0.0,
            pitch: 0.0,
        }
    }
}

/// Roll/pitch from the first raw accelerometer sample; with no raw sample the
/// device is assumed level under gravity (ax=0, ay=0, az=1).
pub fn tilt_from(record: &GestureRecord) -> Tilt {
    let level = RawSample::default();
    let sample = record
        .input
        .as_ref()
        .and_then(|input| input.raw.first())
        .unwrap_or(&level);

    let roll = sample.ay.atan2(sample.az).to_degrees();
    let pitch = (-sample.ax)
        .atan2((sample.ay * sample.ay + sample.az * sample.az).sqrt())
        .to_degrees();
    Tilt { roll, pitch }
}

/// Read-only text for the `features` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureReadout {
    pub angles: String,
    pub segments: Vec<String>,
    pub length: String,
    pub dtw_distance: String,
}

impl FeatureReadout {
    pub fn placeholder() -> Self {
        Self {
            angles: PLACEHOLDER.to_string(),
            segments: Vec::new(),
            length: PLACEHOLDER.to_string(),
            dtw_distance: PLACEHOLDER.to_string(),
        }
    }

    pub fn from_features(features: Option<&FeatureSet>) -> Self {
        let Some(features) = features else {
            return Self::placeholder();
        };
        let angles = if features.angles.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            features
                .angles
                .iter()
                .map(|a| format!("{a:.1}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self {
            angles,
            segments: features
                .segments
                .iter()
                .map(|s| format!("dx:{}, dy:{}, len:{}", s.dx, s.dy, s.len))
                .collect(),
            length: opt_text(features.length),
            dtw_distance: opt_text(features.dtw_distance),
        }
    }
}

/// Read-only text for the `result` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultReadout {
    pub kind: String,
    pub name: String,
    pub confidence: String,
    pub alternatives: Vec<String>,
}

impl ResultReadout {
    pub fn placeholder() -> Self {
        Self {
            kind: PLACEHOLDER.to_string(),
            name: PLACEHOLDER.to_string(),
            confidence: PLACEHOLDER.to_string(),
            alternatives: Vec::new(),
        }
    }

    pub fn from_record(record: &GestureRecord) -> Self {
        let Some(result) = &record.result else {
            return Self::placeholder();
        };
        Self {
            kind: result.kind.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            name: result.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            confidence: opt_text(result.confidence),
            alternatives: result
                .alternatives
                .iter()
                .map(|a| format!("{} — {}", a.name, a.confidence))
                .collect(),
        }
    }
}

fn opt_text(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Complete render model for one gesture display: fitted stroke path, feature
/// and result readouts, tilt preview, status line, and the last record's raw
/// JSON. A UI binds to this and repaints after each sink call.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureView {
    pub surface: Surface,
    pub status: Status,
    pub path: Vec<(f64, f64)>,
    pub features: FeatureReadout,
    pub result: ResultReadout,
    pub tilt: Tilt,
    pub raw_json: String,
}

impl GestureView {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            status: Status::Idle,
            path: Vec::new(),
            features: FeatureReadout::placeholder(),
            result: ResultReadout::placeholder(),
            tilt: Tilt::default(),
            raw_json: "{}".to_string(),
        }
    }

    /// The continuous scale control; takes effect on the next record.
    pub fn set_scale(&mut self, scale: f64) {
        self.surface.scale = scale;
    }

    /// Reset to the idle, all-placeholder state.
    pub fn clear(&mut self) {
        let surface = self.surface;
        *self = Self::new(surface);
    }
}

impl Default for GestureView {
    fn default() -> Self {
        Self::new(Surface::default())
    }
}

impl RecordSink for GestureView {
    fn on_record(&mut self, record: &GestureRecord) {
        self.path = fit_points(&plot_points(record), &self.surface);
        self.features = FeatureReadout::from_features(record.features.as_ref());
        self.result = ResultReadout::from_record(record);
        self.tilt = tilt_from(record);
        self.raw_json = simd_json::to_string(record).unwrap_or_else(|_| "{}".to_string());
        self.status = Status::Received;
    }

    fn on_status(&mut self, status: Status) {
        self.status = status;
    }
}
