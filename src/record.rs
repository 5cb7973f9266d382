use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One decoded gesture report from the device.
///
/// Every section is optional: the firmware omits `features` and `result` while
/// a stroke is still being recorded, and diagnostic builds may send `input`
/// only. Decoding never fails on an absent section; presentation substitutes
/// placeholders instead (see [`crate::view`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GestureRecord {
    pub input: Option<InputSection>,
    pub features: Option<FeatureSet>,
    pub result: Option<Classification>,
}

/// Raw sensor samples and/or the normalized 2D stroke derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InputSection {
    pub raw: Vec<RawSample>,
    pub normalized: Vec<NormalizedPoint>,
}

/// One accelerometer/gyro sample. `t` is milliseconds since stroke start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawSample {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
    pub t: f64,
}

impl Default for RawSample {
    fn default() -> Self {
        // An absent vertical axis reads as gravity, matching the original
        // client's substitution before the tilt computation.
        Self {
            ax: 0.0,
            ay: 0.0,
            az: 1.0,
            gx: 0.0,
            gy: 0.0,
            gz: 0.0,
            t: 0.0,
        }
    }
}

/// One point of the normalized stroke, already in display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

/// Derived stroke features as computed on-device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FeatureSet {
    pub angles: Vec<f64>,
    pub segments: Vec<Segment>,
    pub length: Option<f64>,
    pub dtw_distance: Option<f64>,
}

/// Vector between two consecutive stroke points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Segment {
    pub dx: f64,
    pub dy: f64,
    pub len: f64,
}

/// The classifier's verdict for one stroke.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Classification {
    /// Gesture class, e.g. `"shape"` or `"letter"`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub confidence: Option<f64>,
    pub alternatives: Vec<Alternative>,
}

/// A runner-up classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Alternative {
    pub name: String,
    pub confidence: f64,
}

/// JSON schema of the wire format, for host tooling and documentation.
pub fn record_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(GestureRecord)
}
