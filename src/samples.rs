//! Canned gesture records for the simulate controls, plus a synthesizer for
//! arbitrary strokes. The canned values match the device's bundled demo data.

use crate::analysis;
use crate::record::{
    Alternative, Classification, FeatureSet, GestureRecord, InputSection, NormalizedPoint,
    RawSample, Segment,
};

fn pt(x: f64, y: f64, t: f64) -> NormalizedPoint {
    NormalizedPoint { x, y, t }
}

fn seg(dx: f64, dy: f64, len: f64) -> Segment {
    Segment { dx, dy, len }
}

fn alt(name: &str, confidence: f64) -> Alternative {
    Alternative {
        name: name.to_string(),
        confidence,
    }
}

/// A closed equilateral triangle stroke.
pub fn triangle() -> GestureRecord {
    GestureRecord {
        input: Some(InputSection {
            raw: vec![RawSample {
                ax: 0.12,
                ay: 0.05,
                az: 0.98,
                gx: -3.2,
                gy: 1.8,
                gz: 0.5,
                t: 0.0,
            }],
            normalized: vec![
                pt(0.0, 0.0, 0.0),
                pt(60.0, 0.0, 10.0),
                pt(30.0, 52.0, 20.0),
                pt(0.0, 0.0, 30.0),
            ],
        }),
        features: Some(FeatureSet {
            angles: vec![60.0, 60.0, 60.0],
            segments: vec![
                seg(60.0, 0.0, 60.0),
                seg(-30.0, 52.0, 60.0),
                seg(-30.0, -52.0, 60.0),
            ],
            length: Some(180.0),
            dtw_distance: Some(5.2),
        }),
        result: Some(Classification {
            kind: Some("shape".to_string()),
            name: Some("Triangle".to_string()),
            confidence: Some(0.95),
            alternatives: vec![alt("V", 0.4), alt("A", 0.34)],
        }),
    }
}

/// A circle approximated by a 24-point polygon (15-degree steps).
pub fn circle() -> GestureRecord {
    let normalized = (0..360)
        .step_by(15)
        .map(|a| {
            let rad = (a as f64).to_radians();
            pt(50.0 + 40.0 * rad.cos(), 50.0 + 40.0 * rad.sin(), a as f64)
        })
        .collect();

    GestureRecord {
        input: Some(InputSection {
            raw: vec![RawSample {
                ax: 0.01,
                ay: 0.0,
                az: 1.0,
                gx: 0.0,
                gy: 0.0,
                gz: 0.0,
                t: 0.0,
            }],
            normalized,
        }),
        features: Some(FeatureSet {
            angles: vec![0.0, 0.0, 0.0],
            segments: Vec::new(),
            length: Some(250.0),
            dtw_distance: Some(3.1),
        }),
        result: Some(Classification {
            kind: Some("shape".to_string()),
            name: Some("Circle".to_string()),
            confidence: Some(0.97),
            alternatives: Vec::new(),
        }),
    }
}

/// A five-point letter "A" stroke.
pub fn letter_a() -> GestureRecord {
    GestureRecord {
        input: Some(InputSection {
            raw: vec![RawSample {
                ax: 0.05,
                ay: 0.02,
                az: 0.99,
                gx: 0.2,
                gy: -0.1,
                gz: 0.0,
                t: 0.0,
            }],
            normalized: vec![
                pt(0.0, 80.0, 0.0),
                pt(25.0, 0.0, 10.0),
                pt(50.0, 80.0, 20.0),
                pt(12.0, 40.0, 15.0),
                pt(38.0, 40.0, 15.0),
            ],
        }),
        features: Some(FeatureSet {
            angles: vec![25.0, 45.0, 25.0],
            segments: vec![seg(25.0, -80.0, 85.0), seg(25.0, 80.0, 85.0)],
            length: Some(170.0),
            dtw_distance: Some(8.6),
        }),
        result: Some(Classification {
            kind: Some("letter".to_string()),
            name: Some("A".to_string()),
            confidence: Some(0.92),
            alternatives: vec![alt("4", 0.2)],
        }),
    }
}

/// Builds a record from an arbitrary stroke, computing its feature set with
/// [`crate::analysis`]. No classifier runs, so confidence stays unset.
pub fn synthesize(kind: &str, name: &str, points: Vec<NormalizedPoint>) -> GestureRecord {
    let features = analysis::path_features(&points);
    GestureRecord {
        input: Some(InputSection {
            raw: vec![RawSample::default()],
            normalized: points,
        }),
        features: Some(features),
        result: Some(Classification {
            kind: Some(kind.to_string()),
            name: Some(name.to_string()),
            confidence: None,
            alternatives: Vec::new(),
        }),
    }
}
