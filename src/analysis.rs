//! Stroke feature math, matching what the device firmware computes before it
//! fills a record's `features` section. Hosts use it to synthesize realistic
//! records for demos and to compare strokes offline.

use crate::record::{FeatureSet, NormalizedPoint, Segment};

/// Points per stroke after resampling; the firmware's template width.
pub const RESAMPLE_POINTS: usize = 48;

/// Centers a stroke and scales it uniformly into the firmware's 0..1000 box.
/// Half-extents below 1e-3 count as a full unit so flat strokes stay finite.
pub fn normalize_points(points: &[NormalizedPoint]) -> Vec<NormalizedPoint> {
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
    let cx = (min_x + max_x) / 2.0;
    let cy = (min_y + max_y) / 2.0;
    let mut sx = (max_x - min_x) / 2.0;
    let mut sy = (max_y - min_y) / 2.0;
    if sx < 1e-3 {
        sx = 1.0;
    }
    if sy < 1e-3 {
        sy = 1.0;
    }
    let s = sx.max(sy);

    points
        .iter()
        .map(|p| NormalizedPoint {
            x: ((p.x - cx) / s + 1.0) * 500.0,
            y: ((p.y - cy) / s + 1.0) * 500.0,
            t: p.t,
        })
        .collect()
}

/// Resamples a stroke to `n` evenly spaced points by linear interpolation.
pub fn resample(points: &[NormalizedPoint], n: usize) -> Vec<NormalizedPoint> {
    if points.is_empty() || n == 0 {
        return Vec::new();
    }
    if points.len() == 1 || n == 1 {
        return vec![points[0]; n];
    }
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            let pos = t * (points.len() - 1) as f64;
            let i0 = pos.floor() as usize;
            let i1 = (i0 + 1).min(points.len() - 1);
            let f = pos - i0 as f64;
            NormalizedPoint {
                x: lerp(points[i0].x, points[i1].x, f),
                y: lerp(points[i0].y, points[i1].y, f),
                t: lerp(points[i0].t, points[i1].t, f),
            }
        })
        .collect()
}

fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a * (1.0 - f) + b * f
}

/// Dynamic-time-warping distance between two strokes, total alignment cost
/// normalized by `N + M`. Two rows of the DP table are enough.
pub fn dtw_distance(a: &[NormalizedPoint], b: &[NormalizedPoint]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return f64::INFINITY;
    }
    let m = b.len();
    let mut prev = vec![f64::INFINITY; m + 1];
    let mut curr = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;

    for pa in a {
        curr[0] = f64::INFINITY;
        for (j, pb) in b.iter().enumerate() {
            let dx = pa.x - pb.x;
            let dy = pa.y - pb.y;
            let cost = (dx * dx + dy * dy).sqrt();
            let best = prev[j + 1].min(curr[j]).min(prev[j]);
            curr[j + 1] = cost + best;
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m] / (a.len() + b.len()) as f64
}

/// Derives the record's `features` shape from a stroke: per-segment vectors,
/// interior angles at each vertex, and total path length. `dtw_distance` is
/// left unset; it only exists relative to a reference stroke.
pub fn path_features(points: &[NormalizedPoint]) -> FeatureSet {
    let segments: Vec<Segment> = points
        .windows(2)
        .map(|w| {
            let dx = w[1].x - w[0].x;
            let dy = w[1].y - w[0].y;
            Segment {
                dx,
                dy,
                len: (dx * dx + dy * dy).sqrt(),
            }
        })
        .collect();

    let angles: Vec<f64> = segments
        .windows(2)
        .map(|w| interior_angle(&w[0], &w[1]))
        .collect();

    let length = if segments.is_empty() {
        None
    } else {
        Some(segments.iter().map(|s| s.len).sum())
    };

    FeatureSet {
        angles,
        segments,
        length,
        dtw_distance: None,
    }
}

/// Angle at the vertex joining two segments, in degrees: between the reversed
/// incoming vector and the outgoing one.
fn interior_angle(a: &Segment, b: &Segment) -> f64 {
    let denom = a.len * b.len;
    if denom == 0.0 {
        return 0.0;
    }
    let dot = -a.dx * b.dx - a.dy * b.dy;
    (dot / denom).clamp(-1.0, 1.0).acos().to_degrees()
}
