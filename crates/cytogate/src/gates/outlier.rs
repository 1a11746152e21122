//! Outlier classification seam.
//!
//! The materializer only queries a classifier; fitting happens elsewhere.
//! `MadClassifier` is a fit-free robust default (modified z-score per axis,
//! Iglewicz–Hoaglin) so the pipeline runs without an external model.

use nalgebra::Vector2;

/// Classifies a 2D point set; `true` marks a point to keep.
///
/// Post: the returned mask has one entry per input point.
pub trait OutlierClassifier {
    fn non_outliers(&self, points: &[Vector2<f64>]) -> Vec<bool>;
}

/// Modified z-score threshold recommended by Iglewicz and Hoaglin.
pub const DEFAULT_Z_THRESHOLD: f64 = 3.5;

/// Consistency constant relating MAD to the standard deviation of a normal.
const MAD_SCALE: f64 = 0.6745;

/// Keeps points whose modified z-score is within `z_threshold` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MadClassifier {
    pub z_threshold: f64,
}

impl Default for MadClassifier {
    fn default() -> Self {
        Self {
            z_threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl MadClassifier {
    pub fn new(z_threshold: f64) -> Self {
        Self { z_threshold }
    }
}

impl OutlierClassifier for MadClassifier {
    fn non_outliers(&self, points: &[Vector2<f64>]) -> Vec<bool> {
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        let keep_x = axis_inliers(&xs, self.z_threshold);
        let keep_y = axis_inliers(&ys, self.z_threshold);
        keep_x.into_iter().zip(keep_y).map(|(a, b)| a && b).collect()
    }
}

/// Per-axis inlier mask. A zero or undefined MAD keeps the whole axis.
fn axis_inliers(values: &[f64], z_threshold: f64) -> Vec<bool> {
    let Some(med) = median(values) else {
        return vec![true; values.len()];
    };
    let dev: Vec<f64> = values.iter().map(|v| (v - med).abs()).collect();
    let mad = match median(&dev) {
        Some(m) if m.is_finite() && m > 0.0 => m,
        _ => return vec![true; values.len()],
    };
    dev.iter().map(|d| MAD_SCALE * d / mad <= z_threshold).collect()
}

fn median(values: &[f64]) -> Option<f64> {
    let mut v: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        Some(0.5 * (v[mid - 1] + v[mid]))
    } else {
        Some(v[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn median_even_odd_and_empty() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[f64::NAN, 5.0]), Some(5.0));
    }

    #[test]
    fn mad_flags_far_point_only() {
        let mut pts: Vec<_> = (0..20)
            .map(|i| vector![10.0 + (i % 5) as f64, 20.0 + (i % 4) as f64])
            .collect();
        pts.push(vector![500.0, 21.0]);
        let mask = MadClassifier::default().non_outliers(&pts);
        assert_eq!(mask.len(), pts.len());
        assert!(mask[..20].iter().all(|&k| k));
        assert!(!mask[20]);
    }

    #[test]
    fn constant_axis_keeps_everything() {
        let pts = vec![vector![1.0, 0.0], vector![1.0, 1.0], vector![1.0, 2.0]];
        assert_eq!(
            MadClassifier::default().non_outliers(&pts),
            vec![true, true, true]
        );
    }
}
