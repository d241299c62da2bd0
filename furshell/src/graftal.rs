//! Graftal point cloud
//!
//! Source vertices become candidate points with a random strand length and
//! opacity. Candidates are ordered with a tolerance-aware comparison so that
//! near-coincident vertices end up adjacent, then a single pass folds each
//! run of coincident points into one.

use std::cmp::Ordering;

use glam::Vec3;
use rand::Rng;
use serde::Deserialize;

use crate::mesh::SurfaceMesh;
use crate::vertex::GraftalPoint;

/// Per-axis tolerance for treating two positions as the same point
pub const MERGE_EPSILON: f32 = 1e-6;

/// How attributes of coincident points are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeWeighting {
    /// `(accumulated + next) / 2` per absorbed point
    ///
    /// With three or more coincident points the result leans toward the
    /// points absorbed last.
    #[default]
    Pairwise,
    /// Arithmetic mean over every point of the cluster
    RunningMean,
}

/// Tolerance-aware position ordering
///
/// Orders by x; falls through to y only when the x values are within
/// [`MERGE_EPSILON`], and to z only when y is within it as well.
fn tolerance_cmp(a: &GraftalPoint, b: &GraftalPoint) -> Ordering {
    if tolerance_less(a.position, b.position) {
        Ordering::Less
    } else if tolerance_less(b.position, a.position) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

fn tolerance_less(p: Vec3, q: Vec3) -> bool {
    if p.x - q.x < -MERGE_EPSILON {
        return true;
    }
    if (p.x - q.x).abs() < MERGE_EPSILON {
        if p.y - q.y < -MERGE_EPSILON {
            return true;
        }
        if (p.y - q.y).abs() < MERGE_EPSILON {
            return p.z - q.z < -MERGE_EPSILON;
        }
    }
    false
}

/// Whether two points coincide on all three axes
fn coincident(a: &GraftalPoint, b: &GraftalPoint) -> bool {
    let d = (a.position - b.position).abs();
    d.x < MERGE_EPSILON && d.y < MERGE_EPSILON && d.z < MERGE_EPSILON
}

/// Stable bottom-up merge sort
///
/// `tolerance_cmp` is not transitive, and `slice::sort_by` may panic when a
/// comparator violates total order. Merge sort only ever asks "is the right
/// element strictly less", which is well defined for any comparator.
fn merge_sort_by<T: Copy, F: Fn(&T, &T) -> Ordering>(items: &mut Vec<T>, cmp: F) {
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut src = std::mem::take(items);
    let mut dst = Vec::with_capacity(len);
    let mut width = 1;

    while width < len {
        dst.clear();
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                if cmp(&src[j], &src[i]) == Ordering::Less {
                    dst.push(src[j]);
                    j += 1;
                } else {
                    dst.push(src[i]);
                    i += 1;
                }
            }
            dst.extend_from_slice(&src[i..mid]);
            dst.extend_from_slice(&src[j..end]);
            start = end;
        }
        std::mem::swap(&mut src, &mut dst);
        width *= 2;
    }

    *items = src;
}

/// Running cluster of coincident points
struct Accumulator {
    point: GraftalPoint,
    count: u32,
}

impl Accumulator {
    fn new(point: GraftalPoint) -> Self {
        Self { point, count: 1 }
    }

    /// Fold `next` in; the cluster keeps the position of its first point
    fn absorb(&mut self, next: &GraftalPoint, weighting: MergeWeighting) {
        let t = match weighting {
            MergeWeighting::Pairwise => 0.5,
            MergeWeighting::RunningMean => 1.0 / (self.count + 1) as f32,
        };
        let p = &mut self.point;
        p.normal = p.normal.lerp(next.normal, t);
        p.uv = p.uv.lerp(next.uv, t);
        p.length += (next.length - p.length) * t;
        p.opacity += (next.opacity - p.opacity) * t;
        self.count += 1;
    }
}

/// Sort and deduplicate graftal points
///
/// Output is in tolerance order; every run of points within
/// [`MERGE_EPSILON`] on all axes of the run's first point collapses into a
/// single point with combined attributes.
pub fn merge_points(mut points: Vec<GraftalPoint>, weighting: MergeWeighting) -> Vec<GraftalPoint> {
    merge_sort_by(&mut points, tolerance_cmp);

    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    let mut acc = Accumulator::new(first);
    for point in iter {
        if coincident(&acc.point, &point) {
            acc.absorb(&point, weighting);
        } else {
            merged.push(acc.point);
            acc = Accumulator::new(point);
        }
    }
    merged.push(acc.point);

    merged
}

/// Build a deduplicated graftal cloud from one or more meshes
///
/// Vertices of all meshes are pooled before merging, so seams shared across
/// meshes collapse too. Each candidate gets `length = U(0,1) * max_length`
/// and `opacity = U(0,1)`.
pub fn build_graftals<'a, R: Rng>(
    meshes: impl IntoIterator<Item = &'a SurfaceMesh>,
    max_length: f32,
    weighting: MergeWeighting,
    rng: &mut R,
) -> Vec<GraftalPoint> {
    let candidates: Vec<GraftalPoint> = meshes
        .into_iter()
        .flat_map(SurfaceMesh::vertices)
        .map(|v| {
            let length = rng.random::<f32>() * max_length;
            let opacity = rng.random::<f32>();
            GraftalPoint::from_vertex(v, length, opacity)
        })
        .collect();

    if candidates.is_empty() {
        tracing::warn!("No vertices to build graftals from");
        return Vec::new();
    }

    let source_count = candidates.len();
    let merged = merge_points(candidates, weighting);
    tracing::debug!(
        "Merged {} graftal candidates into {} points",
        source_count,
        merged.len()
    );
    merged
}
