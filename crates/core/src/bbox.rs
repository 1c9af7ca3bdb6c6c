#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box. Non-finite points are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
    empty: bool,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
            empty: true,
        }
    }

    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        debug_assert!((0..3).all(|a| min[a] <= max[a]), "min must not exceed max");
        Self {
            min,
            max,
            empty: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Returns `false` when the point was ignored for being non-finite.
    pub fn expand_with_point(&mut self, point: [f32; 3]) -> bool {
        if !point.iter().all(|v| v.is_finite()) {
            return false;
        }

        if self.empty {
            self.min = point;
            self.max = point;
            self.empty = false;
            return true;
        }

        for (axis, &val) in point.iter().enumerate() {
            self.min[axis] = self.min[axis].min(val);
            self.max[axis] = self.max[axis].max(val);
        }
        true
    }

    pub fn contains(&self, point: &[f32; 3]) -> bool {
        if self.empty || !point.iter().all(|v| v.is_finite()) {
            return false;
        }

        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// `true` iff on every axis both bounds of `self` lie strictly between
    /// the bounds of `outer`.
    ///
    /// Touching faces do not count, and a box is never strictly inside itself.
    pub fn is_strictly_inside(&self, outer: &Aabb) -> bool {
        if self.empty || outer.empty {
            return false;
        }

        (0..3).all(|a| {
            self.min[a] > outer.min[a]
                && self.min[a] < outer.max[a]
                && self.max[a] > outer.min[a]
                && self.max[a] < outer.max[a]
        })
    }

    pub fn extents(&self) -> [f32; 3] {
        if self.empty {
            return [0.0; 3];
        }
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn from_xyz(x: &[f32], y: &[f32], z: &[f32]) -> Self {
        let n = x.len().min(y.len()).min(z.len());
        let mut aabb = Self::empty();
        for i in 0..n {
            aabb.expand_with_point([x[i], y[i], z[i]]);
        }
        aabb
    }

    pub fn from_points(points: impl IntoIterator<Item = [f32; 3]>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_with_point(p);
        }
        aabb
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
