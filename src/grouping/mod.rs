//! Grouping of co-located features.
//!
//! Deciding which features share a location is not part of displacement
//! itself; the orchestrator only needs something implementing [`Grouper`].
//! [`DistanceGrouper`] is the default: it merges points that fall within a
//! tolerance box of each other, the way map cluster sources do.

use crate::error::InputError;
use crate::feature::{Coordinate, Feature};

pub mod grid;

use grid::PointGrid;

/// A centroid plus the features sharing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub centroid: Coordinate,
    /// Members in a stable order. Never empty.
    pub members: Vec<&'a Feature>,
}

impl Group<'_> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// A lone feature, which is drawn where it is.
    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }
}

/// Splits features into groups sharing a location within `tolerance` map units.
///
/// Implementations must be order-stable: the same input yields the same groups
/// with members in the same order.
pub trait Grouper {
    fn group<'a>(&self, features: &'a [Feature], tolerance: f64) -> Result<Vec<Group<'a>>, InputError>;
}

/// Greedy box clustering in input order.
///
/// The first unassigned feature seeds a group and pulls in every unassigned
/// feature whose coordinate lies within `tolerance` on both axes. The group's
/// centroid is the mean of its members.
#[derive(Debug, Default, Clone, Copy)]
pub struct DistanceGrouper;

impl Grouper for DistanceGrouper {
    fn group<'a>(&self, features: &'a [Feature], tolerance: f64) -> Result<Vec<Group<'a>>, InputError> {
        let coords = features
            .iter()
            .map(Feature::coordinate)
            .collect::<Result<Vec<_>, _>>()?;

        let mut grid = PointGrid::new(tolerance);
        for (i, &c) in coords.iter().enumerate() {
            grid.insert(i, c);
        }

        let mut assigned = vec![false; features.len()];
        let mut groups = Vec::new();

        for (i, &seed) in coords.iter().enumerate() {
            if assigned[i] {
                continue;
            }

            let members: Vec<usize> = grid
                .query(seed, tolerance)
                .into_iter()
                .filter(|&j| {
                    !assigned[j]
                        && (coords[j].x - seed.x).abs() <= tolerance
                        && (coords[j].y - seed.y).abs() <= tolerance
                })
                .collect();

            let (mut sx, mut sy) = (0.0, 0.0);
            for &j in &members {
                assigned[j] = true;
                sx += coords[j].x;
                sy += coords[j].y;
            }
            let n = members.len() as f64;

            groups.push(Group {
                centroid: Coordinate::new(sx / n, sy / n),
                members: members.into_iter().map(|j| &features[j]).collect(),
            });
        }

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{FeatureId, Geometry};

    fn pt(id: i64, x: f64, y: f64) -> Feature {
        Feature::point(id, Coordinate::new(x, y))
    }

    fn ids(group: &Group<'_>) -> Vec<FeatureId> {
        group.members.iter().filter_map(|f| f.id.clone()).collect()
    }

    #[test]
    fn test_identical_points_share_a_group() {
        let features = vec![pt(1, 5.0, 5.0), pt(2, 5.0, 5.0), pt(3, 5.0, 5.0)];
        let groups = DistanceGrouper.group(&features, 0.0).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].centroid, Coordinate::new(5.0, 5.0));
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_near_points_merge_far_points_stay_apart() {
        let features = vec![pt(1, 0.0, 0.0), pt(2, 100.0, 100.0), pt(3, 2.0, 0.0)];
        let groups = DistanceGrouper.group(&features, 5.0).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(ids(&groups[0]), vec![FeatureId::Number(1), FeatureId::Number(3)]);
        assert_eq!(groups[0].centroid, Coordinate::new(1.0, 0.0));
        assert!(groups[1].is_single());
        assert_eq!(groups[1].centroid, Coordinate::new(100.0, 100.0));
    }

    #[test]
    fn test_groups_are_seeded_greedily_in_input_order() {
        // 2 is within reach of both 1 and 3, but 1 claims it first
        let features = vec![pt(1, 0.0, 0.0), pt(2, 4.0, 0.0), pt(3, 8.0, 0.0)];
        let groups = DistanceGrouper.group(&features, 5.0).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(ids(&groups[0]), vec![FeatureId::Number(1), FeatureId::Number(2)]);
        assert_eq!(ids(&groups[1]), vec![FeatureId::Number(3)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(DistanceGrouper.group(&[], 10.0).unwrap().is_empty());
    }

    #[test]
    fn test_line_geometry_is_rejected() {
        let mut line = pt(1, 0.0, 0.0);
        line.geometry = Geometry::LineString(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]);
        let err = DistanceGrouper.group(std::slice::from_ref(&line), 1.0).unwrap_err();
        assert!(matches!(err, InputError::NonPointGeometry { kind: "LineString", .. }));
    }

    #[test]
    fn test_grouping_is_stable() {
        let features: Vec<Feature> = (0..50)
            .map(|i| pt(i, (i % 7) as f64 * 3.0, (i % 5) as f64 * 3.0))
            .collect();
        let a = DistanceGrouper.group(&features, 4.0).unwrap();
        let b = DistanceGrouper.group(&features, 4.0).unwrap();
        assert_eq!(a, b);

        let total: usize = a.iter().map(Group::len).sum();
        assert_eq!(total, features.len());
    }
}
