//! Flat and averaged normal computation.

use glam::Vec3;

use super::{Face, Topology, VertexGroups};

/// Returns the outward normal of `face`: the precomputed one if present,
/// otherwise the normalized cross product of its first two edges.
///
/// A degenerate face (fewer than three corners, or collinear ones) yields the
/// zero vector.
pub fn face_normal(face: &Face) -> Vec3 {
    if let Some(normal) = face.normal {
        return normal;
    }

    let [a, b, c] = match face.corners.as_slice() {
        [a, b, c, ..] => [a.position, b.position, c.position],
        _ => return Vec3::ZERO,
    };

    (b - a).cross(c - a).normalize_or_zero()
}

/// Computes one normal per vertex instance, copying each face's normal to all
/// of its corners.
pub fn flat_normals(topology: &Topology) -> Vec<Vec3> {
    let mut normals = Vec::with_capacity(topology.instance_count());

    for face in &topology.faces {
        let normal = face_normal(face);
        normals.extend(std::iter::repeat(normal).take(face.corners.len()));
    }

    normals
}

/// Averages the flat normals of every canonical vertex group and writes the
/// mean back to each member of the group.
///
/// The mean is **not** renormalized. The table is trusted: members outside
/// `flat` are skipped and instances that belong to no group keep a zero
/// averaged normal.
pub fn averaged_normals(flat: &[Vec3], groups: &VertexGroups) -> Vec<Vec3> {
    let mut averaged = vec![Vec3::ZERO; flat.len()];

    for members in groups.iter() {
        let (sum, count) = members
            .iter()
            .filter_map(|&instance| flat.get(instance as usize))
            .fold((Vec3::ZERO, 0u32), |(sum, count), normal| {
                (sum + *normal, count + 1)
            });

        if count == 0 {
            continue;
        }

        let mean = sum / count as f32;

        for &instance in members {
            if let Some(slot) = averaged.get_mut(instance as usize) {
                *slot = mean;
            }
        }
    }

    averaged
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::Vec2;

    use super::*;
    use crate::Corner;

    fn face(positions: [Vec3; 3]) -> Face {
        Face::new(
            positions
                .into_iter()
                .map(|position| Corner::new(position, Vec2::ZERO))
                .collect(),
            [1.0; 4],
        )
    }

    #[test]
    fn counter_clockwise_face_points_outwards() {
        let normal = face_normal(&face([Vec3::ZERO, Vec3::X, Vec3::Y]));

        assert_abs_diff_eq!(normal, Vec3::Z, epsilon = 1e-6);
    }

    #[test]
    fn precomputed_normal_wins_over_winding() {
        let normal = face_normal(&face([Vec3::ZERO, Vec3::X, Vec3::Y]).with_normal(Vec3::NEG_Y));

        assert_eq!(normal, Vec3::NEG_Y);
    }

    #[test]
    fn collinear_face_has_zero_normal() {
        let normal = face_normal(&face([Vec3::ZERO, Vec3::X, Vec3::X * 2.0]));

        assert_eq!(normal, Vec3::ZERO);
    }

    #[test]
    fn mean_is_not_renormalized() {
        let flat = [Vec3::X, Vec3::Y];
        let averaged = averaged_normals(&flat, &VertexGroups::from_rows(&[&[0, 1]]));

        assert_eq!(averaged, vec![Vec3::new(0.5, 0.5, 0.0); 2]);
        assert!(averaged[0].length() < 1.0);
    }

    #[test]
    fn malformed_table_does_not_panic() {
        let flat = [Vec3::X, Vec3::Y, Vec3::Z];
        let averaged = averaged_normals(&flat, &VertexGroups::from_rows(&[&[0, 9], &[]]));

        assert_eq!(averaged, vec![Vec3::X, Vec3::ZERO, Vec3::ZERO]);
    }
}
