use std::f32::consts::TAU;

/// A line-list mesh: flat xyz positions plus paired vertex indices, two per
/// line segment.
pub struct WireMesh {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
}

impl WireMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn line_count(&self) -> usize {
        self.indices.len() / 2
    }
}

/// Tessellate a torus into a wireframe line list.
///
/// The vertex grid is `(radial_segments + 1) x (tubular_segments + 1)`:
/// `u` runs around the main ring, `v` around the tube. Each grid quad
/// contributes its four sides plus one diagonal, matching the look of a
/// triangulated wireframe. Shared edges between neighboring quads are not
/// deduplicated; overdrawn lines render identically.
pub fn torus_wireframe(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> WireMesh {
    let ring_stride = tubular_segments + 1;
    let mut positions = Vec::with_capacity(((radial_segments + 1) * ring_stride * 3) as usize);

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            positions.push((radius + tube * v.cos()) * u.cos());
            positions.push((radius + tube * v.cos()) * u.sin());
            positions.push(tube * v.sin());
        }
    }

    let mut indices = Vec::with_capacity((radial_segments * tubular_segments * 10) as usize);
    for j in 0..radial_segments {
        for i in 0..tubular_segments {
            let a = j * ring_stride + i;
            let b = (j + 1) * ring_stride + i;
            let c = (j + 1) * ring_stride + i + 1;
            let d = j * ring_stride + i + 1;
            // Quad sides plus the b-d diagonal
            indices.extend_from_slice(&[a, b, b, c, c, d, d, a, b, d]);
        }
    }

    WireMesh { positions, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    // ── torus_wireframe ──

    #[test]
    fn test_torus_vertex_count() {
        let mesh = torus_wireframe(10.0, 3.0, 16, 100);
        assert_eq!(mesh.vertex_count(), 17 * 101);
        assert_eq!(mesh.positions.len(), 17 * 101 * 3);
    }

    #[test]
    fn test_torus_line_count() {
        let mesh = torus_wireframe(10.0, 3.0, 16, 100);
        // 5 edges per grid quad
        assert_eq!(mesh.line_count(), 16 * 100 * 5);
    }

    #[test]
    fn test_torus_vertices_on_surface() {
        let radius = 10.0;
        let tube = 3.0;
        let mesh = torus_wireframe(radius, tube, 16, 100);
        for xyz in mesh.positions.chunks(3) {
            let ring_dist = (xyz[0] * xyz[0] + xyz[1] * xyz[1]).sqrt() - radius;
            let tube_dist = (ring_dist * ring_dist + xyz[2] * xyz[2]).sqrt();
            assert!(
                (tube_dist - tube).abs() < EPSILON,
                "Vertex off torus surface: {xyz:?} (tube distance {tube_dist})"
            );
        }
    }

    #[test]
    fn test_torus_indices_in_bounds() {
        let mesh = torus_wireframe(10.0, 3.0, 4, 6);
        let vertex_count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < vertex_count));
    }
}
