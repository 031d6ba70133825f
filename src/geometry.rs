//! Subdivided plane mesh in the local XY plane.

/// Interleaved-free vertex data, ready for separate GL buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
}

impl PlaneGeometry {
    /// Plane centred on the origin facing +Z. Rows run from the top edge
    /// (+y) down; uv (0, 0) is the bottom-left corner.
    pub fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let grid_x = width_segments.max(1);
        let grid_y = height_segments.max(1);
        let grid_x1 = grid_x + 1;
        let grid_y1 = grid_y + 1;
        let segment_w = width / grid_x as f32;
        let segment_h = height / grid_y as f32;
        let half_w = width / 2.0;
        let half_h = height / 2.0;

        let vertex_count = (grid_x1 * grid_y1) as usize;
        let mut positions = Vec::with_capacity(vertex_count * 3);
        let mut uvs = Vec::with_capacity(vertex_count * 2);

        for iy in 0..grid_y1 {
            let y = iy as f32 * segment_h - half_h;
            for ix in 0..grid_x1 {
                let x = ix as f32 * segment_w - half_w;
                positions.extend_from_slice(&[x, -y, 0.0]);
                uvs.extend_from_slice(&[ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32]);
            }
        }

        let mut indices = Vec::with_capacity((grid_x * grid_y * 6) as usize);
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = ix + grid_x1 * iy;
                let b = ix + grid_x1 * (iy + 1);
                let c = (ix + 1) + grid_x1 * (iy + 1);
                let d = (ix + 1) + grid_x1 * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            positions,
            uvs,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Position of vertex `index`, or `None` past the end.
    pub fn vertex(&self, index: usize) -> Option<[f32; 3]> {
        match self.positions.chunks_exact(3).nth(index)? {
            &[x, y, z] => Some([x, y, z]),
            _ => None,
        }
    }

    pub fn uv(&self, index: usize) -> Option<[f32; 2]> {
        match self.uvs.chunks_exact(2).nth(index)? {
            &[u, v] => Some([u, v]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_segments() {
        let plane = PlaneGeometry::new(15.0, 15.0, 100, 100);
        assert_eq!(plane.vertex_count(), 101 * 101);
        assert_eq!(plane.uvs.len(), 101 * 101 * 2);
        assert_eq!(plane.indices.len(), 100 * 100 * 6);
        assert!(plane
            .indices
            .iter()
            .all(|&i| (i as usize) < plane.vertex_count()));
    }

    #[test]
    fn corners_and_uvs() {
        let plane = PlaneGeometry::new(4.0, 2.0, 2, 1);
        // first vertex is top-left
        assert_eq!(plane.vertex(0), Some([-2.0, 1.0, 0.0]));
        assert_eq!(plane.uv(0), Some([0.0, 1.0]));
        // last vertex is bottom-right
        let last = plane.vertex_count() - 1;
        assert_eq!(plane.vertex(last), Some([2.0, -1.0, 0.0]));
        assert_eq!(plane.uv(last), Some([1.0, 0.0]));
        assert_eq!(plane.vertex(last + 1), None);
        assert_eq!(plane.uv(last + 1), None);
    }

    #[test]
    fn triangles_wind_counter_clockwise_towards_plus_z() {
        let plane = PlaneGeometry::new(1.0, 1.0, 1, 1);
        for tri in plane.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| plane.vertex(i as usize).unwrap());
            let e1 = [b[0] - a[0], b[1] - a[1]];
            let e2 = [c[0] - a[0], c[1] - a[1]];
            let cross_z = e1[0] * e2[1] - e1[1] * e2[0];
            assert!(cross_z > 0.0);
        }
    }
}
