//! CPU-side geometry: shaded cuboid faces in clip space
//!
//! Faces pointing away from the eye are dropped here; the pipeline's depth
//! test resolves occlusion between the rest.

use glam::{Vec3, Vec4};

use super::vertex::{Vertex, colors};
use crate::camera::Camera;
use crate::consts::BLOCK_HEIGHT;
use crate::sim::Block;

/// Drawable box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub center: Vec3,
    pub size: Vec3,
    pub color: [f32; 3],
}

impl From<&Block> for Cuboid {
    fn from(block: &Block) -> Self {
        Self {
            center: block.position,
            size: Vec3::new(block.width, BLOCK_HEIGHT, block.depth),
            color: block.color,
        }
    }
}

/// Face normal plus two tangents with `u × v = n`
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

/// Lambert shading with one directional light plus ambient
pub fn shade(color: [f32; 3], normal: Vec3, light_dir: Vec3) -> [f32; 4] {
    let diffuse = normal.dot(light_dir).max(0.0) * colors::SUN;
    let k = (colors::AMBIENT + diffuse).min(1.0);
    [color[0] * k, color[1] * k, color[2] * k, 1.0]
}

/// Triangulate every camera-facing face
pub fn build_vertices<'a>(
    cuboids: impl IntoIterator<Item = &'a Cuboid>,
    camera: &Camera,
    light_dir: Vec3,
) -> Vec<Vertex> {
    let light_dir = light_dir.normalize_or_zero();
    let view_proj = camera.view_proj();
    let mut vertices = Vec::new();

    for cuboid in cuboids {
        let half = cuboid.size * 0.5;
        for (n, u, v) in FACES {
            let face_center = cuboid.center + n * n.abs().dot(half);
            if n.dot(camera.eye - face_center) <= 0.0 {
                continue;
            }
            let du = u * u.abs().dot(half);
            let dv = v * v.abs().dot(half);
            let corners = [
                face_center - du - dv,
                face_center + du - dv,
                face_center + du + dv,
                face_center - du + dv,
            ];
            let color = shade(cuboid.color, n, light_dir);
            let clip = corners.map(|p| (view_proj * Vec4::from((p, 1.0))).to_array());
            for i in [0, 1, 2, 0, 2, 3] {
                vertices.push(Vertex::new(clip[i], color));
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn camera() -> Camera {
        Camera::from_settings(&Settings::default(), 800, 600)
    }

    fn unit_box(center: Vec3) -> Cuboid {
        Cuboid {
            center,
            size: Vec3::ONE,
            color: [1.0, 0.0, 0.0],
        }
    }

    fn ndc_depth(camera: &Camera, p: Vec3) -> f32 {
        let clip = camera.view_proj() * Vec4::from((p, 1.0));
        clip.z / clip.w
    }

    #[test]
    fn test_box_shows_three_faces_from_corner_view() {
        let vertices = build_vertices([unit_box(Vec3::ZERO)].iter(), &camera(), Vec3::ONE);
        // +X, +Y, +Z face the default eye at (4, 10, 10)
        assert_eq!(vertices.len(), 3 * 6);
    }

    #[test]
    fn test_vertices_stay_inside_depth_range() {
        let boxes = [
            Cuboid::from(&Block::new(1, Vec3::ZERO, 3.0, 3.0, crate::sim::Axis::None)),
            unit_box(Vec3::new(-1.3, 1.0, 0.0)),
        ];
        for vertex in build_vertices(boxes.iter(), &camera(), Vec3::ONE) {
            let [_, _, z, w] = vertex.position;
            assert!(w > 0.0);
            assert!((0.0..=1.0).contains(&(z / w)));
        }
    }

    #[test]
    fn test_slice_on_base_edge_is_nearer_than_base_top() {
        // Narrow trimmed layer resting on the base's -X edge. Along the ray
        // through a point on its +X face, the base top lies behind it.
        let camera = camera();
        let on_slice_face = Vec3::new(-1.1, 0.55, 0.0);
        let dir = on_slice_face - camera.eye;
        let on_base_top = camera.eye + dir * ((0.5 - camera.eye.y) / dir.y);
        assert!(on_base_top.x.abs() < 1.5 && on_base_top.z.abs() < 1.5);

        assert!(ndc_depth(&camera, on_slice_face) < ndc_depth(&camera, on_base_top));
    }

    #[test]
    fn test_shade_ambient_only_when_facing_away() {
        let lit = shade([1.0, 0.5, 0.0], Vec3::Y, Vec3::Y);
        let dark = shade([1.0, 0.5, 0.0], Vec3::NEG_Y, Vec3::Y);
        assert_eq!(lit, [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(dark, [0.25, 0.125, 0.0, 1.0]);
    }

    #[test]
    fn test_cuboid_from_block_uses_layer_height() {
        let block = Block::new(1, Vec3::ZERO, 2.5, 3.0, crate::sim::Axis::X);
        let cuboid = Cuboid::from(&block);
        assert_eq!(cuboid.size, Vec3::new(2.5, BLOCK_HEIGHT, 3.0));
    }
}
