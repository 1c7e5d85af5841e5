use cubefall_common::Rgb;
use cubefall_kernel::Cube;
use glam::Vec3;

const H: f32 = 0.5;

/// Corners of a unit cube centered at the origin, four per face.
///
/// Face order: front (+Z), back (-Z), left (-X), right (+X), top (+Y),
/// bottom (-Y).
#[rustfmt::skip]
pub const UNIT_CUBE_FACES: [[[f32; 3]; 4]; 6] = [
    // front
    [[-H, -H,  H], [ H, -H,  H], [ H,  H,  H], [-H,  H,  H]],
    // back
    [[-H, -H, -H], [ H, -H, -H], [ H,  H, -H], [-H,  H, -H]],
    // left
    [[-H, -H, -H], [-H, -H,  H], [-H,  H,  H], [-H,  H, -H]],
    // right
    [[ H, -H, -H], [ H, -H,  H], [ H,  H,  H], [ H,  H, -H]],
    // top
    [[-H,  H, -H], [-H,  H,  H], [ H,  H,  H], [ H,  H, -H]],
    // bottom
    [[-H, -H, -H], [-H, -H,  H], [ H, -H,  H], [ H, -H, -H]],
];

/// One flat-colored quadrilateral in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredQuad {
    pub corners: [Vec3; 4],
    pub color: Rgb,
}

/// The six faces of `cube`, scaled by its size and offset by its position.
pub fn cube_faces(cube: &Cube) -> [ColoredQuad; 6] {
    UNIT_CUBE_FACES.map(|face| ColoredQuad {
        corners: face.map(|v| cube.position + Vec3::from_array(v) * cube.size),
        color: cube.color,
    })
}

/// Quads produced for one frame, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    quads: Vec<ColoredQuad>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(quads: usize) -> Self {
        Self {
            quads: Vec::with_capacity(quads),
        }
    }

    pub fn push_cube(&mut self, cube: &Cube) {
        self.quads.extend(cube_faces(cube));
    }

    pub fn quads(&self) -> &[ColoredQuad] {
        &self.quads
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.quads.len() * 4
    }
}
