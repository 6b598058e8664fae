//! Indexed triangle meshes.

use std::path::Path;

use log::{debug, warn};

use crate::bitmap::Bitmap;
use crate::error::{AssetError, MeshError};
use crate::math::{Mat4, Vec4};
use crate::render::Renderer;
use crate::vertex::Vertex;

/// An immutable, validated triangle list.
///
/// Every consecutive index triple is one triangle and every index refers to
/// an existing vertex; [`Mesh::new`] refuses anything else, so drawing never
/// has to bounds-check.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotMultipleOfThree(indices.len()));
        }
        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|(_, &i)| i as usize >= vertices.len())
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count: vertices.len(),
            });
        }

        debug!(
            "mesh: {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );
        Ok(Self { vertices, indices })
    }

    /// Load every object in an OBJ file into a single mesh.
    ///
    /// Faces are triangulated and positions/texture coordinates share one
    /// index stream. `v` is flipped so that `v = 0` is the top image row.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let base = vertices.len() as u32;

            vertices.extend(mesh.positions.chunks_exact(3).enumerate().map(|(i, p)| {
                let (u, v) = mesh
                    .texcoords
                    .get(i * 2..i * 2 + 2)
                    .map_or((0.0, 0.0), |t| (t[0], 1.0 - t[1]));
                Vertex::from_xyz_uv(p[0], p[1], p[2], u, v)
            }));
            indices.extend(mesh.indices.iter().map(|&i| base + i));
        }

        debug!("loaded {} ({} objects)", path.display(), models.len());
        Ok(Self::new(vertices, indices)?)
    }

    /// Load an OBJ file, falling back to an empty mesh on failure.
    pub fn from_obj_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::from_obj(path).unwrap_or_else(|err| {
            warn!("drawing nothing for {}: {}", path.display(), err);
            Self::default()
        })
    }

    /// A textured cube spanning `[-1, 1]` on every axis, with each face
    /// mapping the full texture.
    pub fn cube() -> Self {
        // Corners in texture order: top-left, top-right, bottom-right, bottom-left.
        const FACES: [[[f32; 3]; 4]; 6] = [
            // front (-z)
            [[-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0], [-1.0, -1.0, -1.0]],
            // right (+x)
            [[1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0]],
            // back (+z)
            [[1.0, 1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0]],
            // left (-x)
            [[-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0]],
            // top (+y)
            [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]],
            // bottom (-y)
            [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
        ];
        const UVS: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for corners in FACES {
            let base = vertices.len() as u32;
            for ([x, y, z], (u, v)) in corners.into_iter().zip(UVS) {
                vertices.push(Vertex::from_xyz_uv(x, y, z, u, v));
            }
            indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Draw every triangle of the mesh.
    ///
    /// `view_projection` is the camera's combined view and projection
    /// matrix, `model` places the mesh in the world. Returns the number of
    /// pixels written.
    pub fn draw(
        &self,
        renderer: &mut Renderer,
        view_projection: &Mat4,
        model: &Mat4,
        texture: &Bitmap,
    ) -> usize {
        let mvp = *view_projection * *model;
        self.triangles()
            .map(|[a, b, c]| {
                renderer.draw_triangle(
                    &a.transform(&mvp),
                    &b.transform(&mvp),
                    &c.transform(&mvp),
                    texture,
                )
            })
            .sum()
    }

    /// Axis-aligned bounds of the vertex positions, or None for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec4, Vec4)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            let p = v.position;
            (
                Vec4::point(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Vec4::point(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }
}
