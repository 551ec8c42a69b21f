use spade::{ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation};

use crate::emit::{cull_repeats, ExtrudedShape};
use crate::error::{Result, TessellationError};
use crate::math::polygon_2d::{classify_point, Containment};
use crate::math::{Point, Vector3};

use super::TriangleMesh;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Tessellates an extruded shape into a closed triangle mesh.
///
/// Caps come from a constrained Delaunay triangulation of the footprint;
/// each footprint edge contributes one side quad split into two triangles.
/// Caps and sides carry flat normals.
pub struct TessellateShape<'a> {
    shape: &'a ExtrudedShape,
}

impl<'a> TessellateShape<'a> {
    /// Creates a new `TessellateShape` operation.
    #[must_use]
    pub fn new(shape: &'a ExtrudedShape) -> Self {
        Self { shape }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::Failed`] for a footprint with fewer than
    /// three distinct vertices, zero area or crossing edges.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let footprint = self.shape.footprint.to_ccw();
        let outline = cull_repeats(footprint.points());
        if outline.len() < 3 || footprint.area() <= 0.0 {
            return Err(TessellationError::Failed(format!(
                "shape {} has a degenerate footprint",
                self.shape.name
            ))
            .into());
        }

        let cap = triangulate_cap(&outline)?;
        let (z0, z1) = (self.shape.zmin, self.shape.zmax);
        let mut mesh = TriangleMesh::default();

        let down = -Vector3::z();
        let up = Vector3::z();
        for &[a, b, c] in &cap {
            // reversed so the bottom faces -z
            push_triangle(&mut mesh, [a, c, b].map(|p| p.to_point3(z0)), down)?;
            push_triangle(&mut mesh, [a, b, c].map(|p| p.to_point3(z1)), up)?;
        }

        let n = outline.len();
        for i in 0..n {
            let a = outline[i];
            let b = outline[(i + 1) % n];
            let d = b - a;
            // the outside of a counter-clockwise edge is on its right
            let normal = Vector3::new(d.y, -d.x, 0.0).normalize();
            let (a0, b0, a1, b1) = (a.to_point3(z0), b.to_point3(z0), a.to_point3(z1), b.to_point3(z1));
            push_triangle(&mut mesh, [a0, b0, b1], normal)?;
            push_triangle(&mut mesh, [a0, b1, a1], normal)?;
        }
        Ok(mesh)
    }
}

/// Counter-clockwise triangles covering a simple counter-clockwise outline.
fn triangulate_cap(outline: &[Point]) -> Result<Vec<[Point; 3]>> {
    let mut cdt = Cdt::new();
    let handles = outline
        .iter()
        .map(|p| {
            cdt.insert(SpadePoint2::new(p.x, p.y))
                .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    for (i, &from) in handles.iter().enumerate() {
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::Failed("footprint edges cross".into()).into());
        }
        cdt.add_constraint(from, to);
    }

    // Constraint edges split the triangulation cleanly, so one interior
    // sample per face decides its side.
    let mut triangles = Vec::new();
    for face in cdt.inner_faces() {
        let [a, b, c] = face.vertices().map(|v| {
            let pos = v.position();
            Point::new(pos.x, pos.y)
        });
        let centroid = (a + b + c) / 3.0;
        if classify_point(outline, centroid) != Containment::Inside {
            continue;
        }
        if (b - a).cross(c - a) < 0.0 {
            triangles.push([a, c, b]);
        } else {
            triangles.push([a, b, c]);
        }
    }
    Ok(triangles)
}

fn push_triangle(mesh: &mut TriangleMesh, corners: [crate::math::Point3; 3], normal: Vector3) -> Result<()> {
    let base = u32::try_from(mesh.vertices.len())
        .map_err(|_| TessellationError::Failed("mesh exceeds u32 indices".into()))?;
    for corner in corners {
        mesh.vertices.push(corner);
        mesh.normals.push(normal);
    }
    mesh.indices.push([base, base + 1, base + 2]);
    Ok(())
}
