mod tessellate_shape;

pub use tessellate_shape::TessellateShape;

use std::io::Write;

use crate::error::{EmitError, Result};
use crate::math::{Point3, Vector3};

/// A triangle mesh of an extruded shape.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals, one per vertex.
    pub normals: Vec<Vector3>,
    /// Triangle indices, counter-clockwise seen from outside.
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    fn triangle(&self, tri: [u32; 3]) -> [Point3; 3] {
        tri.map(|i| self.vertices[i as usize])
    }

    /// Enclosed volume by the divergence theorem; positive for outward winding.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.indices
            .iter()
            .map(|&tri| {
                let [a, b, c] = self.triangle(tri);
                a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
            })
            .sum()
    }

    /// Total surface area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.indices
            .iter()
            .map(|&tri| {
                let [a, b, c] = self.triangle(tri);
                (b - a).cross(&(c - a)).norm() * 0.5
            })
            .sum()
    }

    /// Writes the mesh as an ASCII STL solid called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError::Io`] if writing fails.
    pub fn write_ascii_stl<W: Write>(&self, name: &str, mut writer: W) -> Result<()> {
        self.write_stl_inner(name, &mut writer)
            .map_err(|e| EmitError::Io(e).into())
    }

    fn write_stl_inner<W: Write>(&self, name: &str, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "solid {name}")?;
        for &tri in &self.indices {
            let [a, b, c] = self.triangle(tri);
            let n = (b - a).cross(&(c - a)).try_normalize(0.0).unwrap_or_else(Vector3::zeros);
            writeln!(w, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z)?;
            writeln!(w, "    outer loop")?;
            for v in [a, b, c] {
                writeln!(w, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z)?;
            }
            writeln!(w, "    endloop")?;
            writeln!(w, "  endfacet")?;
        }
        writeln!(w, "endsolid {name}")?;
        Ok(())
    }
}
