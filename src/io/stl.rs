use super::IoError;
use crate::mesh::Mesh;
use crate::parts::Parts;
use crate::triangulated::Triangulated3D;
use std::fmt::Debug;
use std::fs::{self, File};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk STL flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// Export to ASCII STL
/// Convert this shape to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use window_knob::mesh::Mesh;
/// # use window_knob::io::to_stl_ascii;
/// let cube = Mesh::<()>::cuboid(1.0, 1.0, 1.0, None);
/// let text = to_stl_ascii(&cube, "cube");
/// assert!(text.starts_with("solid cube\n"));
/// assert_eq!(text.matches("endfacet").count(), 12);
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for v in &tri {
            let p = v.pos;
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// The 80-byte header is left blank, so identical geometry always encodes to
/// identical bytes.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();
    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: tri.map(|v| Vertex::new([v.pos.x as f32, v.pos.y as f32, v.pos.z as f32])),
        });
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Encode `mesh` and write it to `path`.
pub fn write_stl<S: Clone + Debug + Send + Sync>(
    mesh: &Mesh<S>,
    name: &str,
    path: &Path,
    format: StlFormat,
) -> Result<(), IoError> {
    let bytes = match format {
        StlFormat::Binary => to_stl_binary(mesh)?,
        StlFormat::Ascii => to_stl_ascii(mesh, name).into_bytes(),
    };
    fs::write(path, &bytes).map_err(|source| IoError::File {
        action: "failed to write",
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        triangles = mesh.triangle_count(),
        bytes = bytes.len(),
        "wrote {name}"
    );
    Ok(())
}

/// Write `knob.stl` and `backing.stl` into `out_dir`, creating it if needed.
///
/// Returns the written paths, knob first.
pub fn export_parts(parts: &Parts, out_dir: &Path, format: StlFormat) -> Result<Vec<PathBuf>, IoError> {
    fs::create_dir_all(out_dir).map_err(|source| IoError::File {
        action: "failed to create",
        path: out_dir.to_path_buf(),
        source,
    })?;
    debug!(dir = %out_dir.display(), ?format, "exporting parts");

    let mut written = Vec::with_capacity(2);
    for (name, mesh) in parts.iter() {
        let path = out_dir.join(format!("{name}.stl"));
        write_stl(mesh, name, &path, format)?;
        written.push(path);
    }
    Ok(written)
}

/// Triangle and vertex counts of an STL file as a slicer would see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StlSummary {
    pub triangles: usize,
    /// Distinct single-precision vertex positions
    pub vertices: usize,
}

impl StlSummary {
    /// Read an ASCII or binary STL back and count its contents.
    pub fn read(path: &Path) -> Result<Self, IoError> {
        let mut file = File::open(path).map_err(|source| IoError::File {
            action: "failed to open",
            path: path.to_path_buf(),
            source,
        })?;
        let mesh = stl_io::read_stl(&mut file)
            .map_err(|e| IoError::MalformedInput(format!("{}: {e}", path.display())))?;
        Ok(StlSummary {
            triangles: mesh.faces.len(),
            vertices: mesh.vertices.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_size_matches_triangle_count() {
        let cube = Mesh::<()>::cuboid(2.0, 2.0, 2.0, None);
        let bytes = to_stl_binary(&cube).unwrap();
        // 80-byte header, u32 count, 50 bytes per triangle
        assert_eq!(bytes.len(), 84 + 50 * 12);
        assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]), 12);
    }

    #[test]
    fn ascii_round_trip_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        let cube = Mesh::<()>::cuboid(1.0, 1.0, 1.0, None);
        write_stl(&cube, "cube", &path, StlFormat::Ascii).unwrap();

        let summary = StlSummary::read(&path).unwrap();
        assert_eq!(summary, StlSummary { triangles: 12, vertices: 8 });
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = StlSummary::read(Path::new("/nonexistent/knob.stl")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/knob.stl"));
    }
}
