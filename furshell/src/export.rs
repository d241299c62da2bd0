//! Geometry export
//!
//! Wavefront OBJ for inspection in DCC tools, plus raw native-endian
//! buffers laid out exactly like [`Vertex`] / [`GraftalPoint`] for direct
//! upload.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bytemuck::Pod;

use crate::error::FurResult;
use crate::vertex::{GraftalPoint, Vertex};

fn write_attributes<W: Write>(w: &mut W, vertices: &[Vertex]) -> std::io::Result<()> {
    for v in vertices {
        writeln!(w, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
    }
    for v in vertices {
        writeln!(w, "vt {} {}", v.uv.x, v.uv.y)?;
    }
    for v in vertices {
        writeln!(w, "vn {} {} {}", v.normal.x, v.normal.y, v.normal.z)?;
    }
    Ok(())
}

fn write_faces<W: Write>(w: &mut W, indices: impl Iterator<Item = u32>) -> std::io::Result<()> {
    let mut corners = indices.map(|i| i + 1);
    while let (Some(a), Some(b), Some(c)) = (corners.next(), corners.next(), corners.next()) {
        writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}

/// Write an indexed triangle list, e.g. a shell stack
pub fn write_triangles_obj<W: Write>(
    w: &mut W,
    vertices: &[Vertex],
    indices: &[u32],
) -> std::io::Result<()> {
    write_attributes(w, vertices)?;
    write_faces(w, indices.iter().copied())
}

/// Write fin quads; each vertex is referenced exactly once
pub fn write_fins_obj<W: Write>(w: &mut W, vertices: &[Vertex]) -> std::io::Result<()> {
    writeln!(w, "# fins: {} quads", vertices.len() / 6)?;
    write_attributes(w, vertices)?;
    write_faces(w, 0..vertices.len() as u32)
}

/// Write graftal points as OBJ point elements
///
/// OBJ has no slot for strand length and opacity; they go into a comment
/// line per point.
pub fn write_graftals_obj<W: Write>(w: &mut W, points: &[GraftalPoint]) -> std::io::Result<()> {
    writeln!(w, "# graftals: {} points", points.len())?;
    for p in points {
        writeln!(w, "v {} {} {}", p.position.x, p.position.y, p.position.z)?;
    }
    for p in points {
        writeln!(w, "vt {} {}", p.uv.x, p.uv.y)?;
    }
    for p in points {
        writeln!(w, "vn {} {} {}", p.normal.x, p.normal.y, p.normal.z)?;
    }
    for (i, p) in points.iter().enumerate() {
        writeln!(w, "# length {} opacity {}", p.length, p.opacity)?;
        writeln!(w, "p {}", i + 1)?;
    }
    Ok(())
}

/// Run `f` against a buffered writer on a freshly created file
pub fn write_file<F>(path: &Path, f: F) -> FurResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let mut w = BufWriter::new(File::create(path)?);
    f(&mut w)?;
    w.flush()?;
    Ok(())
}

/// Write a buffer as raw native-endian bytes
pub fn write_raw<T: Pod>(path: &Path, data: &[T]) -> FurResult<()> {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    std::fs::write(path, bytes)?;
    tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::ShellStack;
    use glam::{Vec2, Vec3};

    fn obj_string(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn count(text: &str, prefix: &str) -> usize {
        text.lines().filter(|l| l.starts_with(prefix)).count()
    }

    fn stack() -> ShellStack {
        let v = |x: f32| Vertex::new(Vec3::new(x, 0.0, 0.0), Vec3::Y, Vec2::ZERO);
        ShellStack {
            vertices: vec![v(0.0), v(1.0), v(2.0), v(0.0), v(1.0), v(2.0)],
            indices: vec![0, 1, 2, 3, 4, 5],
            layers: 2,
        }
    }

    #[test]
    fn test_triangles_obj() {
        let s = stack();
        let text = obj_string(|w| write_triangles_obj(w, &s.vertices, &s.indices));
        assert_eq!(count(&text, "v "), 6);
        assert_eq!(count(&text, "vt "), 6);
        assert_eq!(count(&text, "vn "), 6);
        assert_eq!(count(&text, "f "), 2);
        assert!(text.contains("f 4/4/4 5/5/5 6/6/6"));
    }

    #[test]
    fn test_fins_obj_sequential_faces() {
        let text = obj_string(|w| write_fins_obj(w, &stack().vertices));
        assert!(text.starts_with("# fins: 1 quads"));
        assert!(text.contains("f 1/1/1 2/2/2 3/3/3"));
        assert!(text.contains("f 4/4/4 5/5/5 6/6/6"));
    }

    #[test]
    fn test_graftals_obj() {
        let p = GraftalPoint::from_vertex(&Vertex::new(Vec3::ONE, Vec3::Y, Vec2::ZERO), 0.25, 0.5);
        let text = obj_string(|w| write_graftals_obj(w, &[p, p]));
        assert_eq!(count(&text, "p "), 2);
        assert!(text.contains("# length 0.25 opacity 0.5"));
        assert!(text.contains("v 1 1 1"));
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let s = stack();

        let obj = dir.path().join("shells.obj");
        write_file(&obj, |w| write_triangles_obj(w, &s.vertices, &s.indices)).unwrap();
        assert_eq!(count(&std::fs::read_to_string(&obj).unwrap(), "f "), 2);

        let raw = dir.path().join("shells.vtx");
        write_raw(&raw, &s.vertices).unwrap();
        assert_eq!(std::fs::metadata(&raw).unwrap().len(), 6 * 36);

        let idx = dir.path().join("shells.idx");
        write_raw(&idx, &s.indices).unwrap();
        assert_eq!(std::fs::read(&idx).unwrap()[4..8], 1u32.to_le_bytes());
    }

    #[test]
    fn test_write_file_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("shells.obj");
        let result = write_file(&path, |w| write_fins_obj(w, &stack().vertices));
        assert!(matches!(result, Err(crate::FurError::Io(_))));
    }
}
