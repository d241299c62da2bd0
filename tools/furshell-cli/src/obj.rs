//! OBJ mesh loading

use anyhow::{Context, Result, bail};
use furshell::{SurfaceMesh, Vertex};
use glam::{Vec2, Vec3};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Face corner reference: `(v, vt, vn)`, zero-based
type Corner = (usize, Option<usize>, Option<usize>);

/// Load an OBJ file as a triangulated surface mesh
pub fn load_obj(input: &Path) -> Result<SurfaceMesh> {
    let file = File::open(input).with_context(|| format!("Failed to open OBJ: {:?}", input))?;
    parse_obj(BufReader::new(file)).with_context(|| format!("Failed to parse OBJ: {:?}", input))
}

/// Parse OBJ text
///
/// Polygons are fan-triangulated. Corners sharing the same `(v, vt, vn)`
/// triple become one vertex. Normals are required.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<SurfaceMesh> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<Vec2> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();

    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut corner_ids: HashMap<Corner, u32> = HashMap::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let at = || format!("line {}", line_no + 1);

        match parts[0] {
            "v" => positions.push(parse_floats::<3>(&parts[1..]).with_context(at)?.into()),
            "vt" => tex_coords.push(parse_floats::<2>(&parts[1..]).with_context(at)?.into()),
            "vn" => normals.push(parse_floats::<3>(&parts[1..]).with_context(at)?.into()),
            "f" => {
                let corners = parts[1..]
                    .iter()
                    .map(|s| parse_corner(s))
                    .collect::<Result<Vec<Corner>>>()
                    .with_context(at)?;
                if corners.len() < 3 {
                    bail!("{}: face needs at least 3 corners", at());
                }

                for i in 1..corners.len() - 1 {
                    for corner in [corners[0], corners[i], corners[i + 1]] {
                        let id = match corner_ids.get(&corner) {
                            Some(&id) => id,
                            None => {
                                let vertex = resolve(corner, &positions, &tex_coords, &normals)
                                    .with_context(at)?;
                                let id = vertices.len() as u32;
                                vertices.push(vertex);
                                corner_ids.insert(corner, id);
                                id
                            }
                        };
                        indices.push(id);
                    }
                }
            }
            _ => {}
        }
    }

    if vertices.is_empty() {
        bail!("No faces found in OBJ file");
    }

    tracing::debug!(
        "Parsed OBJ mesh: {} vertices, {} triangles",
        vertices.len(),
        indices.len() / 3
    );

    Ok(SurfaceMesh::new(vertices, indices)?)
}

fn parse_floats<const N: usize>(parts: &[&str]) -> Result<[f32; N]> {
    if parts.len() < N {
        bail!("expected {} components, found {}", N, parts.len());
    }
    let mut out = [0.0; N];
    for (slot, s) in out.iter_mut().zip(parts) {
        *slot = s.parse().with_context(|| format!("invalid number {:?}", s))?;
    }
    Ok(out)
}

/// Parse a corner reference: `v`, `v/vt`, `v//vn` or `v/vt/vn`
fn parse_corner(s: &str) -> Result<Corner> {
    let mut fields = s.split('/');
    let index = |field: Option<&str>| -> Result<Option<usize>> {
        match field.filter(|f| !f.is_empty()) {
            None => Ok(None),
            Some(f) => {
                let i: usize = f
                    .parse()
                    .with_context(|| format!("invalid index {:?} in {:?}", f, s))?;
                // OBJ indices are 1-based
                i.checked_sub(1)
                    .map(Some)
                    .with_context(|| format!("index 0 in {:?}", s))
            }
        }
    };

    let v = index(fields.next())?.with_context(|| format!("missing position in {:?}", s))?;
    let vt = index(fields.next())?;
    let vn = index(fields.next())?;
    Ok((v, vt, vn))
}

fn resolve(
    (v, vt, vn): Corner,
    positions: &[Vec3],
    tex_coords: &[Vec2],
    normals: &[Vec3],
) -> Result<Vertex> {
    let position = *positions
        .get(v)
        .with_context(|| format!("position {} out of range", v + 1))?;
    let uv = match vt {
        Some(i) => *tex_coords
            .get(i)
            .with_context(|| format!("texcoord {} out of range", i + 1))?,
        None => Vec2::ZERO,
    };
    let Some(n) = vn else {
        bail!("face corner without a normal; fur extrusion needs vertex normals");
    };
    let normal = *normals
        .get(n)
        .with_context(|| format!("normal {} out of range", n + 1))?;

    Ok(Vertex::new(position, normal, uv))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 0 1
v 0 0 1
vt 0 0
vt 1 1
vn 0 1 0
f 1/1/1 2/1/1 3/2/1 4/2/1
";

    #[test]
    fn test_quad_fan_triangulated() {
        let mesh = parse_obj(QUAD.as_bytes()).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices()[2].uv, Vec2::ONE);
        assert_eq!(mesh.vertices()[3].normal, Vec3::Y);
    }

    #[test]
    fn test_shared_corners_dedup() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvn 0 0 1\n\
                    f 1//1 2//1 3//1\nf 2//1 4//1 3//1\n";
        let mesh = parse_obj(text.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices(), &[0, 1, 2, 1, 3, 2]);
        assert_eq!(mesh.vertices()[0].uv, Vec2::ZERO);
    }

    #[test]
    fn test_missing_normals_rejected() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let err = parse_obj(text.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("normal"));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let text = "v 0 0 0\nv 1 zero 0\n";
        let err = parse_obj(text.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_out_of_range_reference() {
        let text = "v 0 0 0\nvn 0 1 0\nf 1//1 2//1 3//1\n";
        assert!(parse_obj(text.as_bytes()).is_err());
    }

    #[test]
    fn test_no_faces() {
        assert!(parse_obj("v 0 0 0\n".as_bytes()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_obj(&dir.path().join("missing.obj")).is_err());
    }
}
