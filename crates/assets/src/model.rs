use glam::Vec3;
use std::path::Path;

/// Errors from model import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OBJ parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("model has no vertices")]
    Empty,
}

/// Axis-aligned bounds of a model in its own units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ModelBounds {
    fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Uniform scale that makes a model of `size` fit inside `room`.
///
/// Axes with no extent do not constrain the result. A model that is a
/// single point keeps scale 1.
pub fn fit_scale(size: Vec3, room: Vec3) -> f32 {
    size.to_array()
        .into_iter()
        .zip(room.to_array())
        .filter(|(s, _)| *s > 0.0)
        .map(|(s, r)| r / s)
        .reduce(f32::min)
        .unwrap_or(1.0)
}

/// Scan the vertex records of Wavefront OBJ text and return their bounds.
///
/// Faces, normals, texture coordinates and groups are ignored.
pub fn parse_obj_bounds(source: &str) -> Result<ModelBounds, ImportError> {
    let mut bounds: Option<ModelBounds> = None;

    for (index, line) in source.lines().enumerate() {
        let mut fields = line.split_whitespace();
        if fields.next() != Some("v") {
            continue;
        }
        let line_no = index + 1;
        let mut coords = [0.0f32; 3];
        for (axis, slot) in coords.iter_mut().enumerate() {
            let raw = fields.next().ok_or_else(|| ImportError::Parse {
                line: line_no,
                message: format!("vertex is missing coordinate {axis}"),
            })?;
            *slot = raw.parse().map_err(|_| ImportError::Parse {
                line: line_no,
                message: format!("invalid coordinate {raw:?}"),
            })?;
        }
        let p = Vec3::from_array(coords);
        match bounds.as_mut() {
            Some(b) => b.extend(p),
            None => bounds = Some(ModelBounds::from_point(p)),
        }
    }

    bounds.ok_or(ImportError::Empty)
}

/// Read an OBJ file from disk and return its bounds.
pub fn import_obj(path: impl AsRef<Path>) -> Result<ModelBounds, ImportError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let bounds = parse_obj_bounds(&source)?;
    tracing::debug!(path = %path.display(), size = ?bounds.size(), "model bounds read");
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TETRA: &str = "\
# simple tetrahedron
o tetra
v 0 0 0
v 2 0 0
v 0 4 0
v 0 0 1
vn 0 1 0
f 1 2 3
f 1 3 4
";

    #[test]
    fn bounds_of_vertex_records() {
        let bounds = parse_obj_bounds(TETRA).unwrap();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(2.0, 4.0, 1.0));
        assert_eq!(bounds.center(), Vec3::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn no_vertices_is_empty() {
        assert!(matches!(
            parse_obj_bounds("# nothing\nf 1 2 3\n"),
            Err(ImportError::Empty)
        ));
    }

    #[test]
    fn bad_coordinate_reports_line() {
        let err = parse_obj_bounds("v 0 0 0\nv 1 x 1\n").unwrap_err();
        assert!(matches!(err, ImportError::Parse { line: 2, .. }));
    }

    #[test]
    fn short_vertex_is_rejected() {
        let err = parse_obj_bounds("v 1 2\n").unwrap_err();
        assert!(matches!(err, ImportError::Parse { line: 1, .. }));
    }

    #[test]
    fn fit_scale_uses_tightest_axis() {
        let scale = fit_scale(Vec3::new(2.0, 4.0, 1.0), Vec3::splat(10.0));
        assert_eq!(scale, 2.5);
    }

    #[test]
    fn fit_scale_ignores_flat_axes() {
        assert_eq!(fit_scale(Vec3::new(5.0, 0.0, 2.0), Vec3::splat(10.0)), 2.0);
        assert_eq!(fit_scale(Vec3::ZERO, Vec3::splat(10.0)), 1.0);
    }

    #[test]
    fn fit_scale_shrinks_large_models() {
        assert_eq!(fit_scale(Vec3::new(40.0, 20.0, 20.0), Vec3::splat(10.0)), 0.25);
    }

    #[test]
    fn import_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(TETRA.as_bytes()).unwrap();
        let bounds = import_obj(tmp.path()).unwrap();
        assert_eq!(bounds.size(), Vec3::new(2.0, 4.0, 1.0));
    }

    #[test]
    fn import_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_obj(dir.path().join("missing.obj")).unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
