//! Inlet patch face areas exported from the mesh.
//!
//! The export holds one face area vector `Sf` per line as three comma
//! separated values. Only the streamwise (x) component is used: its
//! magnitude is the face's projected area normal to the flow.

use nalgebra::Vector3;
use ndarray::Array1;
use std::{fs, path::Path};
use tracing::debug;

use crate::utils::{CorrectionError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct InletPatch {
    face_areas: Vec<Vector3<f64>>,
}

impl InletPatch {
    pub fn new(face_areas: Vec<Vector3<f64>>) -> Result<Self> {
        if face_areas.is_empty() {
            return Err(CorrectionError::EmptyGeometry);
        }
        let patch = Self { face_areas };
        let total = patch.total_area();
        if !(total > 0.0) || !total.is_finite() {
            return Err(CorrectionError::ZeroInletArea);
        }
        Ok(patch)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let patch = Self::parse(&contents)?;
        debug!(
            "Loaded {} inlet faces from {}",
            patch.n_faces(),
            path.display()
        );
        Ok(patch)
    }

    /// Parses comma separated rows. Blank lines and `#` comments are skipped.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut face_areas = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            face_areas.push(parse_row(line, index + 1)?);
        }

        Self::new(face_areas)
    }

    pub fn n_faces(&self) -> usize {
        self.face_areas.len()
    }

    pub fn face_areas(&self) -> &[Vector3<f64>] {
        &self.face_areas
    }

    /// Per-face streamwise area `|Sf.x|`.
    pub fn streamwise_areas(&self) -> Array1<f64> {
        self.face_areas.iter().map(|sf| sf.x.abs()).collect()
    }

    /// Total streamwise area `S` of the patch.
    pub fn total_area(&self) -> f64 {
        self.face_areas.iter().map(|sf| sf.x.abs()).sum()
    }
}

fn parse_row(line: &str, line_number: usize) -> Result<Vector3<f64>> {
    let cells: Vec<&str> = line.split(',').map(str::trim).collect();
    if cells.len() != 3 {
        return Err(CorrectionError::GeometryParse {
            line: line_number,
            message: format!("expected 3 columns, found {}", cells.len()),
        });
    }

    let mut components = [0.0; 3];
    for (component, cell) in components.iter_mut().zip(&cells) {
        *component = cell
            .parse::<f64>()
            .map_err(|e| CorrectionError::GeometryParse {
                line: line_number,
                message: format!("'{}': {}", cell, e),
            })?;
    }

    Ok(Vector3::from(components))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_uses_absolute_streamwise_component() {
        let patch = InletPatch::parse("-0.25,0.0,0.0\n-0.5,1e-3,2e-3\n0.25,0,0\n").unwrap();
        assert_eq!(patch.n_faces(), 3);
        assert_eq!(
            patch.streamwise_areas(),
            ndarray::array![0.25, 0.5, 0.25]
        );
        assert_relative_eq!(patch.total_area(), 1.0);
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let contents = "# inlet face area vectors\n\n -1.0 , 0.0 , 0.0 \n\n-2.0,0.0,0.0\n";
        let patch = InletPatch::parse(contents).unwrap();
        assert_eq!(patch.n_faces(), 2);
        assert_relative_eq!(patch.total_area(), 3.0);
    }

    #[test]
    fn test_parse_reports_line_of_bad_row() {
        let err = InletPatch::parse("1,0,0\n1,0\n").unwrap_err();
        match err {
            CorrectionError::GeometryParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_cell() {
        let err = InletPatch::parse("1,0,0\n\n(1,0,0)\n").unwrap_err();
        match err {
            CorrectionError::GeometryParse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("(1"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_empty_geometry() {
        assert!(matches!(
            InletPatch::parse("# nothing\n\n"),
            Err(CorrectionError::EmptyGeometry)
        ));
    }

    #[test]
    fn test_zero_streamwise_area() {
        assert!(matches!(
            InletPatch::parse("0,1,0\n0,0,1\n"),
            Err(CorrectionError::ZeroInletArea)
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "-0.1,0,0").unwrap();
        writeln!(file, "-0.3,0,0").unwrap();

        let patch = InletPatch::from_file(file.path()).unwrap();
        assert_relative_eq!(patch.total_area(), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = InletPatch::from_file("/nonexistent/inletPatchFaceAreaVectors").unwrap_err();
        assert!(matches!(err, CorrectionError::Io(_)));
    }
}
