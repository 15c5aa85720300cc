//! Configuration options for voxsculpt.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Global configuration options for voxsculpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Isolevel used when an extraction does not name one.
    pub isolevel: f32,

    /// Whether extraction runs on the rayon thread pool.
    pub parallel_extraction: bool,

    /// Whether brushes only visit samples near their influence sphere.
    pub prune_brush_sweep: bool,

    /// Whether extracted meshes share vertices between adjacent triangles.
    pub weld_vertices: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            isolevel: 0.5,
            parallel_extraction: false,
            prune_brush_sweep: false,
            weld_vertices: true,
        }
    }
}

impl Options {
    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoxelError;

    #[test]
    fn test_defaults() {
        let o = Options::default();
        assert_eq!(o.isolevel, 0.5);
        assert!(!o.parallel_extraction);
        assert!(!o.prune_brush_sweep);
        assert!(o.weld_vertices);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let o = Options::from_json(r#"{ "isolevel": 0.25, "parallel_extraction": true }"#).unwrap();
        assert_eq!(o.isolevel, 0.25);
        assert!(o.parallel_extraction);
        assert!(!o.prune_brush_sweep);
        assert!(o.weld_vertices);
    }

    #[test]
    fn test_json_round_trip() {
        let o = Options {
            isolevel: -1.5,
            prune_brush_sweep: true,
            weld_vertices: false,
            ..Options::default()
        };
        let json = o.to_json().unwrap();
        assert!(json.contains("prune_brush_sweep"));
        assert_eq!(Options::from_json(&json).unwrap(), o);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Options::from_json("{ isolevel: }"),
            Err(VoxelError::JsonError(_))
        ));
    }
}
