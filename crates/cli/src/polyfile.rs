use anyhow::{Context, Result};
use planar::geom2::{Aabb, Polygon};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

type Vec2 = planar::Vec2<f64>;

/// On-disk polygon: local vertices plus an optional placement transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonFile {
    pub vertices: Vec<[f64; 2]>,
    #[serde(default)]
    pub position: [f64; 2],
    #[serde(default = "unit_scale")]
    pub scale: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub flipped: bool,
}

fn unit_scale() -> f64 {
    1.0
}

impl PolygonFile {
    pub fn into_polygon(self) -> Polygon {
        let mut p =
            Polygon::from_vertices(self.vertices.iter().map(|&[x, y]| Vec2::new(x, y)).collect());
        p.set_position(Vec2::new(self.position[0], self.position[1]))
            .set_scale(self.scale)
            .set_rotation(self.rotation)
            .set_flipped(self.flipped);
        p
    }
}

/// Box as written to reports.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxJson {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl From<Aabb> for BoxJson {
    fn from(b: Aabb) -> Self {
        Self {
            left: b.left(),
            top: b.top(),
            right: b.right(),
            bottom: b.bottom(),
        }
    }
}

/// Output of the `boolean` command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BooleanReport {
    pub op: String,
    pub vertices: Vec<[f64; 2]>,
    pub area: f64,
    pub bbox: BoxJson,
}

impl BooleanReport {
    pub fn new(op: impl Into<String>, result: &Polygon) -> Self {
        Self {
            op: op.into(),
            vertices: result
                .absolute_vertices()
                .iter()
                .map(|v| [v.x, v.y])
                .collect(),
            area: result.area(),
            bbox: result.bounding_box().into(),
        }
    }
}

/// One ray/edge crossing as printed by the `raycast` command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    pub point: [f64; 2],
    pub edge: usize,
    pub distance: f64,
}

pub fn load_polygon<P: AsRef<Path>>(path: P) -> Result<Polygon> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: PolygonFile =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(file.into_polygon())
}

/// Write `value` as pretty JSON, creating parent directories.
pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn transform_fields_are_optional() {
        let file: PolygonFile = serde_json::from_str(r#"{"vertices": [[0,0],[1,0],[0,1]]}"#).unwrap();
        assert_eq!(file.position, [0.0, 0.0]);
        assert_eq!(file.scale, 1.0);
        assert!(!file.flipped);
        let p = file.into_polygon();
        assert_eq!(p.absolute_vertices()[1], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn load_applies_the_transform() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sq.json");
        fs::write(
            &path,
            r#"{"vertices": [[-1,-1],[-1,1],[1,1],[1,-1]], "position": [10, 0], "scale": 2}"#,
        )
        .unwrap();
        let p = load_polygon(&path).unwrap();
        let b = p.bounding_box();
        assert_eq!((b.left(), b.right()), (8.0, 12.0));
        assert!(p.contains_point(Vec2::new(10.5, 0.5)));
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_polygon(&missing).unwrap_err();
        assert!(err.to_string().contains("reading"));
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{\"verts\": []}").unwrap();
        let err = load_polygon(&bad).unwrap_err();
        assert!(err.to_string().contains("parsing"));
    }

    #[test]
    fn write_json_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/out/report.json");
        let report = BooleanReport::new("union", &Polygon::square(2.0));
        write_json(&out, &report).unwrap();
        let parsed: BooleanReport = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.area, 4.0);
        assert_eq!(parsed.bbox.left, -1.0);
    }
}
