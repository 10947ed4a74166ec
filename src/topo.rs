use std::collections::BTreeMap;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::{Deserialize, Deserializer};

use crate::error::{ChoroplethError, Result};

/// Affine transform for quantized topologies: `position * scale + translate`.
#[derive(Debug, Clone, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

/// A TopoJSON document: one shared arc table plus named geometry objects.
///
/// Atlas topologies pre-project into y-down screen space, so decoded
/// coordinates are planar and drawable as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub transform: Option<Transform>,
    pub arcs: Vec<Vec<[f64; 2]>>,
    pub objects: BTreeMap<String, TopoGeometry>,
}

/// A geometry inside a topology. Rings and polygons reference the shared
/// arc table by index rather than carrying coordinates.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum TopoGeometry {
    Polygon {
        #[serde(default, deserialize_with = "deserialize_id")]
        id: Option<u32>,
        arcs: Vec<Vec<i32>>,
    },
    MultiPolygon {
        #[serde(default, deserialize_with = "deserialize_id")]
        id: Option<u32>,
        arcs: Vec<Vec<Vec<i32>>>,
    },
    GeometryCollection {
        #[serde(default)]
        geometries: Vec<TopoGeometry>,
    },
    /// Non-areal members (points, lines) that a choropleth has no use for.
    #[serde(other)]
    Other,
}

/// A drawable region extracted from the topology.
#[derive(Debug, Clone)]
pub struct TopoFeature {
    /// Identifier carried through from the source object (county FIPS).
    pub id: Option<u32>,
    pub shape: MultiPolygon<f64>,
}

/// Atlas ids come as numbers or as zero-padded numeric strings.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
    })
}

impl Topology {
    /// True if the topology ships an object under `name`.
    #[inline]
    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Extract the named object's drawable features, ids carried through.
    pub fn features(&self, name: &str) -> Result<Vec<TopoFeature>> {
        let object = self
            .objects
            .get(name)
            .ok_or_else(|| ChoroplethError::UnknownObject(name.to_string()))?;

        let arcs: Vec<Vec<Coord<f64>>> =
            self.arcs.iter().map(|raw| self.decode_arc(raw)).collect();

        let mut features = Vec::new();
        collect_features(object, &arcs, &mut features)?;
        Ok(features)
    }

    /// Decode one raw arc into absolute planar coordinates.
    fn decode_arc(&self, raw: &[[f64; 2]]) -> Vec<Coord<f64>> {
        match &self.transform {
            Some(t) => {
                // Quantized arcs are delta-encoded; the accumulator resets
                // at the start of every arc.
                let (mut x, mut y) = (0.0, 0.0);
                raw.iter()
                    .map(|p| {
                        x += p[0];
                        y += p[1];
                        Coord {
                            x: x * t.scale[0] + t.translate[0],
                            y: y * t.scale[1] + t.translate[1],
                        }
                    })
                    .collect()
            }
            None => raw.iter().map(|p| Coord { x: p[0], y: p[1] }).collect(),
        }
    }
}

fn collect_features(
    geometry: &TopoGeometry,
    arcs: &[Vec<Coord<f64>>],
    out: &mut Vec<TopoFeature>,
) -> Result<()> {
    match geometry {
        TopoGeometry::Polygon { id, arcs: rings } => {
            let shape = MultiPolygon(vec![assemble_polygon(rings, arcs)?]);
            out.push(TopoFeature { id: *id, shape });
        }
        TopoGeometry::MultiPolygon { id, arcs: polygons } => {
            let shape = MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| assemble_polygon(rings, arcs))
                    .collect::<Result<Vec<Polygon<f64>>>>()?,
            );
            out.push(TopoFeature { id: *id, shape });
        }
        TopoGeometry::GeometryCollection { geometries } => {
            for member in geometries {
                collect_features(member, arcs, out)?;
            }
        }
        TopoGeometry::Other => {}
    }
    Ok(())
}

/// Stitch one polygon: ring 0 is the exterior, the rest are holes.
fn assemble_polygon(rings: &[Vec<i32>], arcs: &[Vec<Coord<f64>>]) -> Result<Polygon<f64>> {
    let mut stitched = rings.iter().map(|ring| stitch_ring(ring, arcs));
    let exterior = match stitched.next() {
        Some(ring) => ring?,
        None => LineString::new(Vec::new()),
    };
    let interiors = stitched.collect::<Result<Vec<LineString<f64>>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Walk a ring's arc indices into one closed coordinate ring.
///
/// A negative index `i` stands for arc `!i` traversed backwards. Adjacent
/// arcs share their junction point, so the previous endpoint is dropped
/// before each append.
fn stitch_ring(ring: &[i32], arcs: &[Vec<Coord<f64>>]) -> Result<LineString<f64>> {
    let mut points: Vec<Coord<f64>> = Vec::new();
    for &index in ring {
        let reversed = index < 0;
        let position = if reversed { !index } else { index };
        let arc = arcs
            .get(position as usize)
            .ok_or(ChoroplethError::ArcOutOfRange(index))?;

        if !points.is_empty() {
            points.pop();
        }
        let start = points.len();
        points.extend_from_slice(arc);
        if reversed {
            points[start..].reverse();
        }
    }

    if points.first() != points.last() {
        if let Some(&first) = points.first() {
            points.push(first);
        }
    }
    Ok(LineString(points))
}
