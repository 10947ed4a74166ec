use geo::{BoundingRect, Coord, MultiPolygon, Rect};

use crate::{
    education::{AttainmentIndex, AttainmentRecord},
    error::{ChoroplethError, Result},
    scale::{legend_ticks, QuantizeScale},
    topo::Topology,
};

pub const DEFAULT_TITLE: &str = "United States Educational Attainment";
pub const DEFAULT_DESCRIPTION: &str =
    "Percentage of adults age 25 and older with a bachelor's degree or higher (2010-2014)";

/// A county geometry whose identifier resolved against the index.
#[derive(Debug, Clone)]
pub struct CountyShape {
    pub fips: u32,
    pub shape: MultiPolygon<f64>,
}

/// Everything the render stage needs, assembled once and passed around
/// explicitly: county shapes, the attainment index, the color scale, and
/// the legend ticks.
#[derive(Debug, Clone)]
pub struct ChoroplethMap {
    pub(crate) counties: Vec<CountyShape>,
    pub(crate) states: Vec<MultiPolygon<f64>>,
    pub(crate) index: AttainmentIndex,
    pub(crate) scale: QuantizeScale,
    pub(crate) ticks: Vec<i32>,
    pub(crate) title: String,
    pub(crate) description: String,
}

impl ChoroplethMap {
    /// Join the education records against the county topology, deriving the
    /// color scale and legend ticks from the observed value range.
    ///
    /// Every county id must resolve against the index; a miss aborts here
    /// so the render stage never starts on a partial join.
    pub fn assemble(
        records: Vec<AttainmentRecord>,
        topology: &Topology,
        buckets: usize,
    ) -> Result<Self> {
        let index = AttainmentIndex::from_records(records);
        let (min, max) = index.extent()?;
        let scale = QuantizeScale::with_greens(min, max, buckets)?;
        let ticks = legend_ticks(min, max, buckets + 1)?;

        let mut counties = Vec::new();
        for (position, feature) in topology.features("counties")?.into_iter().enumerate() {
            let fips = feature.id.ok_or(ChoroplethError::MissingFeatureId {
                object: "counties".to_string(),
                index: position,
            })?;
            index.require(fips)?;
            counties.push(CountyShape {
                fips,
                shape: feature.shape,
            });
        }

        // State outlines are optional in the topology.
        let states = if topology.has_object("states") {
            topology
                .features("states")?
                .into_iter()
                .map(|feature| feature.shape)
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            counties,
            states,
            index,
            scale,
            ticks,
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        })
    }

    /// Replace the header texts (defaults match the published dataset).
    pub fn with_titles(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.title = title.into();
        self.description = description.into();
        self
    }

    #[inline]
    pub fn counties(&self) -> &[CountyShape] {
        &self.counties
    }

    #[inline]
    pub fn scale(&self) -> &QuantizeScale {
        &self.scale
    }

    #[inline]
    pub fn ticks(&self) -> &[i32] {
        &self.ticks
    }

    /// Bounding box over every drawable shape.
    pub(crate) fn bounds(&self) -> Option<Rect<f64>> {
        self.counties
            .iter()
            .map(|county| &county.shape)
            .chain(self.states.iter())
            .filter_map(|shape| shape.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    Coord {
                        x: a.min().x.min(b.min().x),
                        y: a.min().y.min(b.min().y),
                    },
                    Coord {
                        x: a.max().x.max(b.max().x),
                        y: a.max().y.max(b.max().y),
                    },
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ChoroplethMap;
    use crate::{education::AttainmentRecord, error::ChoroplethError, topo::Topology};

    fn record(fips: u32, value: f64) -> AttainmentRecord {
        AttainmentRecord {
            fips,
            state: "AL".to_string(),
            area_name: format!("County {fips}"),
            bachelors_or_higher: value,
        }
    }

    fn square_topology() -> Topology {
        serde_json::from_value(json!({
            "type": "Topology",
            "arcs": [
                [[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]],
                [[4, 0], [8, 0], [8, 4], [4, 4], [4, 0]]
            ],
            "objects": {
                "counties": {
                    "type": "GeometryCollection",
                    "geometries": [
                        { "type": "Polygon", "id": 1001, "arcs": [[0]] },
                        { "type": "Polygon", "id": 1003, "arcs": [[1]] }
                    ]
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn assemble_joins_and_derives_the_scale() {
        let map = ChoroplethMap::assemble(
            vec![record(1001, 10.0), record(1003, 90.0)],
            &square_topology(),
            7,
        )
        .unwrap();

        assert_eq!(map.counties().len(), 2);
        assert_eq!(map.scale().domain(), (10.0, 90.0));
        assert_eq!(map.ticks(), [10, 20, 30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn join_miss_aborts_assembly() {
        // 9999 keeps the value range non-degenerate but matches no geometry.
        let err = ChoroplethMap::assemble(
            vec![record(1001, 10.0), record(9999, 90.0)],
            &square_topology(),
            7,
        )
        .unwrap_err();
        assert!(matches!(err, ChoroplethError::UnknownCounty(1003)));
        assert_eq!(err.to_string(), "unknown county identifier 1003");
    }

    #[test]
    fn county_without_id_aborts_assembly() {
        let topology: Topology = serde_json::from_value(json!({
            "type": "Topology",
            "arcs": [[[0, 0], [4, 0], [4, 4], [0, 0]]],
            "objects": {
                "counties": {
                    "type": "GeometryCollection",
                    "geometries": [{ "type": "Polygon", "arcs": [[0]] }]
                }
            }
        }))
        .unwrap();

        let err = ChoroplethMap::assemble(
            vec![record(1001, 10.0), record(1003, 90.0)],
            &topology,
            7,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ChoroplethError::MissingFeatureId { index: 0, .. }
        ));
    }

    #[test]
    fn degenerate_value_range_aborts_assembly() {
        let err = ChoroplethMap::assemble(
            vec![record(1001, 42.0), record(1003, 42.0)],
            &square_topology(),
            7,
        )
        .unwrap_err();
        assert!(matches!(err, ChoroplethError::DegenerateRange(v) if v == 42.0));
    }

    #[test]
    fn bounds_cover_every_county() {
        let map = ChoroplethMap::assemble(
            vec![record(1001, 10.0), record(1003, 90.0)],
            &square_topology(),
            7,
        )
        .unwrap();

        let bounds = map.bounds().unwrap();
        assert_eq!((bounds.min().x, bounds.min().y), (0.0, 0.0));
        assert_eq!((bounds.max().x, bounds.max().y), (8.0, 4.0));
    }
}
