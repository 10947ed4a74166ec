use std::borrow::Cow;

use geo::{Coord, CoordsIter, LineString, MultiPolygon};

/// Planar projection: data coordinates to SVG user units.
pub(crate) type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Compact SVG path string for a multipolygon, exteriors and holes as
/// separate subpaths.
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();
    for polygon in &shape.0 {
        ring_to_path(polygon.exterior(), project, &mut out);
        for interior in polygon.interiors() {
            ring_to_path(interior, project, &mut out);
        }
    }
    out
}

/// Append one ring as an SVG subpath: `M x,y L x,y ... Z`.
fn ring_to_path(ring: &LineString<f64>, project: &Projection, out: &mut String) {
    let mut coords = ring.coords_iter().map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!("M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }
}

/// Escape text for element content or attribute values.
pub(crate) fn xml_escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use geo::{Coord, LineString, MultiPolygon, Polygon};

    use super::{multipolygon_to_path, xml_escape};

    #[test]
    fn path_walks_each_ring_once() {
        let square = Polygon::new(
            LineString(vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 4.0, y: 0.0 },
                Coord { x: 4.0, y: 4.0 },
                Coord { x: 0.0, y: 0.0 },
            ]),
            vec![],
        );
        let identity = |coord: &Coord<f64>| (coord.x, coord.y);
        let path = multipolygon_to_path(&MultiPolygon(vec![square]), &identity);
        assert_eq!(path, "M0.000,0.000 L4.000,0.000 L4.000,4.000 L0.000,0.000Z");
    }

    #[test]
    fn holes_become_their_own_subpaths() {
        let donut = Polygon::new(
            LineString(vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 9.0, y: 0.0 },
                Coord { x: 9.0, y: 9.0 },
                Coord { x: 0.0, y: 0.0 },
            ]),
            vec![LineString(vec![
                Coord { x: 3.0, y: 2.0 },
                Coord { x: 6.0, y: 2.0 },
                Coord { x: 6.0, y: 5.0 },
                Coord { x: 3.0, y: 2.0 },
            ])],
        );
        let identity = |coord: &Coord<f64>| (coord.x, coord.y);
        let path = multipolygon_to_path(&MultiPolygon(vec![donut]), &identity);
        assert_eq!(path.matches('M').count(), 2);
        assert_eq!(path.matches('Z').count(), 2);
    }

    #[test]
    fn projection_is_applied_per_point() {
        let triangle = Polygon::new(
            LineString(vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 1.0, y: 0.0 },
                Coord { x: 1.0, y: 1.0 },
                Coord { x: 0.0, y: 0.0 },
            ]),
            vec![],
        );
        let shifted = |coord: &Coord<f64>| (coord.x * 10.0 + 5.0, coord.y * 10.0 + 7.0);
        let path = multipolygon_to_path(&MultiPolygon(vec![triangle]), &shifted);
        assert!(path.starts_with("M5.000,7.000 L15.000,7.000"));
    }

    #[test]
    fn escape_touches_only_markup_characters() {
        assert_eq!(xml_escape("Autauga County, AL: 23.2%"), "Autauga County, AL: 23.2%");
        assert_eq!(
            xml_escape(r#"O'Brien & <Sons> "Co""#),
            "O'Brien &amp; &lt;Sons&gt; &quot;Co&quot;"
        );
    }
}
