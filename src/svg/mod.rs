mod proj;
mod writer;

use std::{
    io::{BufWriter, Write},
    path::Path,
};

use geo::Coord;

use self::{
    proj::{multipolygon_to_path, xml_escape, Projection},
    writer::{write_footer, write_header, write_styles, PendingSvg},
};
use crate::{
    error::{ChoroplethError, Result},
    map::ChoroplethMap,
    scale::linear,
};

/// Header band height: title, description, and the legend row.
const HEADER_HEIGHT: f64 = 70.0;
/// Footer band for the source line.
const FOOTER_HEIGHT: f64 = 18.0;

const SOURCE_URL: &str = "https://www.freecodecamp.org/learn/data-visualization/data-visualization-projects/visualize-data-with-a-choropleth-map";

impl ChoroplethMap {
    /// Render to `path` with the default sizing (1000px wide, 10px margin).
    pub fn to_svg(&self, path: &Path) -> Result<()> {
        self.to_svg_with_size(path, 1000, 10)
    }

    /// Render to `path`. `width` is the document width in pixels, `margin`
    /// the padding around the drawing; height follows the data's aspect
    /// ratio.
    pub fn to_svg_with_size(&self, path: &Path, width: i32, margin: i32) -> Result<()> {
        let mut pending = PendingSvg::open(path)?;
        {
            let mut writer = BufWriter::new(&mut pending);
            self.write_svg(&mut writer, width, margin)?;
            writer.flush()?;
        }
        pending.finalize()
    }

    /// Emit the SVG scene into `writer`.
    pub fn write_svg(&self, writer: &mut impl Write, width: i32, margin: i32) -> Result<()> {
        // 1) Fit the drawing: map data bounds onto the band between the
        //    header and the footer.
        let bounds = self.bounds().ok_or(ChoroplethError::EmptyTopology)?;
        let margin = margin as f64;
        let width = width as f64;
        let scale = (width - 2.0 * margin) / bounds.width();
        let height = HEADER_HEIGHT + bounds.height() * scale + 2.0 * margin + FOOTER_HEIGHT;

        // Atlas topologies are already y-down screen space, so no vertical
        // flip here.
        let min = bounds.min();
        let project = move |coord: &Coord<f64>| -> (f64, f64) {
            (
                margin + (coord.x - min.x) * scale,
                HEADER_HEIGHT + margin + (coord.y - min.y) * scale,
            )
        };

        // 2) Emit the scene.
        write_header(writer, width, height)?;
        write_styles(writer)?;
        self.write_titles(writer, margin)?;
        self.write_counties(writer, &project)?;
        self.write_states(writer, &project)?;
        self.write_legend(writer, width, margin)?;
        write_source_line(writer, margin, height)?;
        write_footer(writer)?;
        Ok(())
    }

    fn write_titles(&self, writer: &mut impl Write, margin: f64) -> Result<()> {
        writeln!(
            writer,
            r#"<text id="title" x="{margin}" y="30" font-size="22" font-weight="bold">{}</text>"#,
            xml_escape(&self.title)
        )?;
        writeln!(
            writer,
            r#"<text id="description" x="{margin}" y="52" font-size="12">{}</text>"#,
            xml_escape(&self.description)
        )?;
        Ok(())
    }

    /// One `<path>` per county: fill from the scale, FIPS and value as data
    /// attributes, the joined record as a hover title.
    fn write_counties(&self, writer: &mut impl Write, project: &Projection) -> Result<()> {
        writeln!(writer, r#"<g id="counties">"#)?;
        for county in &self.counties {
            let record = self.index.require(county.fips)?;
            let value = record.bachelors_or_higher;
            let tooltip = format!("{}, {}: {}%", record.area_name, record.state, value);
            writeln!(
                writer,
                r#"<path class="county" data-fips="{}" data-education="{}" fill="{}" d="{}"><title>{}</title></path>"#,
                county.fips,
                value,
                self.scale.color(value),
                multipolygon_to_path(&county.shape, project),
                xml_escape(&tooltip),
            )?;
        }
        writeln!(writer, "</g>")?;
        Ok(())
    }

    fn write_states(&self, writer: &mut impl Write, project: &Projection) -> Result<()> {
        if self.states.is_empty() {
            return Ok(());
        }
        writeln!(writer, r#"<g id="states">"#)?;
        for shape in &self.states {
            writeln!(
                writer,
                r#"<path class="state" d="{}"/>"#,
                multipolygon_to_path(shape, project)
            )?;
        }
        writeln!(writer, "</g>")?;
        Ok(())
    }

    /// Nested legend SVG in the header band: one swatch per tick gap, axis
    /// ticks 15px tall, labels as whole percentages.
    fn write_legend(&self, writer: &mut impl Write, width: f64, margin: f64) -> Result<()> {
        if self.ticks.is_empty() {
            return Ok(());
        }
        let (first, last) = (self.ticks[0], self.ticks[self.ticks.len() - 1]);

        let legend_width = width / 4.0;
        let cell = (legend_width - 20.0) / self.scale.buckets() as f64;
        let swatch_height = cell / 3.0;
        let x = width - legend_width - margin;

        writeln!(
            writer,
            r#"<svg id="legend" x="{x}" y="{margin}" width="{legend_width}" height="50">"#
        )?;

        let axis = linear((first as f64, last as f64), (10.0, legend_width - 10.0));

        // Swatches sit between adjacent ticks; the last tick only closes
        // the final cell.
        for &tick in &self.ticks[..self.ticks.len() - 1] {
            writeln!(
                writer,
                r#"<rect class="legend-cell" x="{:.3}" y="0" width="{:.3}" height="{:.3}" fill="{}"/>"#,
                axis(tick as f64),
                cell,
                swatch_height,
                self.scale.color(tick as f64),
            )?;
        }

        for &tick in &self.ticks {
            let tx = axis(tick as f64);
            writeln!(
                writer,
                r#"<line class="tick" x1="{tx:.3}" y1="0" x2="{tx:.3}" y2="15"/>"#
            )?;
            writeln!(
                writer,
                r#"<text x="{tx:.3}" y="28" font-size="10" text-anchor="middle">{tick}%</text>"#
            )?;
        }

        writeln!(writer, "</svg>")?;
        Ok(())
    }
}

fn write_source_line(writer: &mut impl Write, margin: f64, height: f64) -> Result<()> {
    let y = height - 6.0;
    writeln!(
        writer,
        r#"<a href="{SOURCE_URL}"><text id="source" x="{margin}" y="{y}" font-size="10">Source: freeCodeCamp data visualization course</text></a>"#
    )?;
    Ok(())
}
