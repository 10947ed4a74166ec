use anyhow::{Context, Result};

use crate::cli::RenderArgs;
use crate::education::AttainmentRecord;
use crate::fetch;
use crate::map::ChoroplethMap;
use crate::topo::Topology;

pub fn run(args: &RenderArgs) -> Result<()> {
    let client = fetch::client()?;

    log::info!("fetching education data from {}", args.education_url);
    let records: Vec<AttainmentRecord> = fetch::fetch_json(&client, &args.education_url)
        .with_context(|| format!("[render] education dataset fetch failed ({})", args.education_url))?;
    log::info!("fetched {} county records", records.len());

    log::info!("fetching county topology from {}", args.counties_url);
    let topology: Topology = fetch::fetch_json(&client, &args.counties_url)
        .with_context(|| format!("[render] county topology fetch failed ({})", args.counties_url))?;

    // Both fetches have landed; everything below is local computation.
    let map = ChoroplethMap::assemble(records, &topology, args.buckets)?;
    log::info!(
        "joined {} counties, domain {:?}",
        map.counties().len(),
        map.scale().domain()
    );

    map.to_svg_with_size(&args.output, args.width, args.margin)
        .with_context(|| format!("[render] could not write {}", args.output.display()))?;

    println!("Wrote {}", args.output.display());
    Ok(())
}
