use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use crate::fetch;

pub fn run(args: &CheckArgs) -> Result<()> {
    let client = fetch::client()?;

    let mut missing = 0;
    for url in [&args.education_url, &args.counties_url] {
        if fetch::remote_exists(&client, url)? {
            println!("ok       {url}");
        } else {
            println!("missing  {url}");
            missing += 1;
        }
    }

    if missing > 0 {
        bail!("{missing} dataset(s) unreachable");
    }
    Ok(())
}
