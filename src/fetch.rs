use std::time::Duration;

use reqwest::{blocking::Client, header, redirect::Policy, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ChoroplethError, Result};

/// Default source for the per-county attainment dataset.
pub const EDUCATION_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/for_user_education.json";

/// Default source for the county/state topology.
pub const COUNTIES_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/counties.json";

const USER_AGENT: &str = concat!("choromap/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

/// Build the blocking client both dataset fetches share.
pub fn client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(TIMEOUT)
        .redirect(Policy::limited(10))
        .build()?)
}

/// GET `url` and decode the JSON body into `T`.
///
/// Transport problems, non-success statuses, and decode failures each come
/// back as their own error; the caller decides what a failed fetch means.
pub fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    log::debug!("GET {url}");
    let response = client.get(url).send().map_err(|source| ChoroplethError::Fetch {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ChoroplethError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().map_err(|source| ChoroplethError::Fetch {
        url: url.to_string(),
        source,
    })?;
    log::debug!("{url} returned {} bytes", body.len());

    serde_json::from_str(&body).map_err(|source| ChoroplethError::Malformed {
        origin: url.to_string(),
        source,
    })
}

/// Lightweight existence probe for a remote document.
///
/// `Ok(true)` if the document is reachable, `Ok(false)` on 404/410, an
/// error for anything else.
pub fn remote_exists(client: &Client, url: &str) -> Result<bool> {
    // Try HEAD first.
    if let Ok(response) = client.head(url).send() {
        match response.status() {
            StatusCode::OK => return Ok(true),
            StatusCode::NOT_FOUND | StatusCode::GONE => return Ok(false),
            // Some servers dislike HEAD; fall through to a ranged GET.
            _ => {}
        }
    }

    let response = client
        .get(url)
        .header(header::RANGE, "bytes=0-0")
        .send()
        .map_err(|source| ChoroplethError::Fetch {
            url: url.to_string(),
            source,
        })?;

    match response.status() {
        StatusCode::OK | StatusCode::PARTIAL_CONTENT => Ok(true),
        StatusCode::NOT_FOUND | StatusCode::GONE => Ok(false),
        status => Err(ChoroplethError::Status {
            url: url.to_string(),
            status,
        }),
    }
}
