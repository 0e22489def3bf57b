use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use upcheck::{Aggregator, Endpoint, HttpTransport, Prober, Report, Summary};

use crate::config::Probe;
use crate::display;
use crate::store::{AddOutcome, EndpointStore, RemoveOutcome};

pub fn add(store: &mut EndpointStore, url: &str, name: Option<String>) -> Result<ExitCode> {
    let mut out = io::stdout().lock();

    if store.add(url, name)? == AddOutcome::Duplicate {
        display::duplicate(&mut out, url)?;
        return Ok(ExitCode::FAILURE);
    }

    store.save().context("Failed to save endpoint list")?;
    info!(url, path = %store.path().display(), "Endpoint added");

    if let Some(endpoint) = store.find(url) {
        display::added(&mut out, endpoint)?;
    }
    Ok(ExitCode::SUCCESS)
}

pub fn remove(store: &mut EndpointStore, url: &str) -> Result<ExitCode> {
    let mut out = io::stdout().lock();

    if store.remove(url) == RemoveOutcome::Missing {
        display::missing(&mut out, url)?;
        return Ok(ExitCode::FAILURE);
    }

    store.save().context("Failed to save endpoint list")?;
    info!(url, path = %store.path().display(), "Endpoint removed");

    display::removed(&mut out, url)?;
    Ok(ExitCode::SUCCESS)
}

pub fn list(store: &EndpointStore) -> Result<ExitCode> {
    display::endpoint_list(&mut io::stdout().lock(), store.endpoints())?;
    Ok(ExitCode::SUCCESS)
}

/// Check the saved endpoints, or only `url` when given
pub async fn status(
    store: &EndpointStore,
    probe: &Probe,
    url: Option<&str>,
    json: bool,
) -> Result<ExitCode> {
    let targets: Vec<Endpoint> = match url {
        Some(url) => vec![store.resolve(url)],
        None => store.endpoints().to_vec(),
    };

    if targets.is_empty() {
        let mut out = io::stdout().lock();
        if json {
            let empty = Report { results: Vec::new(), summary: Summary::default() };
            display::json_report(&mut out, &empty)?;
        } else {
            display::nothing_to_check(&mut out)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Settings are rejected before anything is printed
    let aggregator = build_aggregator(probe)?;

    if !json {
        display::checking(&mut io::stdout().lock(), targets.len())?;
    }

    let report = aggregator.check(&targets).await;

    let mut out = io::stdout().lock();
    if json {
        display::json_report(&mut out, &report)?;
    } else {
        display::report(&mut out, &report)?;
    }
    out.flush()?;

    Ok(ExitCode::from(report.summary.exit_code()))
}

fn build_aggregator(probe: &Probe) -> Result<Aggregator> {
    let transport = Arc::new(HttpTransport::new()?);
    let prober = Prober::from_millis(transport, probe.timeout_ms).context("Invalid probe settings")?;
    let aggregator = Aggregator::new(prober);

    match probe.max_concurrency {
        Some(limit) => aggregator.with_max_concurrency(limit).context("Invalid probe settings"),
        None => Ok(aggregator),
    }
}
