//! Terminal rendering of endpoint lists and check reports.

use std::io::{self, Write};

use crossterm::style::Stylize;
use upcheck::{CheckResult, Endpoint, Report, Summary};

const NAME_WIDTH: usize = 20;
const URL_WIDTH: usize = 35;

pub fn added(out: &mut impl Write, endpoint: &Endpoint) -> io::Result<()> {
    writeln!(out, "{}", format!("  ✓  Added {} ({})", endpoint.name, endpoint.url).green())
}

pub fn duplicate(out: &mut impl Write, url: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("  !  {url} is already in your list.").yellow())
}

pub fn removed(out: &mut impl Write, url: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("  ✓  Removed {url}").green())
}

pub fn missing(out: &mut impl Write, url: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("  !  {url} was not in your list.").yellow())
}

pub fn endpoint_list(out: &mut impl Write, endpoints: &[Endpoint]) -> io::Result<()> {
    if endpoints.is_empty() {
        return writeln!(out, "{}", "  No endpoints saved. Use 'upcheck add <url>' to add one.".dim());
    }

    writeln!(out, "{}", format!("\n  {} saved endpoint(s):\n", endpoints.len()).bold())?;
    for endpoint in endpoints {
        writeln!(out, "  •  {:<NAME_WIDTH$} {}", endpoint.name, endpoint.url.as_str().dim())?;
    }
    writeln!(out)
}

pub fn nothing_to_check(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "  No endpoints to check. Use 'upcheck add <url>' first.".dim())
}

pub fn checking(out: &mut impl Write, count: usize) -> io::Result<()> {
    writeln!(out, "{}", format!("\n  Checking {count} endpoint(s)...\n").bold())
}

pub fn report(out: &mut impl Write, report: &Report) -> io::Result<()> {
    for result in &report.results {
        check_result(out, result)?;
    }
    summary(out, &report.summary)
}

fn check_result(out: &mut impl Write, result: &CheckResult) -> io::Result<()> {
    let CheckResult { endpoint, outcome } = result;

    if outcome.is_up() {
        writeln!(
            out,
            "  {}  {:<NAME_WIDTH$} {:<URL_WIDTH$} {}  {}",
            "✓".green(),
            endpoint.name,
            endpoint.url,
            outcome.status(),
            format!("({}ms)", outcome.elapsed_ms()).dim(),
        )
    } else {
        writeln!(
            out,
            "  {}  {:<NAME_WIDTH$} {:<URL_WIDTH$} {}",
            "✗".red(),
            endpoint.name,
            endpoint.url,
            outcome.status().to_string().red(),
        )
    }
}

fn summary(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    writeln!(out, "{}", format!("\n  Summary: {}/{} up\n", summary.up_count, summary.total).bold())
}

pub fn json_report(out: &mut impl Write, report: &Report) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use upcheck::ProbeOutcome;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_report() -> Report {
        let results = vec![
            CheckResult {
                endpoint: Endpoint::new("https://ok.test", Some("ok".to_string())),
                outcome: ProbeOutcome::up(200, 40),
            },
            CheckResult {
                endpoint: Endpoint::from_url("https://dead.test"),
                outcome: ProbeOutcome::down(5000),
            },
        ];
        let summary = Summary::from_results(&results);
        Report { results, summary }
    }

    #[test]
    fn test_report_lines() {
        let text = render(|out| report(out, &sample_report()));

        assert!(text.contains("ok"));
        assert!(text.contains("200"));
        assert!(text.contains("(40ms)"));
        assert!(text.contains("https://dead.test"));
        assert!(text.contains("TIMEOUT"));
        assert!(text.contains("Summary: 1/2 up"));
    }

    #[test]
    fn test_empty_list_hint() {
        let text = render(|out| endpoint_list(out, &[]));
        assert!(text.contains("No endpoints saved"));
    }

    #[test]
    fn test_list_shows_names_and_urls() {
        let endpoints = vec![Endpoint::new("https://api.test", Some("api".to_string()))];
        let text = render(|out| endpoint_list(out, &endpoints));

        assert!(text.contains("1 saved endpoint(s)"));
        assert!(text.contains("api"));
        assert!(text.contains("https://api.test"));
    }

    #[test]
    fn test_json_report() {
        let text = render(|out| json_report(out, &sample_report()));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["summary"]["up_count"], 1);
        assert_eq!(value["results"][1]["outcome"]["status"], "TIMEOUT");
    }
}
