//! `lexenv` subcommands, kept free of process I/O so they can be tested.

use crate::config::{RunConfig, RunTarget, UsageError};
use crate::scenarios::{find, Scenario, SCENARIOS};
use crate::session::Report;

/// One line per scenario: name and summary.
pub fn list_scenarios() -> Vec<String> {
    let width = SCENARIOS.iter().map(|s| s.name.len()).max().unwrap_or(0);
    SCENARIOS
        .iter()
        .map(|s| format!("{:width$}  {}", s.name, s.summary))
        .collect()
}

/// Run the selected scenarios in registry order.
pub fn run_scenarios(target: &RunTarget) -> Result<Vec<Report>, UsageError> {
    match target {
        RunTarget::All => Ok(SCENARIOS.iter().map(Scenario::run).collect()),
        RunTarget::One(name) => {
            let scenario = find(name).ok_or_else(|| UsageError::UnknownScenario(name.clone()))?;
            Ok(vec![scenario.run()])
        }
    }
}

/// Render a report the way `lexenv run` prints it.
pub fn render_report(report: &Report, config: RunConfig) -> String {
    let mut out = format!("== {}\n", report.name);
    for line in &report.transcript {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    if config.dump {
        for snapshot in &report.scopes {
            out.push_str("  ");
            out.push_str(&snapshot.to_string());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_is_aligned() {
        let lines = list_scenarios();
        assert_eq!(lines.len(), SCENARIOS.len());
        assert!(lines[0].starts_with("scope         global"));
    }

    #[test]
    fn test_unknown_scenario() {
        assert_eq!(
            run_scenarios(&RunTarget::One("missing".to_owned())),
            Err(UsageError::UnknownScenario("missing".to_owned()))
        );
    }

    #[test]
    fn test_run_all_succeeds() {
        let reports = run_scenarios(&RunTarget::All).unwrap();
        assert_eq!(reports.len(), SCENARIOS.len());
        assert!(reports.iter().all(Report::is_ok));
    }

    #[test]
    fn test_render_with_dump() {
        let reports = run_scenarios(&RunTarget::One("counter".to_owned())).unwrap();
        let config = RunConfig {
            dump: true,
            verbose: false,
        };
        let rendered = render_report(&reports[0], config);
        assert!(rendered.starts_with("== counter\n  increment(): 1\n"));
        assert!(rendered.contains("  child: live\n    block@1 []\n    global@0 [counter]\n"));
        assert!(rendered.ends_with("  first counter frame: released\n"));

        let plain = render_report(&reports[0], RunConfig::default());
        assert!(!plain.contains("released"));
    }
}
