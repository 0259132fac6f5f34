use std::path::PathBuf;

use crate::bump::locator::find_matches;
use crate::domain::{BumpPolicy, Deltas, Version, Versions};
use crate::error::Result;
use crate::prompt::{self, Chooser};
use crate::source::{CompilationUnit, GoFile};
use crate::ui::TerminalChooser;

/// Applies a [BumpPolicy] to every matching declaration of a unit
pub struct Executor {
    policy: BumpPolicy,
    chooser: Box<dyn Chooser>,
}

impl Executor {
    /// Create an executor that prompts on the terminal when the policy asks to
    pub fn new(policy: BumpPolicy) -> Self {
        Self::with_chooser(policy, Box::new(TerminalChooser::new()))
    }

    pub fn with_chooser(policy: BumpPolicy, chooser: Box<dyn Chooser>) -> Self {
        Executor { policy, chooser }
    }

    pub fn policy(&self) -> &BumpPolicy {
        &self.policy
    }

    /// Rewrite every matching declaration of `unit` in memory.
    ///
    /// Returns the new version of each matched identifier. The first
    /// locator or policy error stops processing and carries the position it
    /// refers to; chooser errors are returned as they are.
    pub fn process(&mut self, unit: &mut dyn CompilationUnit) -> Result<Versions> {
        let policy = &self.policy;
        let chooser: &mut dyn Chooser = &mut *self.chooser;
        let label = format!("Bump up {}", unit.path().display());
        let mut versions = Versions::new();

        for found in find_matches(unit, policy.name_pattern(), policy.default_version()) {
            let mut found = found?;

            let deltas = if policy.prompts() {
                let current =
                    Version::parse(&found.current).map_err(|e| e.at(found.location.clone()))?;
                Deltas::single(prompt::choose(&current, &label, chooser)?)
            } else {
                policy.deltas()
            };

            let next = policy
                .resolve_with(&found.current, deltas)
                .map_err(|e| e.at(found.location.clone()))?;

            found.assign(&next);
            versions.insert(found.name, next);
        }

        Ok(versions)
    }

    /// Parse Go source text, process it and render the result.
    pub fn process_source(
        &mut self,
        path: impl Into<PathBuf>,
        source: &str,
    ) -> Result<(String, Versions)> {
        let mut unit = GoFile::parse(path, source)?;
        let versions = self.process(&mut unit)?;
        Ok((unit.render(), versions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BumpError;
    use crate::prompt::ScriptedChooser;
    use crate::source::{Location, MemoryUnit};
    use regex::Regex;

    fn executor(policy: BumpPolicy) -> Executor {
        Executor::with_chooser(policy, Box::new(ScriptedChooser::without_terminal()))
    }

    fn minor() -> BumpPolicy {
        BumpPolicy {
            minor_delta: 1,
            ..BumpPolicy::default()
        }
    }

    #[test]
    fn test_minor_bump_of_two_declarations() {
        let mut unit = MemoryUnit::new("main.go")
            .with_literal("version", "1.0.5")
            .with_literal("VERSION", "2.0.9");

        let versions = executor(minor()).process(&mut unit).unwrap();

        assert_eq!(
            serde_json::to_string(&versions).unwrap(),
            r#"{"VERSION":"2.1.0","version":"1.1.0"}"#
        );
        assert_eq!(
            unit.assignments(),
            vec![("version", "1.1.0"), ("VERSION", "2.1.0")]
        );
    }

    #[test]
    fn test_missing_initializer_starts_from_default() {
        let mut unit = MemoryUnit::new("main.go").without_value("version");
        let policy = BumpPolicy {
            patch_delta: 1,
            ..BumpPolicy::default()
        };

        let versions = executor(policy).process(&mut unit).unwrap();
        assert_eq!(versions.get("version"), Some("0.0.1"));
        assert_eq!(unit.assigned("version"), Some("0.0.1"));
    }

    #[test]
    fn test_custom_default_version() {
        let mut unit = MemoryUnit::new("main.go").without_value("version");
        let policy = BumpPolicy {
            major_delta: 1,
            default_version: Some("1.5.0".to_string()),
            ..BumpPolicy::default()
        };

        let versions = executor(policy).process(&mut unit).unwrap();
        assert_eq!(versions.get("version"), Some("2.0.0"));
    }

    #[test]
    fn test_invalid_current_is_located_parse_error() {
        let mut unit = MemoryUnit::new("main.go").with_literal("version", "not-a-version");

        let err = executor(minor()).process(&mut unit).unwrap_err();
        assert!(matches!(err.root(), BumpError::Parse { .. }));
        assert_eq!(err.location(), Some(&Location::new("main.go", 1, 5)));
        assert!(err.to_string().starts_with("main.go:1:5: "));
        assert!(unit.assignments().is_empty());
    }

    #[test]
    fn test_check_version_up_failure() {
        let mut unit = MemoryUnit::new("main.go").with_literal("version", "1.2.3");
        let policy = BumpPolicy {
            exact: Some("1.2.2".to_string()),
            check_version_up: true,
            ..BumpPolicy::default()
        };

        let err = executor(policy).process(&mut unit).unwrap_err();
        assert!(matches!(err.root(), BumpError::NotGreater { .. }));
        assert_eq!(unit.assigned("version"), None);
    }

    #[test]
    fn test_exact_wins_over_deltas() {
        let mut unit = MemoryUnit::new("main.go").with_literal("version", "1.0.0");
        let policy = BumpPolicy {
            major_delta: 1,
            exact: Some("9.9.9".to_string()),
            ..BumpPolicy::default()
        };

        let versions = executor(policy).process(&mut unit).unwrap();
        assert_eq!(versions.get("version"), Some("9.9.9"));
    }

    #[test]
    fn test_no_match_is_empty() {
        let mut unit = MemoryUnit::new("main.go").with_literal("name", "app");
        let versions = executor(minor()).process(&mut unit).unwrap();
        assert!(versions.is_empty());
    }

    #[test]
    fn test_earlier_matches_stay_mutated_after_failure() {
        let mut unit = MemoryUnit::new("main.go")
            .with_literal("version", "1.0.0")
            .with_expression("VERSION", "compute()");

        let err = executor(minor()).process(&mut unit).unwrap_err();
        assert!(matches!(err.root(), BumpError::NotAStringLiteral));
        assert_eq!(unit.assigned("version"), Some("1.1.0"));
    }

    #[test]
    fn test_custom_name_pattern() {
        let mut unit = MemoryUnit::new("main.go")
            .with_literal("version", "1.0.0")
            .with_literal("buildVersion", "0.3.0");
        let policy = BumpPolicy {
            name_pattern: Some(Regex::new("(?i)version$").unwrap()),
            ..minor()
        };

        let versions = executor(policy).process(&mut unit).unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions.get("buildVersion"), Some("0.4.0"));
    }

    #[test]
    fn test_prompt_picks_per_declaration() {
        let mut unit = MemoryUnit::new("main.go")
            .with_literal("version", "1.2.3")
            .with_literal("VERSION", "0.1.0");
        let policy = BumpPolicy {
            prompt: true,
            ..BumpPolicy::default()
        };
        let mut executor =
            Executor::with_chooser(policy, Box::new(ScriptedChooser::new(vec![0, 2])));

        let versions = executor.process(&mut unit).unwrap();
        assert_eq!(versions.get("version"), Some("1.2.4"));
        assert_eq!(versions.get("VERSION"), Some("1.0.0"));
    }

    #[test]
    fn test_prompt_errors_are_not_located() {
        let mut unit = MemoryUnit::new("main.go").with_literal("version", "1.2.3");
        let policy = BumpPolicy {
            prompt: true,
            ..BumpPolicy::default()
        };

        let err = executor(policy.clone()).process(&mut unit).unwrap_err();
        assert!(matches!(err, BumpError::NoInteractiveTerminal));

        let mut executor = Executor::with_chooser(policy, Box::new(ScriptedChooser::cancelling()));
        let err = executor.process(&mut unit).unwrap_err();
        assert!(matches!(err, BumpError::SelectionCancelled(_)));
    }

    #[test]
    fn test_prompt_with_invalid_current() {
        let mut unit = MemoryUnit::new("main.go").with_literal("version", "v1");
        let policy = BumpPolicy {
            prompt: true,
            ..BumpPolicy::default()
        };

        let err = executor(policy).process(&mut unit).unwrap_err();
        assert!(matches!(err.root(), BumpError::Parse { .. }));
        assert!(err.location().is_some());
    }

    #[test]
    fn test_exact_mode_never_prompts() {
        let mut unit = MemoryUnit::new("main.go").with_literal("version", "1.2.3");
        let policy = BumpPolicy {
            prompt: true,
            exact: Some("2.0.0".to_string()),
            ..BumpPolicy::default()
        };

        let versions = executor(policy).process(&mut unit).unwrap();
        assert_eq!(versions.get("version"), Some("2.0.0"));
    }

    #[test]
    fn test_process_source_rewrites_go_text() {
        let source = "package main\n\nconst (\n\tname    = \"app\"\n\tversion = \"0.9.1\" // released\n)\n";
        let (rewritten, versions) = executor(minor())
            .process_source("main.go", source)
            .unwrap();

        assert_eq!(
            rewritten,
            "package main\n\nconst (\n\tname    = \"app\"\n\tversion = \"0.10.0\" // released\n)\n"
        );
        assert_eq!(versions.get("version"), Some("0.10.0"));
    }

    #[test]
    fn test_process_source_reports_go_positions() {
        let source = "package main\n\nvar version = \"1.0\"\n";
        let err = executor(minor())
            .process_source("main.go", source)
            .unwrap_err();
        assert_eq!(err.location(), Some(&Location::new("main.go", 3, 5)));
    }
}
