//! Core analyzer for linting YAML files on disk.

use crate::allowance::check_allow;
use crate::config::Config;
use crate::driver::lint_all;
use crate::lines::split_lines;
use crate::rule::Chain;
use crate::types::{LintResult, Severity, Violation};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading a file.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// IO error resolving the lint root.
    #[error("IO error: {0}")]
    CurrentDir(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builds a fresh rule chain for each document.
pub type ChainFactory = Box<dyn Fn() -> Chain + Send + Sync>;

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    chain: Option<ChainFactory>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the factory producing the rule chain for every document.
    ///
    /// Rules keep per-document state, so the factory is called once per
    /// file rather than sharing one chain across files.
    #[must_use]
    pub fn chain<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Chain + Send + Sync + 'static,
    {
        self.chain = Some(Box::new(factory));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or a
    /// glob pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();

        let exclude = config
            .ignore
            .iter()
            .chain(&self.exclude_patterns)
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        let yaml_files = config
            .yaml_files
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            chain: self.chain.unwrap_or_else(|| Box::new(Vec::new)),
            exclude,
            yaml_files,
            config,
        })
    }
}

/// The main analyzer that discovers and lints YAML files.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    chain: ChainFactory,
    exclude: Vec<glob::Pattern>,
    yaml_files: Vec<glob::Pattern>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the names of the rules in the chain, in chain order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        (self.chain)().iter().map(|r| r.name()).collect()
    }

    /// Analyzes all discovered files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for path in &files {
            result.violations.extend(self.analyze_file(path)?);
            result.files_checked += 1;
        }

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Reads and lints one file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(self.analyze_source(self.display_path(path), &content))
    }

    /// Lints an in-memory document attributed to `path`.
    #[must_use]
    pub fn analyze_source(&self, path: &Path, source: &str) -> Vec<Violation> {
        let mut chain = (self.chain)();
        chain.retain(|rule| {
            let enabled = self.config.is_rule_enabled(rule.name());
            if !enabled {
                debug!("Skipping disabled rule: {}", rule.name());
            }
            enabled
        });

        let severities: HashMap<&'static str, Severity> = chain
            .iter()
            .map(|rule| {
                let severity = self
                    .config
                    .rule_severity(rule.name())
                    .unwrap_or_else(|| rule.default_severity());
                (rule.name(), severity)
            })
            .collect();

        let lines = split_lines(source);
        let mut violations = Vec::new();

        for problem in lint_all(source, &mut chain) {
            let rule = problem.error.rule();
            let allow = check_allow(&lines, problem.line, rule);
            if allow.is_allowed() {
                debug!(
                    "Suppressed {} at {}:{} ({})",
                    rule,
                    path.display(),
                    problem.line,
                    allow.reason().unwrap_or("no reason")
                );
                continue;
            }

            let severity = severities.get(rule).copied().unwrap_or(Severity::Error);
            violations.push(Violation::from_problem(
                path.to_path_buf(),
                &problem,
                severity,
                source,
            ));
        }

        violations
    }

    /// Discovers YAML files under the root, sorted by path.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let respect = self.config.respect_gitignore;
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(respect)
            .git_exclude(respect)
            .git_global(respect)
            .require_git(false)
            .filter_entry(|entry| entry.file_name() != ".git");

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) || !self.is_yaml_file(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Path relative to the root, or the file name when the root is the file.
    fn display_path<'p>(&self, path: &'p Path) -> &'p Path {
        match path.strip_prefix(&self.root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative,
            _ => path.file_name().map_or(path, Path::new),
        }
    }

    fn is_yaml_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.yaml_files.iter().any(|p| p.matches(name)))
    }

    /// Checks if a path matches one of the ignore globs, relative to the root.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude.iter().any(|p| p.matches_path(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{LineContext, TokenContext};
    use crate::rule::{Emit, Linter};
    use crate::types::{LintError, Problem};
    use std::ops::ControlFlow;

    struct Trailing;

    impl Linter for Trailing {
        fn name(&self) -> &'static str {
            "trailing-spaces"
        }

        fn check_line(&mut self, ctx: &LineContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
            if ctx.text.ends_with(' ') {
                emit(Problem::new(ctx.line_number, 1, LintError::TrailingSpaces))?;
            }
            ControlFlow::Continue(())
        }
    }

    struct Octal;

    impl Linter for Octal {
        fn name(&self) -> &'static str {
            "octal"
        }

        fn default_severity(&self) -> Severity {
            Severity::Warning
        }

        fn check_token(&mut self, ctx: &TokenContext<'_>, emit: &mut Emit<'_>) -> ControlFlow<()> {
            if ctx.current.kind == crate::token::TokenType::OctalInteger {
                emit(Problem::at(ctx.current.position, LintError::ImplicitOctal))?;
            }
            ControlFlow::Continue(())
        }
    }

    fn chain() -> Chain {
        vec![Box::new(Trailing), Box::new(Octal)]
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/repo")
            .exclude("vendor/**")
            .exclude("**/generated/*.yaml")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/repo/vendor/a/b.yaml")));
        assert!(analyzer.should_exclude(Path::new("/repo/x/generated/c.yaml")));
        assert!(!analyzer.should_exclude(Path::new("/repo/config/app.yaml")));
    }

    #[test]
    fn test_yaml_file_selection() {
        let analyzer = Analyzer::builder()
            .root("/repo")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.is_yaml_file(Path::new("/repo/a.yaml")));
        assert!(analyzer.is_yaml_file(Path::new("/repo/b/c.yml")));
        assert!(analyzer.is_yaml_file(Path::new("/repo/.yamllint")));
        assert!(!analyzer.is_yaml_file(Path::new("/repo/README.md")));
    }

    #[test]
    fn test_invalid_glob() {
        let err = Analyzer::builder().exclude("[").build();
        assert!(matches!(err, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_severity_defaults_and_overrides() {
        let config = Config::parse("[rules.trailing-spaces]\nseverity = \"info\"\n")
            .expect("config");
        let analyzer = Analyzer::builder()
            .root("/repo")
            .config(config)
            .chain(chain)
            .build()
            .expect("Failed to build analyzer");

        let violations = analyzer.analyze_source(Path::new("a.yaml"), "mode: 0755 \n");
        let summary: Vec<_> = violations
            .iter()
            .map(|v| (v.rule.as_str(), v.severity))
            .collect();
        assert_eq!(
            summary,
            vec![("trailing-spaces", Severity::Info), ("octal", Severity::Warning)]
        );
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let config = Config::parse("[rules.octal]\nenabled = false\n").expect("config");
        let analyzer = Analyzer::builder()
            .root("/repo")
            .config(config)
            .chain(chain)
            .build()
            .expect("Failed to build analyzer");

        let violations = analyzer.analyze_source(Path::new("a.yaml"), "mode: 0755\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_inline_allow_suppresses() {
        let analyzer = Analyzer::builder()
            .root("/repo")
            .chain(chain)
            .build()
            .expect("Failed to build analyzer");

        let source = "# yamllintx: allow(octal)\nmode: 0755\nother: 0644\n";
        let violations = analyzer.analyze_source(Path::new("a.yaml"), source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 3);
    }

    #[test]
    fn test_analyze_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("a.yaml"), "a: 1 \n").expect("write");
        std::fs::create_dir(dir.path().join("vendor")).expect("mkdir");
        std::fs::write(dir.path().join("vendor/b.yaml"), "b: 1 \n").expect("write");
        std::fs::write(dir.path().join("notes.txt"), "c: 1 \n").expect("write");

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .exclude("vendor/**")
            .chain(chain)
            .build()
            .expect("Failed to build analyzer");

        let result = analyzer.analyze().expect("analyze");
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].location.file, PathBuf::from("a.yaml"));
    }
}
