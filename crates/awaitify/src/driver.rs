use std::fmt;

use aw_parser::{line_col, parse_program};
use aw_transform::{rewrite, scan, PatternSet};
use swc_common::comments::Comments;

use crate::emit::emit_program;
use crate::{AwaitifyError, AwaitifyOptions};

/// Name given to the in-memory source file.
const SOURCE_NAME: &str = "<input>";

/// Progress of a single transformation.
///
/// `NotStarted → Parsed → Scanned → Mutated → Serialized`, or `Failed` from
/// any of them. An empty pattern set short-circuits straight to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    NotStarted,
    Parsed,
    Scanned,
    Mutated,
    Serialized,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::NotStarted => "not-started",
            Stage::Parsed => "parsed",
            Stage::Scanned => "scanned",
            Stage::Mutated => "mutated",
            Stage::Serialized => "serialized",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A call that was wrapped in `await`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenCall {
    /// The dotted pattern that matched the callee.
    pub pattern: String,
    /// 1-based line of the call in the input.
    pub line: usize,
    /// 0-based column of the call in the input.
    pub column: usize,
}

/// Transformed code together with the call sites that were rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Awaitified {
    pub code: String,
    pub rewritten: Vec<RewrittenCall>,
}

/// Reusable, configured transformer. Holds no per-call state, so one
/// instance can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct Awaitifier {
    options: AwaitifyOptions,
}

impl Awaitifier {
    pub fn new(options: AwaitifyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AwaitifyOptions {
        &self.options
    }

    pub fn transform(&self, code: &str, patterns: &PatternSet) -> Result<String, AwaitifyError> {
        self.transform_with_report(code, patterns)
            .map(|awaitified| awaitified.code)
    }

    pub fn transform_with_report(
        &self,
        code: &str,
        patterns: &PatternSet,
    ) -> Result<Awaitified, AwaitifyError> {
        self.run(code, patterns).inspect_err(|error| {
            tracing::debug!(stage = %Stage::Failed, %error, "transformation failed");
        })
    }

    #[tracing::instrument(
        level = "debug",
        name = "awaitify",
        skip_all,
        fields(patterns = patterns.len(), bytes = code.len())
    )]
    fn run(&self, code: &str, patterns: &PatternSet) -> Result<Awaitified, AwaitifyError> {
        if patterns.is_empty() {
            tracing::debug!(stage = %Stage::NotStarted, "no function paths, returning input");
            return Ok(Awaitified {
                code: code.to_string(),
                rewritten: Vec::new(),
            });
        }

        let parsed = parse_program(code, SOURCE_NAME, &self.options.syntax)?;
        let mut program = parsed.program;
        tracing::debug!(stage = %Stage::Parsed);

        let sites = scan(&program, patterns);
        tracing::debug!(stage = %Stage::Scanned, matches = sites.len());

        let rewritten = rewrite(&mut program, &sites);
        if rewritten != sites.len() {
            return Err(AwaitifyError::Internal(format!(
                "scanned {} call sites but rewrote {rewritten}",
                sites.len()
            )));
        }
        tracing::debug!(stage = %Stage::Mutated, rewritten);

        let comments = self
            .options
            .comments
            .then_some(&parsed.comments as &dyn Comments);
        let output = emit_program(
            &program,
            parsed.source_map.clone(),
            comments,
            self.options.minify,
        )?;
        tracing::debug!(stage = %Stage::Serialized, bytes = output.len());

        let rewritten = sites
            .iter()
            .map(|site| {
                let pattern = patterns.get(site.pattern).ok_or_else(|| {
                    AwaitifyError::Internal(format!("no pattern at index {}", site.pattern))
                })?;
                let (line, column) = line_col(&parsed.source_map, site.span);
                Ok(RewrittenCall {
                    pattern: pattern.to_string(),
                    line,
                    column,
                })
            })
            .collect::<Result<_, AwaitifyError>>()?;

        Ok(Awaitified {
            code: output,
            rewritten,
        })
    }
}

/// Await every call in `code` whose callee is one of `func_paths`.
///
/// Returns `code` untouched, without parsing it, when `func_paths` is empty.
pub fn awaitify<S: AsRef<str>>(code: &str, func_paths: &[S]) -> Result<String, AwaitifyError> {
    Awaitifier::default().transform(code, &PatternSet::new(func_paths))
}

/// Like [`awaitify`], for function paths handed over as JSON.
///
/// `func_paths` must be an array of strings; anything else fails with
/// [`AwaitifyError::InvalidArgument`] before `code` is parsed.
pub fn awaitify_value(
    code: &str,
    func_paths: &serde_json::Value,
) -> Result<String, AwaitifyError> {
    let patterns = PatternSet::from_value(func_paths)?;
    Awaitifier::default().transform(code, &patterns)
}
