//! Shared helpers for the awaitify golden-file harness.
//!
//! Fixtures are `*.input.js` / `*.input.ts` files whose first line names
//! the function paths to await:
//!
//! ```text
//! // paths: db.get api.users.list
//! ```

use anyhow::{bail, Result};
use aw_ast::AwSyntax;
use awaitify::{Awaitifier, AwaitifyOptions, PatternSet};

const PATHS_HEADER: &str = "// paths:";

/// Function paths declared on the first line of a fixture.
pub fn fixture_paths(source: &str) -> Result<PatternSet> {
    let first = source.lines().next().unwrap_or_default();
    let Some(list) = first.trim().strip_prefix(PATHS_HEADER) else {
        bail!("fixture must start with `{PATHS_HEADER} a.b c`");
    };
    Ok(PatternSet::new(list.split_whitespace()))
}

/// Dialect implied by a fixture's file name.
pub fn fixture_syntax(filename: &str) -> AwSyntax {
    AwSyntax {
        typescript: filename.ends_with(".ts") || filename.ends_with(".tsx"),
        jsx: filename.ends_with(".jsx") || filename.ends_with(".tsx"),
        decorators: false,
    }
}

/// Run the full pipeline on a fixture source.
pub fn run_pipeline(source: &str, filename: &str) -> Result<String> {
    let patterns = fixture_paths(source)?;
    let awaitifier = Awaitifier::new(AwaitifyOptions {
        syntax: fixture_syntax(filename),
        ..AwaitifyOptions::default()
    });
    Ok(awaitifier.transform(source, &patterns)?)
}

/// Whitespace-insensitive form of generated code, for comparisons that
/// should not depend on the generator's indentation choices.
pub fn squash(code: &str) -> String {
    code.split_whitespace().collect()
}
