use aw_ast::AwSyntax;
use swc_common::{
    comments::SingleThreadedComments, sync::Lrc, FileName, SourceMap, Span, Spanned,
};
use swc_ecma_ast::EsVersion;
use swc_ecma_parser::{EsSyntax, Syntax, TsSyntax};
use thiserror::Error;

/// Result of parsing a source file.
pub struct ParseResult {
    pub program: swc_ecma_ast::Program,
    pub comments: SingleThreadedComments,
    pub source_map: Lrc<SourceMap>,
}

/// The source text is not a syntactically valid program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line}: {message}")]
pub struct ParseError {
    /// The parser's diagnostic.
    pub message: String,
    /// 1-based line of the offending token.
    pub line: usize,
    /// 0-based column of the offending token.
    pub column: usize,
}

impl ParseError {
    fn from_swc(error: &swc_ecma_parser::error::Error, source_map: &SourceMap) -> Self {
        let (line, column) = line_col(source_map, error.span());
        Self {
            message: error.kind().msg().into_owned(),
            line,
            column,
        }
    }
}

/// 1-based line and 0-based display column of the start of `span`.
pub fn line_col(source_map: &SourceMap, span: Span) -> (usize, usize) {
    let loc = source_map.lookup_char_pos(span.lo);
    (loc.line, loc.col_display)
}

fn swc_syntax(syntax: &AwSyntax) -> Syntax {
    if syntax.typescript {
        Syntax::Typescript(TsSyntax {
            tsx: syntax.jsx,
            decorators: syntax.decorators,
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: syntax.jsx,
            decorators: syntax.decorators,
            ..Default::default()
        })
    }
}

/// Parse a source string as a program.
///
/// Whether the program is a script or a module is left to the parser:
/// import/export declarations or a top-level `await` make it a module.
pub fn parse_program(
    source: &str,
    filename: &str,
    syntax: &AwSyntax,
) -> Result<ParseResult, ParseError> {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(filename.to_string())),
        source.to_string(),
    );

    let comments = SingleThreadedComments::default();
    let mut recovered = vec![];

    let program = swc_ecma_parser::parse_file_as_program(
        &source_file,
        swc_syntax(syntax),
        EsVersion::latest(),
        Some(&comments),
        &mut recovered,
    )
    .map_err(|e| ParseError::from_swc(&e, &source_map))?;

    // No best-effort mode: errors the parser recovered from still fail.
    if let Some(e) = recovered.first() {
        return Err(ParseError::from_swc(e, &source_map));
    }

    tracing::trace!(filename, module = program.is_module(), "parsed program");

    Ok(ParseResult {
        program,
        comments,
        source_map,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_plain_script() {
        let parsed = parse_program("f(x);", "input.js", &AwSyntax::default()).unwrap();
        assert!(parsed.program.is_script());
    }

    #[test]
    fn module_syntax_yields_module() {
        let src = indoc! {r#"
            import { f } from "./f.js";
            f(1);
        "#};
        let parsed = parse_program(src, "input.js", &AwSyntax::default()).unwrap();
        assert!(parsed.program.is_module());
    }

    #[test]
    fn syntax_error_reports_position() {
        let err = parse_program("f(;", "input.js", &AwSyntax::default())
            .err()
            .expect("should fail");
        assert_eq!(err.line, 1);
        assert!(!err.message.is_empty());
        assert!(err.to_string().starts_with("Line 1: "));
    }

    #[test]
    fn typescript_needs_typescript_dialect() {
        let src = "const n: number = f(1);";
        assert!(parse_program(src, "input.js", &AwSyntax::default()).is_err());
        assert!(parse_program(src, "input.ts", &AwSyntax::typescript()).is_ok());
    }

    #[test]
    fn jsx_is_opt_in() {
        let src = "render(<App />);";
        assert!(parse_program(src, "input.js", &AwSyntax::default()).is_err());
        let jsx = AwSyntax {
            jsx: true,
            ..AwSyntax::default()
        };
        assert!(parse_program(src, "input.jsx", &jsx).is_ok());
    }
}
