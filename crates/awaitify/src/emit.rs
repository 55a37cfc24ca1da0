use swc_common::{comments::Comments, sync::Lrc, SourceMap};
use swc_ecma_ast::{EsVersion, Program};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

use crate::AwaitifyError;

/// Regenerate source text for `program`.
///
/// Failures here mean the tree we built is unprintable, so they surface as
/// [`AwaitifyError::Internal`].
pub(crate) fn emit_program(
    program: &Program,
    source_map: Lrc<SourceMap>,
    comments: Option<&dyn Comments>,
    minify: bool,
) -> Result<String, AwaitifyError> {
    let mut cfg = swc_ecma_codegen::Config::default().with_target(EsVersion::latest());
    cfg.minify = minify;

    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(source_map.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg,
            cm: source_map,
            comments,
            wr: writer,
        };
        program
            .emit_with(&mut emitter)
            .map_err(|e| AwaitifyError::Internal(format!("code generation failed: {e}")))?;
    }

    String::from_utf8(buf)
        .map_err(|e| AwaitifyError::Internal(format!("generated code is not UTF-8: {e}")))
}
