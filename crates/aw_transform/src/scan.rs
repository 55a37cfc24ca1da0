//! Read-only pass that finds the call expressions to rewrite.

use aw_ast::{AwaitExpr, CallExpr, Callee, Expr, Program};
use swc_common::Span;
use swc_ecma_visit::{Visit, VisitWith};

use crate::path::unparen;
use crate::patterns::PatternSet;

/// Handle to a call expression in a parsed program.
///
/// `ordinal` is the call's position among all call expressions of the
/// program in pre-order. Wrapping a call in `await` neither adds nor
/// removes call expressions, so the handle stays valid across the rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub ordinal: usize,
    pub span: Span,
    /// Index into the [`PatternSet`] of the first pattern that matched.
    pub pattern: usize,
}

/// Collect every call whose callee matches one of `patterns`, in
/// traversal order. Each call is recorded at most once, and calls that
/// are already the operand of an `await` are skipped.
pub fn scan(program: &Program, patterns: &PatternSet) -> Vec<CallSite> {
    let mut scanner = CallSiteScanner {
        patterns,
        next_ordinal: 0,
        awaited_operand: false,
        found: Vec::new(),
    };
    program.visit_with(&mut scanner);
    scanner.found
}

struct CallSiteScanner<'a> {
    patterns: &'a PatternSet,
    next_ordinal: usize,
    /// Set when the next call visited is the operand of an `await`.
    awaited_operand: bool,
    found: Vec<CallSite>,
}

impl Visit for CallSiteScanner<'_> {
    fn visit_await_expr(&mut self, node: &AwaitExpr) {
        self.awaited_operand = matches!(unparen(&node.arg), Expr::Call(_));
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        let awaited = std::mem::take(&mut self.awaited_operand);

        if let Callee::Expr(callee) = &node.callee {
            match self.patterns.find_match(callee) {
                Some(pattern) if !awaited => {
                    tracing::trace!(ordinal, pattern, "matched call site");
                    self.found.push(CallSite {
                        ordinal,
                        span: node.span,
                        pattern,
                    });
                }
                _ => {}
            }
        }

        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::parse;
    use indoc::indoc;

    fn scan_src(src: &str, patterns: &[&str]) -> Vec<CallSite> {
        scan(&parse(src), &PatternSet::new(patterns))
    }

    fn ordinals(sites: &[CallSite]) -> Vec<usize> {
        sites.iter().map(|s| s.ordinal).collect()
    }

    #[test]
    fn finds_simple_call() {
        let sites = scan_src("f(x);", &["f"]);
        assert_eq!(ordinals(&sites), [0]);
        assert_eq!(sites[0].pattern, 0);
    }

    #[test]
    fn outer_call_is_discovered_before_inner_calls() {
        // Pre-order: `.g(y)` is 0, `module.f(x)` is 1.
        let sites = scan_src("module.f(x).g(y);", &["module.f"]);
        assert_eq!(ordinals(&sites), [1]);
    }

    #[test]
    fn nested_calls_in_arguments_are_matched_independently() {
        let sites = scan_src("f(f(x), g(f()));", &["f"]);
        assert_eq!(ordinals(&sites), [0, 1, 3]);
    }

    #[test]
    fn call_matched_by_several_patterns_is_recorded_once() {
        let sites = scan_src("(module.f)(x);", &["g", "module.f", "module.f"]);
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].pattern, 1);
    }

    #[test]
    fn partial_and_prefix_paths_do_not_match() {
        assert!(scan_src("module.other(x);", &["module.f"]).is_empty());
        assert!(scan_src("module.f.g(x);", &["module"]).is_empty());
        assert!(scan_src("module.f.g(x);", &["module.f"]).is_empty());
    }

    #[test]
    fn non_expression_callees_are_ignored() {
        let src = indoc! {r#"
            class A extends B {
                constructor() { super(); }
                m() { return super.f(); }
            }
            a?.f();
        "#};
        assert!(scan_src(src, &["super", "super.f", "a.f", "f"]).is_empty());
    }

    #[test]
    fn already_awaited_calls_are_skipped() {
        let src = indoc! {r#"
            async function main() {
                await f(x);
                await (f(y));
                await g(f(z));
            }
        "#};
        // Only the `f(z)` inside the awaited `g(..)` call is left to wrap.
        let sites = scan_src(src, &["f"]);
        assert_eq!(ordinals(&sites), [3]);
    }

    #[test]
    fn matches_across_functions_and_statements() {
        let src = indoc! {r#"
            async function main() {
                const a = db.get(1);
                if (db.has(2)) {
                    return [db.get(3), other.get(4)];
                }
            }
        "#};
        let sites = scan_src(src, &["db.get", "db.has"]);
        assert_eq!(ordinals(&sites), [0, 1, 2]);
        assert_eq!(
            sites.iter().map(|s| s.pattern).collect::<Vec<_>>(),
            [0, 1, 0]
        );
    }
}
