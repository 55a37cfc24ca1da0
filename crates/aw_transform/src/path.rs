//! Matching access-path expressions against dotted patterns.

use aw_ast::{Expr, MemberExpr, MemberProp};

/// Whether `expr` is exactly the static access chain `path`.
///
/// - an identifier matches a one-segment path with the same name
/// - `obj.prop` matches a path of two or more segments when `prop` is the
///   last segment and `obj` matches the rest
///
/// Computed (`a["b"]`) and private (`a.#b`) properties never match, and
/// neither does anything that is not an identifier or member expression.
/// Parentheses are transparent.
pub fn path_matches(expr: &Expr, path: &[String]) -> bool {
    match unparen(expr) {
        Expr::Ident(ident) => path.len() == 1 && &*ident.sym == path[0].as_str(),
        Expr::Member(member) => member_matches(member, path),
        _ => false,
    }
}

fn member_matches(member: &MemberExpr, path: &[String]) -> bool {
    let MemberProp::Ident(prop) = &member.prop else {
        return false;
    };

    // A one-segment path never matches a member chain: `a` is not `a.b`.
    match path.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            &*prop.sym == last.as_str() && path_matches(&member.obj, rest)
        }
        _ => false,
    }
}

/// Strip any number of enclosing parentheses.
pub(crate) fn unparen(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::first_expr;
    use aw_ast::AccessPath;

    fn matches(src: &str, pattern: &str) -> bool {
        path_matches(&first_expr(src), AccessPath::parse(pattern).segments())
    }

    #[test]
    fn identifier_matches_single_segment() {
        assert!(matches("f;", "f"));
        assert!(!matches("f;", "g"));
        assert!(!matches("f;", "f.g"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!matches("F;", "f"));
        assert!(!matches("module.F;", "module.f"));
    }

    #[test]
    fn member_chain_matches_full_path() {
        assert!(matches("module.f;", "module.f"));
        assert!(matches("obj.a.b;", "obj.a.b"));
        assert!(!matches("obj.a.b;", "obj.a"));
        assert!(!matches("obj.a;", "obj.a.b"));
        assert!(!matches("other.a.b;", "obj.a.b"));
    }

    #[test]
    fn single_segment_never_matches_member() {
        assert!(!matches("module.f;", "module"));
        assert!(!matches("module.f;", "f"));
    }

    #[test]
    fn computed_access_never_matches() {
        assert!(!matches(r#"module["f"];"#, "module.f"));
        assert!(!matches("module[f];", "module.f"));
    }

    #[test]
    fn parentheses_are_transparent() {
        assert!(matches("(module.f);", "module.f"));
        assert!(matches("((module).f);", "module.f"));
    }

    #[test]
    fn other_expressions_never_match() {
        assert!(!matches("f();", "f"));
        assert!(!matches("this.f;", "f"));
        assert!(!matches("\"f\";", "f"));
        assert!(!matches("module.f().g;", "module.f.g"));
    }

    #[test]
    fn malformed_patterns_never_match() {
        assert!(!matches("a.b;", "a..b"));
        assert!(!matches("a.b;", ""));
        assert!(!matches("a.b;", "a.b."));
    }
}
