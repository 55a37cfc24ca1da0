//! In-place rewrite of matched calls into `await` expressions.
//!
//! `f(x)` → `await f(x)`, and where the new `await` would otherwise bind
//! differently once printed, `(await f(x))`.

use std::collections::HashSet;

use aw_ast::{
    AwaitExpr, BinExpr, BinaryOp, CallExpr, Callee, Class, Decorator, Expr, MemberExpr, NewExpr,
    OptCall, ParenExpr, Program, TaggedTpl, TsInstantiation, TsNonNullExpr,
};
use swc_common::{util::take::Take, Spanned};
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::scan::CallSite;

/// Wrap every call in `sites` in an `await`, returning how many were
/// rewritten.
///
/// The parent keeps owning the same `Expr` slot; only its contents change
/// from the call to an `await` whose operand is the original call, moved
/// unmodified. Matches are rewritten bottom-up, so a call is only wrapped
/// after every match nested inside it.
pub fn rewrite(program: &mut Program, sites: &[CallSite]) -> usize {
    if sites.is_empty() {
        return 0;
    }

    let mut wrapper = AwaitWrapper {
        targets: sites.iter().map(|site| site.ordinal).collect(),
        next_ordinal: 0,
        rewritten: 0,
    };
    program.visit_mut_with(&mut wrapper);

    if wrapper.rewritten > 0 {
        program.visit_mut_with(&mut AwaitParenthesizer);
    }
    wrapper.rewritten
}

struct AwaitWrapper {
    targets: HashSet<usize>,
    /// Pre-order call counter, kept in step with the scanner.
    next_ordinal: usize,
    rewritten: usize,
}

impl VisitMut for AwaitWrapper {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        // The ordinal is claimed by `visit_mut_call_expr` as we descend.
        let ordinal = matches!(expr, Expr::Call(_)).then_some(self.next_ordinal);

        expr.visit_mut_children_with(self);

        if ordinal.is_some_and(|ordinal| self.targets.contains(&ordinal)) {
            wrap_in_await(expr);
            self.rewritten += 1;
        }
    }

    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        self.next_ordinal += 1;
        call.visit_mut_children_with(self);
    }
}

fn wrap_in_await(slot: &mut Expr) {
    let call = slot.take();
    *slot = Expr::Await(AwaitExpr {
        span: call.span(),
        arg: Box::new(call),
    });
}

/// Parenthesises bare `await` expressions sitting where a left-hand-side
/// expression is required.
struct AwaitParenthesizer;

impl AwaitParenthesizer {
    fn fix(slot: &mut Expr) {
        if matches!(slot, Expr::Await(_)) {
            let inner = slot.take();
            *slot = Expr::Paren(ParenExpr {
                span: inner.span(),
                expr: Box::new(inner),
            });
        }
    }
}

impl VisitMut for AwaitParenthesizer {
    fn visit_mut_member_expr(&mut self, node: &mut MemberExpr) {
        node.visit_mut_children_with(self);
        Self::fix(&mut node.obj);
    }

    fn visit_mut_callee(&mut self, node: &mut Callee) {
        node.visit_mut_children_with(self);
        if let Callee::Expr(callee) = node {
            Self::fix(callee);
        }
    }

    fn visit_mut_new_expr(&mut self, node: &mut NewExpr) {
        node.visit_mut_children_with(self);
        Self::fix(&mut node.callee);
    }

    fn visit_mut_opt_call(&mut self, node: &mut OptCall) {
        node.visit_mut_children_with(self);
        Self::fix(&mut node.callee);
    }

    fn visit_mut_tagged_tpl(&mut self, node: &mut TaggedTpl) {
        node.visit_mut_children_with(self);
        Self::fix(&mut node.tag);
    }

    fn visit_mut_bin_expr(&mut self, node: &mut BinExpr) {
        node.visit_mut_children_with(self);
        // `await x ** 2` is a syntax error.
        if node.op == BinaryOp::Exp {
            Self::fix(&mut node.left);
        }
    }

    fn visit_mut_class(&mut self, node: &mut Class) {
        node.visit_mut_children_with(self);
        if let Some(super_class) = &mut node.super_class {
            Self::fix(super_class);
        }
    }

    // `@await f()` does not parse; `@(await f())` does.
    fn visit_mut_decorator(&mut self, node: &mut Decorator) {
        node.visit_mut_children_with(self);
        Self::fix(&mut node.expr);
    }

    fn visit_mut_ts_non_null_expr(&mut self, node: &mut TsNonNullExpr) {
        node.visit_mut_children_with(self);
        Self::fix(&mut node.expr);
    }

    fn visit_mut_ts_instantiation(&mut self, node: &mut TsInstantiation) {
        node.visit_mut_children_with(self);
        Self::fix(&mut node.expr);
    }
}
