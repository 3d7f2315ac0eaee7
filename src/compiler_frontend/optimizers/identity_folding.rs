//! Optional identity element pass.
//!
//! Only runs when `OptimizerConfig::fold_identities` is set. Rewrites
//! `x + 0`, `0 + x`, `x - 0`, `x * 1`, `1 * x` and `x / 1` to `x`.
//!
//! Bitwise identities are left alone because `|`, `<<` and `>>` truncate their
//! operands. Annihilators like `x * 0` are left alone because the dropped operand
//! can still decide the rate of the expression.

use crate::compiler_frontend::ast::ast_nodes::{BinaryOperator, NodeKind};
use crate::compiler_frontend::ast::node_arena::{NodeArena, NodeId};
use crate::fold_log;

/// Returns the id that now stands where `id` stood.
/// When an identity is removed that is the surviving operand, and `id` is released.
pub fn fold_identities(arena: &mut NodeArena, id: NodeId) -> NodeId {
    if matches!(arena[id].kind, NodeKind::InstrumentList { .. }) {
        return id;
    }

    for child in arena[id].children() {
        let folded = fold_identities(arena, child);
        if folded != child {
            arena[id].replace_child(child, folded);
        }
    }

    let NodeKind::BinaryOp { op, lhs, rhs } = arena[id].kind else {
        return id;
    };

    let is = |operand: NodeId, neutral: f64| arena[operand].literal_value() == Some(neutral);

    let survivor = match op {
        BinaryOperator::Add if is(rhs, 0.0) => Some((lhs, rhs)),
        BinaryOperator::Add if is(lhs, 0.0) => Some((rhs, lhs)),
        BinaryOperator::Subtract if is(rhs, 0.0) => Some((lhs, rhs)),
        BinaryOperator::Multiply if is(rhs, 1.0) => Some((lhs, rhs)),
        BinaryOperator::Multiply if is(lhs, 1.0) => Some((rhs, lhs)),
        BinaryOperator::Divide if is(rhs, 1.0) => Some((lhs, rhs)),
        _ => None,
    };

    let Some((kept, neutral)) = survivor else {
        return id;
    };

    fold_log!(format!("[OPT][Identity] dropped neutral operand of {}", op.to_str()));

    arena.take(id);
    arena.release_tree(neutral);
    kept
}
