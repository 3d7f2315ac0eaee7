//! # Constant Folding
//!
//! Folds operator subtrees whose operands are all literals into a single float
//! literal. The parser calls [`constant_fold`] each time it finishes an
//! expression, so trees reaching the optimizer driver are usually folded already.
//!
//! ## Numeric semantics
//!
//! - `+ - * / ^ %` run on f64, with int literals widened first.
//! - `| & # << >> ~` truncate to a 32 bit int, compute, then widen the result.
//! - Division by zero, NaN and overflow follow IEEE-754 and wrapping int
//!   arithmetic. Nothing is reported as an error.
//!
//! The result always becomes a `FloatLiteral` whose lexeme is the `%.20g` text
//! of the value, even when both operands were ints.

use crate::compiler_frontend::ast::ast_nodes::{BinaryOperator, NodeKind, UnaryOperator};
use crate::compiler_frontend::ast::node_arena::{NodeArena, NodeId};
use crate::compiler_frontend::optimizers::literal_format::format_folded_literal;
use crate::compiler_frontend::string_interning::StringTable;
use crate::compiler_frontend::tokens::Token;
use crate::fold_log;

/// Fold every constant operator subtree below (and including) `id`.
///
/// Folding happens in place, so the returned id is always `id`.
/// Running it again on its own output changes nothing.
pub fn constant_fold(
    arena: &mut NodeArena,
    string_table: &mut StringTable,
    id: NodeId,
) -> NodeId {
    match arena[id].kind {
        NodeKind::BinaryOp { op, lhs, rhs } => {
            let lhs = fold_child(arena, string_table, id, lhs);
            let rhs = fold_child(arena, string_table, id, rhs);

            let operands = (arena[lhs].literal_value(), arena[rhs].literal_value());
            if let (Some(lhs_value), Some(rhs_value)) = operands {
                if let Some(result) = evaluate_binary(op, lhs_value, rhs_value) {
                    fold_log!(format!(
                        "[OPT][Fold] {} {} {} -> {}",
                        lhs_value,
                        op.to_str(),
                        rhs_value,
                        result
                    ));

                    become_literal(arena, string_table, id, result);
                    arena.release_tree(lhs);
                    arena.release_tree(rhs);
                }
            }
        }

        NodeKind::UnaryOp { op, operand } => {
            let operand = fold_child(arena, string_table, id, operand);

            if let Some(value) = arena[operand].literal_value() {
                if let Some(result) = evaluate_unary(op, value) {
                    fold_log!(format!("[OPT][Fold] {}{} -> {}", op.to_str(), value, result));

                    become_literal(arena, string_table, id, result);
                    arena.release_tree(operand);
                }
            }
        }

        // Instrument numbers are never expressions
        NodeKind::InstrumentList { .. } => {}

        _ => {
            for child in arena[id].children() {
                fold_child(arena, string_table, id, child);
            }
        }
    }

    id
}

fn fold_child(
    arena: &mut NodeArena,
    string_table: &mut StringTable,
    parent: NodeId,
    child: NodeId,
) -> NodeId {
    let folded = constant_fold(arena, string_table, child);
    if folded != child {
        arena[parent].replace_child(child, folded);
    }
    folded
}

/// Retag a node as a float literal holding `value`.
/// The node keeps its id, rate and markup. The caller releases the old children.
fn become_literal(arena: &mut NodeArena, string_table: &mut StringTable, id: NodeId, value: f64) {
    let lexeme = string_table.get_or_intern(format_folded_literal(value));
    let node = &mut arena[id];
    node.kind = NodeKind::FloatLiteral;
    node.token = Token::float(value, lexeme);
}

/// Compile time result of `lhs op rhs`, or None if the operator is only evaluated at run time.
pub fn evaluate_binary(op: BinaryOperator, lhs: f64, rhs: f64) -> Option<f64> {
    let result = match op {
        BinaryOperator::Add => lhs + rhs,
        BinaryOperator::Subtract => lhs - rhs,
        BinaryOperator::Multiply => lhs * rhs,
        BinaryOperator::Divide => lhs / rhs,
        BinaryOperator::Power => lhs.powf(rhs),

        // fmod semantics, the sign follows the dividend and x % 0 is NaN
        BinaryOperator::Modulo => lhs % rhs,

        BinaryOperator::BitwiseOr => (truncate_to_int(lhs) | truncate_to_int(rhs)) as f64,
        BinaryOperator::BitwiseAnd => (truncate_to_int(lhs) & truncate_to_int(rhs)) as f64,
        BinaryOperator::BitwiseXor => (truncate_to_int(lhs) ^ truncate_to_int(rhs)) as f64,
        BinaryOperator::ShiftLeft => {
            truncate_to_int(lhs).wrapping_shl(truncate_to_int(rhs) as u32) as f64
        }
        BinaryOperator::ShiftRight => {
            truncate_to_int(lhs).wrapping_shr(truncate_to_int(rhs) as u32) as f64
        }

        BinaryOperator::Less
        | BinaryOperator::LessEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEqual
        | BinaryOperator::Equal
        | BinaryOperator::NotEqual
        | BinaryOperator::And
        | BinaryOperator::Or => return None,
    };

    Some(result)
}

pub fn evaluate_unary(op: UnaryOperator, value: f64) -> Option<f64> {
    match op {
        UnaryOperator::Negate => Some(-value),
        UnaryOperator::BitwiseNot => Some(!truncate_to_int(value) as f64),
        UnaryOperator::Not => None,
    }
}

/// Truncate toward zero into a 32 bit machine int.
/// Values outside the i64 range saturate first, then wrap into 32 bits. NaN becomes 0.
fn truncate_to_int(value: f64) -> i32 {
    value as i64 as i32
}
