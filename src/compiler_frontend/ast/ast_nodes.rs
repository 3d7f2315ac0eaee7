use crate::compiler_frontend::ast::node_arena::NodeId;
use crate::compiler_frontend::tokens::{Token, TokenValue};
use serde::Serialize;

/// Rate classification attached by the parser.
/// Resolved later by the rate checker, the optimizer never reads or changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Rate {
    #[default]
    Unresolved,
    Init,
    Control,
    Audio,
    String,
}

/// Handle to an annotation owned by a later compiler pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkupId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    // Foldable
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
    BitwiseOr,
    BitwiseAnd,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,

    // Only ever evaluated at run time
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

impl BinaryOperator {
    /// Can this operator be evaluated at compile time when both operands are literals?
    pub fn is_foldable(self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Subtract
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Power
                | BinaryOperator::Modulo
                | BinaryOperator::BitwiseOr
                | BinaryOperator::BitwiseAnd
                | BinaryOperator::BitwiseXor
                | BinaryOperator::ShiftLeft
                | BinaryOperator::ShiftRight
        )
    }

    pub fn to_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "^",
            BinaryOperator::Modulo => "%",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseXor => "#",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    Negate,
    BitwiseNot,
    Not,
}

impl UnaryOperator {
    pub fn is_foldable(self) -> bool {
        matches!(self, UnaryOperator::Negate | UnaryOperator::BitwiseNot)
    }

    pub fn to_str(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::Not => "!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NodeKind {
    // instr 1, 2 ... endin
    Instrument {
        numbers: NodeId, // Always an InstrumentList
        body: Vec<NodeId>,
    },

    // The instrument numbers or names of an instr header.
    // Opaque to the optimizer, never read as an expression.
    InstrumentList {
        entries: Vec<Token>,
    },

    // out1, out2 opcode arg1, arg2
    // The token holds the opcode name. Outputs can be empty.
    Opcode {
        outputs: Vec<NodeId>,
        args: Vec<NodeId>,
    },

    // target = value
    Assignment {
        target: NodeId,
        value: NodeId,
    },

    // The token holds the callee name
    FunctionCall {
        args: Vec<NodeId>,
    },

    BinaryOp {
        op: BinaryOperator,
        lhs: NodeId,
        rhs: NodeId,
    },

    UnaryOp {
        op: UnaryOperator,
        operand: NodeId,
    },

    // Literal values live in the token
    IntLiteral,
    FloatLiteral,

    Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub token: Token,
    pub rate: Rate,
    pub markup: Option<MarkupId>,
}

impl Node {
    pub fn new(kind: NodeKind, token: Token) -> Self {
        Node {
            kind,
            token,
            rate: Rate::Unresolved,
            markup: None,
        }
    }

    pub fn identifier(token: Token) -> Self {
        Node::new(NodeKind::Identifier, token)
    }

    /// Literal node matching the token's numeric payload.
    /// Tokens without a number become identifiers.
    pub fn literal(token: Token) -> Self {
        let kind = match token.value {
            TokenValue::Int(_) => NodeKind::IntLiteral,
            TokenValue::Float(_) => NodeKind::FloatLiteral,
            TokenValue::None => NodeKind::Identifier,
        };
        Node::new(kind, token)
    }

    pub fn function_call(callee: Token, args: Vec<NodeId>) -> Self {
        Node::new(NodeKind::FunctionCall { args }, callee)
    }

    pub fn opcode(name: Token, outputs: Vec<NodeId>, args: Vec<NodeId>) -> Self {
        Node::new(NodeKind::Opcode { outputs, args }, name)
    }

    pub fn assignment(token: Token, target: NodeId, value: NodeId) -> Self {
        Node::new(NodeKind::Assignment { target, value }, token)
    }

    pub fn binary(op: BinaryOperator, token: Token, lhs: NodeId, rhs: NodeId) -> Self {
        Node::new(NodeKind::BinaryOp { op, lhs, rhs }, token)
    }

    pub fn unary(op: UnaryOperator, token: Token, operand: NodeId) -> Self {
        Node::new(NodeKind::UnaryOp { op, operand }, token)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::IntLiteral | NodeKind::FloatLiteral)
    }

    /// Value of a literal node widened to f64.
    pub fn literal_value(&self) -> Option<f64> {
        if self.is_literal() {
            self.token.numeric_value()
        } else {
            None
        }
    }

    /// Every child id in slot order.
    pub fn children(&self) -> Vec<NodeId> {
        match &self.kind {
            NodeKind::Instrument { numbers, body } => {
                let mut children = Vec::with_capacity(body.len() + 1);
                children.push(*numbers);
                children.extend_from_slice(body);
                children
            }
            NodeKind::Opcode { outputs, args } => {
                let mut children = Vec::with_capacity(outputs.len() + args.len());
                children.extend_from_slice(outputs);
                children.extend_from_slice(args);
                children
            }
            NodeKind::Assignment { target, value } => vec![*target, *value],
            NodeKind::FunctionCall { args } => args.clone(),
            NodeKind::BinaryOp { lhs, rhs, .. } => vec![*lhs, *rhs],
            NodeKind::UnaryOp { operand, .. } => vec![*operand],
            NodeKind::InstrumentList { .. }
            | NodeKind::IntLiteral
            | NodeKind::FloatLiteral
            | NodeKind::Identifier => Vec::new(),
        }
    }

    /// Swap the child `old` for `new` in whichever slot holds it.
    /// Returns false if `old` isn't a child of this node.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        fn replace_in(sequence: &mut [NodeId], old: NodeId, new: NodeId) -> bool {
            match sequence.iter_mut().find(|id| **id == old) {
                Some(slot) => {
                    *slot = new;
                    true
                }
                None => false,
            }
        }

        fn replace_slot(slot: &mut NodeId, old: NodeId, new: NodeId) -> bool {
            if *slot == old {
                *slot = new;
                true
            } else {
                false
            }
        }

        match &mut self.kind {
            NodeKind::Instrument { numbers, body } => {
                replace_slot(numbers, old, new) || replace_in(body, old, new)
            }
            NodeKind::Opcode { outputs, args } => {
                replace_in(outputs, old, new) || replace_in(args, old, new)
            }
            NodeKind::Assignment { target, value } => {
                replace_slot(target, old, new) || replace_slot(value, old, new)
            }
            NodeKind::FunctionCall { args } => replace_in(args, old, new),
            NodeKind::BinaryOp { lhs, rhs, .. } => {
                replace_slot(lhs, old, new) || replace_slot(rhs, old, new)
            }
            NodeKind::UnaryOp { operand, .. } => replace_slot(operand, old, new),
            NodeKind::InstrumentList { .. }
            | NodeKind::IntLiteral
            | NodeKind::FloatLiteral
            | NodeKind::Identifier => false,
        }
    }

    pub fn call_args_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::FunctionCall { args } => Some(args),
            _ => None,
        }
    }

    /// The statement sequences this node owns, for passes that work on whole statements.
    pub fn statement_sequences_mut(&mut self) -> Vec<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Instrument { body, .. } => vec![body],
            NodeKind::Opcode { outputs, args } => vec![outputs, args],
            NodeKind::FunctionCall { args } => vec![args],
            _ => Vec::new(),
        }
    }
}
