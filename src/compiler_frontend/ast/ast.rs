use crate::compiler_frontend::ast::ast_nodes::NodeKind;
use crate::compiler_frontend::ast::node_arena::{NodeArena, NodeId};
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::string_interning::StringTable;
use serde_json::{Value, json};

/// The top level statements of an orchestra, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<NodeId>,
}

impl Program {
    pub fn new(statements: Vec<NodeId>) -> Self {
        Program { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Splice a replacement into the statement at `position`, returning the old id.
    pub fn replace(&mut self, position: usize, statement: NodeId) -> NodeId {
        std::mem::replace(&mut self.statements[position], statement)
    }

    /// Count the nodes owned by this program.
    /// Errors if any of them is released or shared between two parents.
    pub fn count_nodes(&self, arena: &NodeArena) -> Result<usize, CompilerError> {
        arena.count_reachable(&self.statements)
    }

    /// A JSON dump of the whole tree for debugging.
    pub fn to_json(&self, arena: &NodeArena, string_table: &StringTable) -> Value {
        Value::Array(
            self.statements
                .iter()
                .map(|id| node_to_json(*id, arena, string_table))
                .collect(),
        )
    }
}

pub fn node_to_json(id: NodeId, arena: &NodeArena, string_table: &StringTable) -> Value {
    let node = &arena[id];
    let lexeme = string_table.resolve(node.token.lexeme);
    let children: Vec<Value> = node
        .children()
        .into_iter()
        .map(|child| node_to_json(child, arena, string_table))
        .collect();

    let kind = match &node.kind {
        NodeKind::Instrument { .. } => json!("instrument"),
        NodeKind::InstrumentList { entries } => json!({
            "instrument_list": entries
                .iter()
                .map(|token| string_table.resolve(token.lexeme))
                .collect::<Vec<_>>()
        }),
        NodeKind::Opcode { outputs, .. } => json!({ "opcode": { "outputs": outputs.len() } }),
        NodeKind::Assignment { .. } => json!("assignment"),
        NodeKind::FunctionCall { .. } => json!("function_call"),
        NodeKind::BinaryOp { op, .. } => json!({ "binary": op }),
        NodeKind::UnaryOp { op, .. } => json!({ "unary": op }),
        NodeKind::IntLiteral => json!("int"),
        NodeKind::FloatLiteral => json!("float"),
        NodeKind::Identifier => json!("identifier"),
    };

    json!({
        "kind": kind,
        "lexeme": lexeme,
        "value": node.token.value,
        "rate": node.rate,
        "children": children,
    })
}
