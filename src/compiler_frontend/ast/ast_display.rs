use crate::compiler_frontend::ast::ast::Program;
use crate::compiler_frontend::ast::ast_nodes::NodeKind;
use crate::compiler_frontend::ast::node_arena::{NodeArena, NodeId};
use crate::compiler_frontend::string_interning::StringTable;

/// Renders a tree back into orchestra text.
/// Nested binary operators are always parenthesized so the shape is unambiguous.
pub struct TreeDisplay<'a> {
    arena: &'a NodeArena,
    string_table: &'a StringTable,
}

impl<'a> TreeDisplay<'a> {
    pub fn new(arena: &'a NodeArena, string_table: &'a StringTable) -> Self {
        TreeDisplay {
            arena,
            string_table,
        }
    }

    pub fn program(&self, program: &Program) -> String {
        self.statements(&program.statements)
    }

    pub fn statements(&self, statements: &[NodeId]) -> String {
        statements
            .iter()
            .map(|id| self.node(*id))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn node(&self, id: NodeId) -> String {
        let node = &self.arena[id];
        let lexeme = self.string_table.resolve(node.token.lexeme);

        match &node.kind {
            NodeKind::Instrument { numbers, body } => {
                let mut text = format!("instr {}", self.node(*numbers));
                for statement in body {
                    text.push_str("\n  ");
                    text.push_str(&self.node(*statement));
                }
                text.push_str("\nendin");
                text
            }
            NodeKind::InstrumentList { entries } => entries
                .iter()
                .map(|token| self.string_table.resolve(token.lexeme))
                .collect::<Vec<_>>()
                .join(", "),
            NodeKind::Opcode { outputs, args } => {
                let mut parts = Vec::with_capacity(3);
                if !outputs.is_empty() {
                    parts.push(self.list(outputs));
                }
                parts.push(lexeme.to_owned());
                if !args.is_empty() {
                    parts.push(self.list(args));
                }
                parts.join(" ")
            }
            NodeKind::Assignment { target, value } => {
                format!("{} = {}", self.node(*target), self.node(*value))
            }
            NodeKind::FunctionCall { args } => format!("{lexeme}({})", self.list(args)),
            NodeKind::BinaryOp { op, lhs, rhs } => format!(
                "{} {} {}",
                self.operand(*lhs),
                op.to_str(),
                self.operand(*rhs)
            ),
            NodeKind::UnaryOp { op, operand } => {
                format!("{}{}", op.to_str(), self.operand(*operand))
            }
            NodeKind::IntLiteral | NodeKind::FloatLiteral | NodeKind::Identifier => {
                lexeme.to_owned()
            }
        }
    }

    fn list(&self, ids: &[NodeId]) -> String {
        ids.iter()
            .map(|id| self.node(*id))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn operand(&self, id: NodeId) -> String {
        match self.arena[id].kind {
            NodeKind::BinaryOp { .. } => format!("({})", self.node(id)),
            _ => self.node(id),
        }
    }
}
