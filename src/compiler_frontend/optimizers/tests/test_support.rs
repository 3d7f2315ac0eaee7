#![cfg(test)]

use crate::compiler_frontend::ast::ast::{Program, node_to_json};
use crate::compiler_frontend::ast::ast_display::TreeDisplay;
use crate::compiler_frontend::ast::ast_nodes::{BinaryOperator, Node, NodeKind, UnaryOperator};
use crate::compiler_frontend::ast::node_arena::{NodeArena, NodeId};
use crate::compiler_frontend::optimizers::optimizer::Optimizer;
use crate::compiler_frontend::string_interning::StringTable;
use crate::compiler_frontend::tokens::{Token, TokenValue};
use crate::settings::OptimizerConfig;

/// Builds trees the way the parser would, without any source text.
pub(crate) struct TreeBuilder {
    pub(crate) arena: NodeArena,
    pub(crate) strings: StringTable,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        TreeBuilder {
            arena: NodeArena::new(),
            strings: StringTable::new(),
        }
    }

    pub(crate) fn ident(&mut self, name: &str) -> NodeId {
        let token = Token::named(name, &mut self.strings);
        self.arena.alloc(Node::identifier(token))
    }

    pub(crate) fn int(&mut self, value: i64) -> NodeId {
        let token = Token::int(value, &mut self.strings);
        self.arena.alloc(Node::literal(token))
    }

    pub(crate) fn float(&mut self, value: f64) -> NodeId {
        let lexeme = self.strings.get_or_intern(value.to_string());
        self.arena.alloc(Node::literal(Token::float(value, lexeme)))
    }

    pub(crate) fn binary(&mut self, op: BinaryOperator, lhs: NodeId, rhs: NodeId) -> NodeId {
        let token = Token::named(op.to_str(), &mut self.strings);
        self.arena.alloc(Node::binary(op, token, lhs, rhs))
    }

    pub(crate) fn unary(&mut self, op: UnaryOperator, operand: NodeId) -> NodeId {
        let token = Token::named(op.to_str(), &mut self.strings);
        self.arena.alloc(Node::unary(op, token, operand))
    }

    pub(crate) fn call(&mut self, name: &str, args: Vec<NodeId>) -> NodeId {
        let token = Token::named(name, &mut self.strings);
        self.arena.alloc(Node::function_call(token, args))
    }

    pub(crate) fn assign(&mut self, target: &str, value: NodeId) -> NodeId {
        let target = self.ident(target);
        let token = Token::named("=", &mut self.strings);
        self.arena.alloc(Node::assignment(token, target, value))
    }

    pub(crate) fn opcode(&mut self, name: &str, outputs: &[&str], args: Vec<NodeId>) -> NodeId {
        let outputs = outputs.iter().map(|output| self.ident(output)).collect();
        let token = Token::named(name, &mut self.strings);
        self.arena.alloc(Node::opcode(token, outputs, args))
    }

    pub(crate) fn instrument(&mut self, numbers: &[&str], body: Vec<NodeId>) -> NodeId {
        let entries = numbers
            .iter()
            .map(|number| Token::named(number, &mut self.strings))
            .collect();
        let instr = Token::named("instr", &mut self.strings);
        let numbers = self
            .arena
            .alloc(Node::new(NodeKind::InstrumentList { entries }, instr));
        self.arena
            .alloc(Node::new(NodeKind::Instrument { numbers, body }, instr))
    }

    pub(crate) fn render(&self, id: NodeId) -> String {
        TreeDisplay::new(&self.arena, &self.strings).node(id)
    }

    pub(crate) fn render_program(&self, program: &Program) -> String {
        TreeDisplay::new(&self.arena, &self.strings).program(program)
    }

    pub(crate) fn json(&self, id: NodeId) -> serde_json::Value {
        node_to_json(id, &self.arena, &self.strings)
    }

    pub(crate) fn optimizer<'a>(&'a mut self, config: &'a OptimizerConfig) -> Optimizer<'a> {
        Optimizer::new(&mut self.arena, &mut self.strings, config)
    }

    pub(crate) fn lexeme(&self, id: NodeId) -> &str {
        self.strings.resolve(self.arena[id].token.lexeme)
    }

    /// The folded value of a literal node, asserting it is a float literal.
    pub(crate) fn folded_value(&self, id: NodeId) -> f64 {
        let node = &self.arena[id];
        assert_eq!(node.kind, NodeKind::FloatLiteral, "expected a folded literal");
        match node.token.value {
            TokenValue::Float(value) => value,
            other => panic!("folded literal carries {other:?}"),
        }
    }

    /// Every node in the arena must be owned by the program exactly once.
    pub(crate) fn assert_owned_exactly(&self, program: &Program) {
        let reachable = program
            .count_nodes(&self.arena)
            .expect("program should only reach live, unshared nodes");
        assert_eq!(
            reachable,
            self.arena.live_count(),
            "every live node should be reachable from the program"
        );
    }
}
