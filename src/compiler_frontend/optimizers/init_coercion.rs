//! Peephole specialization of the init coercion `i(...)`.
//!
//! `i()` forces its argument to be evaluated at init time. Depending on the
//! shape of the argument the call can be removed or pushed further down:
//!
//! - `i(5)`      -> `5`
//! - `i(fn(x))`  -> `fn(i(x))`
//! - `i(a op b)` -> `i(a) op i(b)`
//!
//! Pushing through a call assumes the function commutes with the coercion.

use crate::compiler_frontend::ast::ast_nodes::{Node, NodeKind};
use crate::compiler_frontend::ast::node_arena::NodeId;
use crate::compiler_frontend::optimizers::optimizer::Optimizer;
use crate::compiler_frontend::tokens::Token;
use crate::optimizer_log;

enum ArgumentShape {
    Literal,
    Call,
    Other,
}

impl Optimizer<'_> {
    pub(crate) fn is_init_coercion(&self, id: NodeId) -> bool {
        let node = &self.arena[id];
        matches!(node.kind, NodeKind::FunctionCall { .. })
            && node.token.lexeme == self.init_coercion
    }

    /// Walk a statement or expression, specializing every init coercion in it.
    ///
    /// Returns the id that should take the place of `id` in its parent. This only
    /// differs from `id` when the node itself was an init coercion.
    pub fn specialize(&mut self, id: NodeId) -> NodeId {
        let id = if self.is_init_coercion(id) {
            self.rewrite_init_coercion(id)
        } else {
            id
        };

        for child in self.arena[id].children() {
            if matches!(self.arena[child].kind, NodeKind::InstrumentList { .. }) {
                continue;
            }

            let specialized = self.specialize(child);
            if specialized != child {
                self.arena[id].replace_child(child, specialized);
            }
        }

        id
    }

    /// Rewrite one `i(...)` call and return the node that replaces it.
    /// The call node itself is released unless the call is left as it was.
    pub fn rewrite_init_coercion(&mut self, call: NodeId) -> NodeId {
        let argument = match &self.arena[call].kind {
            NodeKind::FunctionCall { args } if args.len() == 1 => args[0],

            // Not a well formed coercion, leave it for the rate checker to report
            _ => return call,
        };

        let shape = match self.arena[argument].kind {
            NodeKind::IntLiteral | NodeKind::FloatLiteral => ArgumentShape::Literal,
            NodeKind::FunctionCall { .. } => ArgumentShape::Call,
            _ => ArgumentShape::Other,
        };

        match shape {
            // i(5) -> 5
            ArgumentShape::Literal => {
                optimizer_log!("[OPT][Coercion] removed i() around a literal");
            }

            // i(fn(x)) -> fn(i(x))
            ArgumentShape::Call => {
                let inner_args = self.arena[argument]
                    .call_args_mut()
                    .map(std::mem::take)
                    .unwrap_or_default();
                let coerced = self.coercion_call(inner_args);

                if let Some(args) = self.arena[argument].call_args_mut() {
                    args.push(coerced);
                }

                optimizer_log!(format!(
                    "[OPT][Coercion] pushed i() into {}()",
                    self.string_table.resolve(self.arena[argument].token.lexeme)
                ));
            }

            // i(a op b) -> i(a) op i(b)
            ArgumentShape::Other => {
                for child in self.arena[argument].children() {
                    if matches!(self.arena[child].kind, NodeKind::InstrumentList { .. }) {
                        continue;
                    }
                    let coerced = self.coercion_call(vec![child]);
                    self.arena[argument].replace_child(child, coerced);
                }

                optimizer_log!("[OPT][Coercion] distributed i() over operands");
            }
        }

        // The wrapper's only child lives on as (or inside) `argument`
        self.arena.take(call);
        argument
    }

    fn coercion_call(&mut self, args: Vec<NodeId>) -> NodeId {
        let callee = Token::new(self.init_coercion);
        self.arena.alloc(Node::function_call(callee, args))
    }
}
