//! Fuses compiler temporaries into the assignment that copies them out.
//!
//! The parser lowers `dest = a + b` into `#t0 = a + b` followed by `dest = #t0`.
//! This pass turns that pair back into a single `dest = a + b`.
//!
//! Only one hop is fused: in `#t0 = x; #t1 = #t0; dest = #t1` the first pair
//! becomes `#t1 = x` and the copy into `dest` stays.

use crate::compiler_frontend::ast::ast_nodes::NodeKind;
use crate::compiler_frontend::ast::node_arena::NodeId;
use crate::compiler_frontend::optimizers::optimizer::Optimizer;
use crate::compiler_frontend::string_interning::StringId;
use crate::optimizer_log;

impl Optimizer<'_> {
    /// Single forward pass over a statement sequence.
    pub fn fuse_redundant_assigns(&mut self, statements: &mut Vec<NodeId>) {
        let mut position = 0;

        while position < statements.len() {
            let statement = statements[position];

            match self.temporary_target(statement) {
                Some(temporary) => {
                    let next = statements.get(position + 1).copied();
                    if let Some(next) = next {
                        self.fuse_copy_out(temporary, next, statements, position + 1);
                    }
                }

                // Temporaries only appear in statement sequences, so this is
                // normally a walk that finds nothing
                None => self.fuse_nested(statement),
            }

            position += 1;
        }
    }

    /// If `next` is `dest = #t`, move `dest` into the temporary's place and drop `next`.
    fn fuse_copy_out(
        &mut self,
        temporary: NodeId,
        next: NodeId,
        statements: &mut Vec<NodeId>,
        next_position: usize,
    ) {
        let Some((destination, source)) = self.copy_out(next) else {
            return;
        };

        if source != self.arena[temporary].token.lexeme {
            return;
        }

        optimizer_log!(format!(
            "[OPT][Assigns] fused {} into {}",
            self.string_table.resolve(source),
            self.string_table
                .resolve(self.arena[destination].token.lexeme)
        ));

        let destination_token = self.arena[destination].token;
        self.arena[temporary].token = destination_token;

        statements.remove(next_position);
        self.arena.release_tree(next);
    }

    /// The target node of `#t = ...` or `#t opcode ...`, if it names a temporary.
    fn temporary_target(&self, id: NodeId) -> Option<NodeId> {
        let target = match &self.arena[id].kind {
            NodeKind::Assignment { target, .. } => *target,
            NodeKind::Opcode { outputs, args } if !args.is_empty() => *outputs.first()?,
            _ => return None,
        };

        let lexeme = self.arena[target].token.lexeme;
        self.string_table
            .starts_with(lexeme, &self.config.temporary_prefix)
            .then_some(target)
    }

    /// `dest = source` gives the destination node and the source lexeme.
    fn copy_out(&self, id: NodeId) -> Option<(NodeId, StringId)> {
        match self.arena[id].kind {
            NodeKind::Assignment { target, value } => {
                Some((target, self.arena[value].token.lexeme))
            }
            _ => None,
        }
    }

    /// Run the pass over every statement sequence nested below `id`.
    fn fuse_nested(&mut self, id: NodeId) {
        let mut sequences: Vec<Vec<NodeId>> = self.arena[id]
            .statement_sequences_mut()
            .into_iter()
            .map(std::mem::take)
            .collect();

        for sequence in &mut sequences {
            self.fuse_redundant_assigns(sequence);
        }

        for (slot, sequence) in self.arena[id]
            .statement_sequences_mut()
            .into_iter()
            .zip(sequences)
        {
            *slot = sequence;
        }

        match self.arena[id].kind {
            NodeKind::Assignment { target, value } => {
                self.fuse_nested(target);
                self.fuse_nested(value);
            }
            NodeKind::BinaryOp { lhs, rhs, .. } => {
                self.fuse_nested(lhs);
                self.fuse_nested(rhs);
            }
            NodeKind::UnaryOp { operand, .. } => self.fuse_nested(operand),
            _ => {}
        }
    }
}
