use crate::compiler_frontend::ast::ast::Program;
use crate::compiler_frontend::ast::node_arena::{NodeArena, NodeId};
use crate::compiler_frontend::optimizers::constant_folding::constant_fold;
use crate::compiler_frontend::optimizers::identity_folding::fold_identities;
use crate::compiler_frontend::string_interning::{StringId, StringTable};
use crate::settings::OptimizerConfig;
use crate::{ast_log, optimizer_log, timer_log};
use std::time::Instant;

/// Rewrites a parsed orchestra into a simpler equivalent tree.
///
/// Holds the arena and string table exclusively for as long as it lives,
/// so nothing else can observe the tree halfway through a rewrite.
pub struct Optimizer<'a> {
    pub(crate) arena: &'a mut NodeArena,
    pub(crate) string_table: &'a mut StringTable,
    pub(crate) config: &'a OptimizerConfig,

    // Interned callee name of the init coercion, compared by id
    pub(crate) init_coercion: StringId,
}

impl<'a> Optimizer<'a> {
    pub fn new(
        arena: &'a mut NodeArena,
        string_table: &'a mut StringTable,
        config: &'a OptimizerConfig,
    ) -> Self {
        let init_coercion = string_table.intern(&config.init_coercion_name);

        Optimizer {
            arena,
            string_table,
            config,
            init_coercion,
        }
    }

    /// Specialize init coercions in every statement, then fuse temporaries once
    /// over the whole program. Constant folding is not run here, the parser has
    /// already folded each expression through [`Optimizer::fold_expression`].
    pub fn optimize_program(&mut self, mut program: Program) -> Program {
        let _time = Instant::now();

        for position in 0..program.len() {
            let statement = program.statements[position];
            let specialized = self.specialize(statement);

            if specialized != statement {
                optimizer_log!(format!(
                    "[OPT][Driver] statement {} replaced by {}",
                    position, specialized
                ));
                program.replace(position, specialized);
            }
        }

        timer_log!(_time, "Init coercions specialized in: ");

        self.fuse_redundant_assigns(&mut program.statements);

        timer_log!(_time, "Optimizer finished in: ");
        ast_log!(format!(
            "{:#}",
            program.to_json(self.arena, self.string_table)
        ));

        program
    }

    /// Entry point for the parser once it has assembled an expression.
    /// Folds constants, then drops identity operations if the config enables it.
    pub fn fold_expression(&mut self, id: NodeId) -> NodeId {
        let folded = constant_fold(self.arena, self.string_table, id);

        if self.config.fold_identities {
            fold_identities(self.arena, folded)
        } else {
            folded
        }
    }
}
