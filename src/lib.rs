//! Tree optimizer for the orchestra language.
//!
//! Runs between parsing and rate resolution. The parser folds constant
//! subexpressions as it builds them ([`constant_fold`]), then hands the finished
//! program to [`Optimizer::optimize_program`], which specializes `i()` coercion
//! calls and fuses compiler temporaries into their destinations.

pub mod settings;

pub mod compiler_frontend;

pub use compiler_frontend::ast::ast::Program;
pub use compiler_frontend::ast::ast_nodes::{
    BinaryOperator, MarkupId, Node, NodeKind, Rate, UnaryOperator,
};
pub use compiler_frontend::ast::node_arena::{NodeArena, NodeId};
pub use compiler_frontend::compiler_errors::{CompilerError, ErrorMetaDataKey, ErrorType};
pub use compiler_frontend::optimizers::constant_folding::constant_fold;
pub use compiler_frontend::optimizers::identity_folding::fold_identities;
pub use compiler_frontend::optimizers::literal_format::format_folded_literal;
pub use compiler_frontend::optimizers::optimizer::Optimizer;
pub use compiler_frontend::string_interning::{StringId, StringTable};
pub use compiler_frontend::tokens::{Token, TokenValue};
pub use settings::OptimizerConfig;
