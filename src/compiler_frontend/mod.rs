pub mod ast {
    pub mod ast;
    pub mod ast_display;
    pub mod ast_nodes;
    pub mod node_arena;
}

pub mod optimizers {
    pub mod constant_folding;
    pub mod identity_folding;
    pub mod init_coercion;
    pub mod literal_format;
    pub mod optimizer;
    pub mod redundant_assigns;

}

pub mod compiler_messages {
    pub mod compiler_dev_logging;
    pub mod compiler_errors;
}
pub use compiler_messages::compiler_errors;

pub mod string_interning;
pub mod tokens;
