#![cfg(test)]

use super::test_support::TreeBuilder;
use crate::compiler_frontend::ast::ast::Program;
use crate::compiler_frontend::ast::ast_nodes::{BinaryOperator, NodeKind};
use crate::compiler_frontend::ast::node_arena::NodeId;
use crate::settings::OptimizerConfig;
use proptest::prelude::*;

#[test]
fn driver_specializes_then_fuses() {
    let config = OptimizerConfig::new();
    let mut builder = TreeBuilder::new();

    // #t0 = i(ka + kb)
    // kx = #t0
    // instr 1
    //   aout oscil i(0.5), 440
    // endin
    let a = builder.ident("ka");
    let b = builder.ident("kb");
    let sum = builder.binary(BinaryOperator::Add, a, b);
    let coercion = builder.call("i", vec![sum]);
    let temporary = builder.assign("#t0", coercion);
    let read = builder.ident("#t0");
    let copy = builder.assign("kx", read);
    let half = builder.float(0.5);
    let amplitude = builder.call("i", vec![half]);
    let frequency = builder.int(440);
    let oscil = builder.opcode("oscil", &["aout"], vec![amplitude, frequency]);
    let instrument = builder.instrument(&["1"], vec![oscil]);

    let program = Program::new(vec![temporary, copy, instrument]);
    let program = builder.optimizer(&config).optimize_program(program);

    assert_eq!(
        builder.render_program(&program),
        "kx = ka + kb\ninstr 1\n  aout oscil 0.5, 440\nendin"
    );
    builder.assert_owned_exactly(&program);
}

#[test]
fn replaced_top_level_statements_are_spliced_in_place() {
    let config = OptimizerConfig::new();
    let mut builder = TreeBuilder::new();

    let x = builder.ident("kx");
    let before = builder.assign("ka", x);
    let five = builder.int(5);
    let bare = builder.call("i", vec![five]);
    let y = builder.ident("ky");
    let after = builder.assign("kb", y);

    let program = Program::new(vec![before, bare, after]);
    let program = builder.optimizer(&config).optimize_program(program);

    assert_eq!(program.statements, vec![before, five, after]);
    assert!(!builder.arena.is_live(bare));
    builder.assert_owned_exactly(&program);
}

#[test]
fn empty_program_is_returned_unchanged() {
    let config = OptimizerConfig::new();
    let mut builder = TreeBuilder::new();

    let program = builder.optimizer(&config).optimize_program(Program::default());
    assert!(program.is_empty());
    assert_eq!(builder.arena.live_count(), 0);
}

#[test]
fn fusion_sees_statements_after_specialization() {
    let config = OptimizerConfig::new();
    let mut builder = TreeBuilder::new();

    // #t0 = i(abs(kx))
    // kout = #t0
    let x = builder.ident("kx");
    let abs = builder.call("abs", vec![x]);
    let coercion = builder.call("i", vec![abs]);
    let temporary = builder.assign("#t0", coercion);
    let read = builder.ident("#t0");
    let copy = builder.assign("kout", read);

    let program = Program::new(vec![temporary, copy]);
    let program = builder.optimizer(&config).optimize_program(program);

    assert_eq!(builder.render_program(&program), "kout = abs(kx)");
    builder.assert_owned_exactly(&program);
}

#[test]
fn json_dump_describes_every_node() {
    let config = OptimizerConfig::new();
    let mut builder = TreeBuilder::new();

    let one = builder.int(1);
    let two = builder.int(2);
    let sum = builder.binary(BinaryOperator::Add, one, two);
    let folded = builder.optimizer(&config).fold_expression(sum);
    let assign = builder.assign("ix", folded);
    let program = Program::new(vec![assign]);

    let json = program.to_json(&builder.arena, &builder.strings);
    let statement = &json[0];
    assert_eq!(statement["kind"], "assignment");
    assert_eq!(statement["lexeme"], "=");
    assert_eq!(statement["children"][0]["lexeme"], "ix");
    assert_eq!(statement["children"][1]["kind"], "float");
    assert_eq!(statement["children"][1]["lexeme"], "3");
    assert_eq!(statement["children"][1]["value"]["Float"], 3.0);
}

#[test]
fn optimizing_twice_changes_nothing() {
    let config = OptimizerConfig::new();
    let mut builder = TreeBuilder::new();

    let a = builder.ident("ka");
    let coerced = builder.call("i", vec![a]);
    let two = builder.int(2);
    let product = builder.binary(BinaryOperator::Multiply, coerced, two);
    let temporary = builder.assign("#t0", product);
    let read = builder.ident("#t0");
    let copy = builder.assign("kx", read);

    let program = Program::new(vec![temporary, copy]);
    let program = builder.optimizer(&config).optimize_program(program);
    let first = builder.render_program(&program);

    let program = builder.optimizer(&config).optimize_program(program);
    assert_eq!(builder.render_program(&program), first);
    assert_eq!(first, "kx = ka * 2");
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Ident,
    Literal(i64),
    CoercedLiteral(i64),
    CoercedIdent,

    // #t = ksrc followed by kdst = #t
    Temporary,
}

fn source_strategy() -> impl Strategy<Value = Source> {
    prop_oneof![
        Just(Source::Ident),
        (-100i64..100).prop_map(Source::Literal),
        (-100i64..100).prop_map(Source::CoercedLiteral),
        Just(Source::CoercedIdent),
        Just(Source::Temporary),
    ]
}

/// Builds the statements for one source and returns them with the id that
/// should survive optimization in their place.
fn build_statements(
    builder: &mut TreeBuilder,
    source: Source,
    index: usize,
) -> (Vec<NodeId>, NodeId) {
    let destination = format!("kdst{index}");

    let value = match source {
        Source::Ident => builder.ident(&format!("ksrc{index}")),
        Source::Literal(number) => builder.int(number),
        Source::CoercedLiteral(number) => {
            let literal = builder.int(number);
            builder.call("i", vec![literal])
        }
        Source::CoercedIdent => {
            let source = builder.ident(&format!("ksrc{index}"));
            builder.call("i", vec![source])
        }
        Source::Temporary => {
            let temporary_name = format!("#t{index}");
            let source = builder.ident(&format!("ksrc{index}"));
            let temporary = builder.assign(&temporary_name, source);
            let read = builder.ident(&temporary_name);
            let copy = builder.assign(&destination, read);
            return (vec![temporary, copy], temporary);
        }
    };

    let statement = builder.assign(&destination, value);
    (vec![statement], statement)
}

proptest! {
    #[test]
    fn statement_order_is_preserved(sources in prop::collection::vec(source_strategy(), 0..24)) {
        let config = OptimizerConfig::new();
        let mut builder = TreeBuilder::new();

        let mut statements = Vec::new();
        let mut survivors = Vec::new();
        for (index, source) in sources.iter().enumerate() {
            let (built, survivor) = build_statements(&mut builder, *source, index);
            statements.extend(built);
            survivors.push(survivor);
        }

        let program = Program::new(statements);
        let program = builder.optimizer(&config).optimize_program(program);

        // Copies out of temporaries disappear, everything else keeps its id and relative order
        prop_assert_eq!(&program.statements, &survivors);

        for (index, statement) in program.statements.iter().enumerate() {
            let NodeKind::Assignment { target, value } = builder.arena[*statement].kind else {
                panic!("statement {index} is no longer an assignment");
            };
            prop_assert_eq!(builder.lexeme(target), format!("kdst{index}"));

            let still_coerced = matches!(builder.arena[value].kind, NodeKind::FunctionCall { .. });
            prop_assert!(!still_coerced, "statement {} still holds a call", index);
        }

        let reachable = program.count_nodes(&builder.arena);
        prop_assert_eq!(reachable.ok(), Some(builder.arena.live_count()));
    }
}
