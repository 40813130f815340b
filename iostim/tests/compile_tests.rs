//! End-to-end compile tests: stimulus source in, events and rendered text out.

use iostim::{compile, compile_to_string, render, CompileError, Config, EvalError, Event};
use pretty_assertions::assert_eq;

fn compile_default(source: &str) -> Result<Vec<Event>, CompileError> {
    compile(source, &Config::default())
}

fn render_default(source: &str) -> String {
    compile_to_string(source, &Config::default())
        .unwrap_or_else(|e| panic!("compile failed: {}", e))
}

const LARGE_LOOP: &str = "for (i = 0; i < 'd500_000; i++) begin write_io(vdp_io2, i & 'hFF) end";

#[test]
fn test_inline_repeat_renders_three_writes() {
    assert_eq!(
        render_default("repeat(3) write_io(vdp_io0, 1);"),
        "IO,0x88,0x01\nIO,0x88,0x01\nIO,0x88,0x01\n"
    );
}

#[test]
fn test_for_loop_renders_each_iteration() {
    assert_eq!(
        render_default("for (i=0; i<4; i=i+1) begin write_io(vdp_io1, i) end"),
        "IO,0x89,0x00\nIO,0x89,0x01\nIO,0x89,0x02\nIO,0x89,0x03\n"
    );
}

#[test]
fn test_mixed_script_snapshot() {
    let source = r#"
// init "VDP"
write_io(vdp_io1, 8'h00);
write_io(vdp_io1, 8'h40 | 'd1);

repeat(2)
    write_io(vdp_io0, 'hAA);
for (i = 0; i < 3; i += 1) begin
    write_io(0x98, (i << 4) | 1)
end
#10;
"#;
    insta::assert_snapshot!(render_default(source).trim_end(), @r##"
    INFO,"init ""VDP"""
    IO,0x89,0x00
    IO,0x89,0x41
    IO,0x88,0xaa
    IO,0x88,0xaa
    IO,0x98,0x01
    IO,0x98,0x11
    IO,0x98,0x21
    INFO,"#10;"
    "##);
}

#[test]
fn test_large_loop_compacts_when_allowed() {
    let config = Config {
        allow_compact: true,
        ..Config::default()
    };
    let events = compile(LARGE_LOOP, &config).unwrap();
    assert_eq!(
        events,
        vec![Event::CompactLoop {
            port: 0x8A,
            port_token: "vdp_io2".into(),
            start: 0,
            end: 500_000,
            step: 1,
            body_expression: "(i & 0xff)".into(),
        }]
    );
    insta::assert_snapshot!(render(&events).trim_end(), @r"
    // Generated C loop for vdp_io2 : 0x0 .. 0x7a120 step 1
    for (uint32_t i = 0x0; i < 0x7a120; i += 1) {
        uint8_t v = (uint8_t)((i & 0xff) & 0xff);
        vdp_cartridge_write_io(0x8a, v);
    }
    ");
}

#[test]
fn test_compact_body_uses_c_operators() {
    let config = Config {
        allow_compact: true,
        expand_threshold: 1,
        ..Config::default()
    };
    let events = compile(
        "for (i = 0; i < 8; i++) begin write_io(vdp_io0, i // 2 | 'h80) end",
        &config,
    )
    .unwrap();
    let text = render(&events);
    assert!(text.contains("uint8_t v = (uint8_t)(((i / 2) | 0x80) & 0xff);"));
    assert_eq!(text.matches("//").count(), 1, "only the header comment: {}", text);
}

#[test]
fn test_large_loop_unrolls_when_compaction_disabled() {
    let events = compile_default(LARGE_LOOP).unwrap();
    assert_eq!(events.len(), 500_000);
    assert_eq!(events[0], Event::io(0x8A, 0));
    assert_eq!(events[0x1FF], Event::io(0x8A, 0xFF));
    assert!(events.iter().all(Event::is_io));
}

#[test]
fn test_threshold_override() {
    let config = Config {
        allow_compact: true,
        expand_threshold: 3,
        ..Config::default()
    };
    let source = "for (i=0; i<3; i++) begin write_io(vdp_io0, i) end\n\
                  for (i=0; i<4; i++) begin write_io(vdp_io0, i) end";
    let events = compile(source, &config).unwrap();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[3], Event::CompactLoop { end: 4, .. }));
}

#[test]
fn test_for_header_missing_begin_passes_block_through() {
    let source = "for (i=0; i<4; i++)\n write_io(vdp_io0, i);\nend\nwrite_io(vdp_io0, 2);";
    assert_eq!(
        compile_default(source).unwrap(),
        vec![
            Event::info("for (i=0; i<4; i++)\n write_io(vdp_io0, i);\nend"),
            Event::io(0x88, 2),
        ]
    );
}

#[test]
fn test_deeply_nested_expression_is_an_error() {
    let depth = 50_000;
    let source = format!(
        "write_io(vdp_io0, {}1{});",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let err = compile_default(&source).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Expression {
            line: 1,
            source: EvalError::InvalidExpression(iostim_parser::ParseError::NestingTooDeep { .. }),
            ..
        }
    ));
    assert!(err.to_string().contains("nested deeper than"));

    let negated = format!("write_io(vdp_io0, {}1);", "-".repeat(depth));
    assert!(compile_default(&negated).is_err());
}

#[test]
fn test_zero_step_produces_no_output() {
    let result = compile_default(
        "write_io(vdp_io0, 1);\nfor (i=0;i<10;i+=0) begin write_io(vdp_io0, i) end",
    );
    assert!(matches!(result, Err(CompileError::ZeroStepLoop { line: 2 })));
}

#[test]
fn test_malformed_header_does_not_stop_compilation() {
    let source = "for i in 0..4 begin write_io(vdp_io0, i) end\nwrite_io(vdp_io3, 2);";
    assert_eq!(
        compile_default(source).unwrap(),
        vec![
            Event::info("for i in 0..4 begin write_io(vdp_io0, i) end"),
            Event::io(0x8B, 2),
        ]
    );
}

#[test]
fn test_compilation_is_deterministic() {
    let source = "// a\nrepeat(4) write_io(vdp_io1, 'h3);\nfor (i = 2; i < 40; i += 3) begin write_io(vdp_io2, i * i) end";
    assert_eq!(render_default(source), render_default(source));
}

#[test]
fn test_unsupported_construct_is_fatal() {
    for expr in ["f(1)", "1 < 2", "a.b", "(1, 2)", "c ? 1 : 2", "1.5"] {
        let source = format!("write_io(vdp_io0, {});", expr);
        match compile_default(&source) {
            Err(CompileError::Expression {
                source: EvalError::UnsupportedConstruct(_),
                line: 1,
                ..
            }) => {}
            other => panic!("{}: unexpected {:?}", expr, other),
        }
    }
}

#[test]
fn test_expression_error_reports_normalized_text() {
    let err = compile_default("write_io(vdp_io0, 8'hFF + j);").unwrap_err();
    assert_eq!(
        err.to_string(),
        "line 1: failed to evaluate '8'hFF + j' -> '0xff + j': unknown name: j"
    );
}

#[test]
fn test_syntax_error_context() {
    let err = compile_default("write_io(vdp_io0, 1 + * 2);").unwrap_err();
    assert_eq!(err.context().as_deref(), Some("  1 | 1 + * 2\n    |     ^"));
}

#[test]
fn test_ports_from_config() {
    let config = Config::from_toml_str("[ports]\npsg_addr = 0xA0\n").unwrap();
    assert_eq!(
        compile("write_io(psg_addr, 3);", &config).unwrap(),
        vec![Event::io(0xA0, 3)]
    );
    assert!(matches!(
        compile("write_io(vdp_io0, 3);", &config),
        Err(CompileError::InvalidPort { .. })
    ));
}
