use bitsyc::error::{CompileError, ErrorKind};
use bitsyc::parser::Expected;
use bitsyc::tokenizer::{TokenKind, tokenize};
use bitsyc::{Target, translate, translate_into};

const COUNTDOWN: &str = "BEGIN
  READ n
  LOOP
    IFZ n
      BREAK
    ELSE
      PRINT n * (n + 1) / 2
    END
    n = n - 1
  END
END
";

const PARITY: &str = "BEGIN
  i = 10
  LOOP
    IFN i BREAK END
    IFZ i % 2 PRINT i ELSE PRINT -i END
    i = i - 1
  END
END
";

#[test]
fn every_sample_translates_for_every_target() {
  for source in [COUNTDOWN, PARITY, "BEGIN END"] {
    for target in [Target::Rust, Target::Swift] {
      let output = translate(source, target).unwrap();
      assert!(output.starts_with("// Compiler Output"), "{output}");
      assert!(output.ends_with("// End Compiler Output\n"), "{output}");
    }
  }
}

#[test]
fn translation_is_deterministic() {
  let first = translate(COUNTDOWN, Target::Rust).unwrap();
  let second = translate(COUNTDOWN, Target::Rust).unwrap();
  assert_eq!(first, second);
}

#[test]
fn countdown_in_rust() {
  let output = translate(COUNTDOWN, Target::Rust).unwrap();
  let main_body = output
    .split_once("let mut variables = Variables::default();\n")
    .map(|(_, rest)| rest)
    .unwrap();
  assert_eq!(
    main_body,
    concat!(
      "    variables.set(\"n\", read_in());\n",
      "    loop {\n",
      "        register = variables.get(\"n\");\n",
      "        if register == Wrapping(0) {\n",
      "            break;\n",
      "        } else {\n",
      "            println!(\"{}\", variables.get(\"n\") * (variables.get(\"n\") + Wrapping(1i64)) / Wrapping(2i64));\n",
      "        }\n",
      "        register = variables.get(\"n\") - Wrapping(1i64);\n",
      "        variables.set(\"n\", register);\n",
      "    }\n",
      "}\n",
      "\n",
      "// End Compiler Output\n",
    )
  );
}

#[test]
fn countdown_in_swift() {
  let output = translate(COUNTDOWN, Target::Swift).unwrap();
  assert!(output.contains("import Foundation"));
  assert!(output.contains(concat!(
    "variables[\"n\"] = readIn()\n",
    "while true {\n",
    "    register = variables[\"n\"]\n",
    "    if register == 0 {\n",
    "        break\n",
    "    } else {\n",
    "        print(variables[\"n\"] &* (variables[\"n\"] &+ 1) / 2)\n",
    "    }\n",
    "    register = variables[\"n\"] &- 1\n",
    "    variables[\"n\"] = register\n",
    "}\n",
  )));
}

#[test]
fn stray_break_in_swift_exits() {
  let output = translate("BEGIN BREAK END", Target::Swift).unwrap();
  assert!(output.contains("\nexit(0)\n"));
}

#[test]
fn tokens_cover_the_whole_program() {
  let tokens = tokenize(PARITY).unwrap();
  let rebuilt: String = tokens.iter().map(|token| token.text).collect();
  assert_eq!(rebuilt, PARITY);
  assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::Eof));
  let meaningful = tokens
    .iter()
    .filter(|token| !matches!(token.kind, TokenKind::Whitespace | TokenKind::Eof))
    .count();
  assert_eq!(meaningful, 27);
}

#[test]
fn fragments_arrive_in_parse_order() {
  let fragments = translate_into(
    "BEGIN PRINT 1 + 2 END",
    Target::Rust.backend(),
    Vec::<String>::new(),
  )
  .unwrap();
  let statement: Vec<&str> = fragments[1..fragments.len() - 1]
    .iter()
    .map(String::as_str)
    .collect();
  assert_eq!(
    statement,
    vec![
      "    ",
      "println!(\"{}\", ",
      "Wrapping(1i64)",
      " + ",
      "Wrapping(2i64)",
      ");",
      "\n",
    ]
  );
}

#[test]
fn first_error_stops_translation() {
  let mut partial = String::new();
  let err = translate_into(
    "BEGIN\n  PRINT 1\n  LOOP x = 2 *\nEND\n",
    Target::Rust.backend(),
    &mut partial,
  )
  .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Grammar);
  match &err {
    CompileError::UnexpectedToken {
      expected,
      found,
      pos,
    } => {
      assert_eq!(*expected, Expected::Factor);
      assert_eq!(found, "END");
      assert_eq!((pos.line, pos.column), (4, 1));
    }
    other => panic!("unexpected error: {other:?}"),
  }
  assert!(partial.contains("println!(\"{}\", Wrapping(1i64));"));
  assert!(partial.ends_with("    loop {\n        register = Wrapping(2i64) * "));
}

#[test]
fn diagnostics_point_at_the_offending_token() {
  let err = translate("BEGIN\n  x = 1 @ 2\nEND", Target::Rust).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Lexical);
  assert_eq!(err.position().map(|pos| pos.line), Some(2));
  assert_eq!(
    err.to_string(),
    "2:9: illegal character '@'\n  x = 1 @ 2\n        ^"
  );

  let err = translate("BEGIN PRINT 1 END END", Target::Rust).unwrap_err();
  assert_eq!(
    err.to_string(),
    format!(
      "1:19: expecting end of input but received \"END\"\nBEGIN PRINT 1 END END\n{}^",
      " ".repeat(18)
    )
  );
}

#[test]
fn keyword_typos_are_grammar_errors() {
  // BEGN is a variable, so the program is missing its BEGIN.
  let err = translate("BEGN PRINT 1 END", Target::Rust).unwrap_err();
  assert!(matches!(
    err,
    CompileError::UnexpectedToken {
      expected: Expected::Token(TokenKind::Begin),
      ..
    }
  ));

  // LOOPS is an assignment target, so `=` is expected next.
  let err = translate("BEGIN LOOPS PRINT 1 END END", Target::Rust).unwrap_err();
  assert!(matches!(
    err,
    CompileError::UnexpectedToken {
      expected: Expected::Token(TokenKind::Assign),
      ..
    }
  ));
}

#[test]
fn demo_programs_translate() {
  for name in ["demos/countdown.bitsy", "demos/fizz.bitsy"] {
    let source = std::fs::read_to_string(name).expect("Failed to read demo program");
    let rust = translate(&source, Target::Rust).unwrap();
    let swift = translate(&source, Target::Swift).unwrap();
    assert!(rust.contains("loop {"), "{name}");
    assert!(swift.contains("while true {"), "{name}");
  }
}
