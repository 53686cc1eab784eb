use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn kaleidoscope() -> Command {
    let mut cmd = Command::cargo_bin("kaleidoscope").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn reports_each_unit_from_stdin() {
    kaleidoscope()
        .write_stdin("def foo(a b) a+b;\nextern sin(x);\nfoo(1, 2)\n")
        .assert()
        .success()
        .stdout("")
        .stderr(
            predicate::str::contains("ready> Parsed a function definition.\n")
                .and(predicate::str::contains("ready> Parsed an extern.\n"))
                .and(predicate::str::contains("ready> Parsed a top-level expr.\n")),
        );
}

#[test]
fn errors_are_reported_and_parsing_continues() {
    kaleidoscope()
        .write_stdin("def 1 foo(2)\n")
        .assert()
        .success()
        .stderr(
            "ready> LogError: Expected function name in prototype\n\
             ready> Parsed a top-level expr.\n\
             ready> ",
        );
}

#[test]
fn dump_ast_prints_sexprs() {
    kaleidoscope()
        .args(&["--dump-ast", "--prompt", ""])
        .write_stdin("1-2-3 (1+2)*3")
        .assert()
        .success()
        .stderr(
            "Parsed a top-level expr.\n(def (<anon>) (- (- 1 2) 3))\n\
             Parsed a top-level expr.\n(def (<anon>) (* (+ 1 2) 3))\n",
        );
}

#[test]
fn binop_extends_the_table() {
    kaleidoscope()
        .args(&["--dump-ast", "--prompt", "", "--binop", "/=40"])
        .write_stdin("1+4/2")
        .assert()
        .success()
        .stderr(predicate::str::contains("(+ 1 (/ 4 2))"));
}

#[test]
fn bad_binop_is_rejected() {
    kaleidoscope()
        .args(&["--binop", "/"])
        .write_stdin("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --binop /"));
}

#[test]
fn reads_a_source_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# a comment\nextern cos(x)").unwrap();

    kaleidoscope()
        .arg(file.path())
        .arg("--dump-ast")
        .assert()
        .success()
        .stderr(predicate::str::contains("Parsed an extern.\n(extern (cos x))\n"));
}

#[test]
fn missing_file_fails() {
    kaleidoscope()
        .arg("/definitely/not/here.ks")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input file"));
}

#[test]
fn tokens_mode_lists_tokens() {
    kaleidoscope()
        .arg("--tokens")
        .write_stdin("def f(x) 1.2.3 # gone\n;")
        .assert()
        .success()
        .stdout("def\nf\n(\nx\n)\n1.2\n;\n");
}

const INVALID_UTF8: &[u8] = b"1;\n\xff 2;\n3;\n";
const INVALID_UTF8_TRANSCRIPT: &str = "ready> Parsed a top-level expr.\n\
     ready> ready> LogError: unknown token when expecting an expression\n\
     ready> Parsed a top-level expr.\n\
     ready> ready> Parsed a top-level expr.\n\
     ready> ready> ";

#[test]
fn invalid_utf8_on_stdin_keeps_parsing() {
    kaleidoscope()
        .write_stdin(INVALID_UTF8)
        .assert()
        .success()
        .stderr(INVALID_UTF8_TRANSCRIPT);
}

#[test]
fn invalid_utf8_in_a_file_keeps_parsing() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(INVALID_UTF8).unwrap();

    kaleidoscope()
        .arg(file.path())
        .assert()
        .success()
        .stderr(INVALID_UTF8_TRANSCRIPT);
}
