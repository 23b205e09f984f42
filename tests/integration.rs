use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_easygen")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

const MATH_JS: &str = "/* #@ @name: Add @brief: adds two numbers @# */\nfunction add(a, b) { return a + b; }\n";

// -- markdown output --

#[test]
fn c_file_matches_expected_markdown() {
    let expected = std::fs::read_to_string(fixture_path("stack.expected.md")).unwrap();
    let assert = cmd()
        .arg(fixture_path("stack.c"))
        .assert()
        .success()
        .stderr(predicate::str::contains("✔️"))
        .stderr(predicate::str::contains("2 blocks"));
    assert_eq!(stdout_of(&assert), expected);
}

#[test]
fn single_block_renders_name_and_brief() {
    let dir = TempDir::new().unwrap();
    let math = write(dir.path(), "math.js", MATH_JS);

    cmd()
        .arg(&math)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Math\n"))
        .stdout(predicate::str::contains("## Add"))
        .stdout(predicate::str::contains("> adds two numbers"));
}

#[test]
fn unsupported_file_is_reported_and_skipped() {
    let dir = TempDir::new().unwrap();
    let math = write(dir.path(), "math.js", MATH_JS);
    let notes = write(dir.path(), "notes.txt", "#@ @name: ignored @#");

    let assert = cmd()
        .arg(&math)
        .arg(&notes)
        .assert()
        .success()
        .stderr(predicate::str::contains("❌"))
        .stderr(predicate::str::contains("notes.txt ('.txt' is not supported)"));
    let out = stdout_of(&assert);
    assert_eq!(out.lines().filter(|l| l.starts_with("# ")).count(), 1);
    assert!(!out.contains("ignored"));
}

#[test]
fn snippet_indentation_is_removed() {
    let dir = TempDir::new().unwrap();
    let src = "/* #@ @name: Example @# */\n\
               function f() {\n\
               \t/* #@codestart@# */\n\
               \t\tlet x = 1;\n\
               \t\tlet y = 2;\n\
               \t/* #@codeend@# */\n\
               }\n";
    let file = write(dir.path(), "example.js", src);

    let assert = cmd().arg(&file).assert().success();
    let out = stdout_of(&assert);
    assert!(out.contains("```js\nlet x = 1;\nlet y = 2;\n```"), "{}", out);
    assert!(!out.contains('\t'));
}

#[test]
fn escaped_end_marker_reaches_output() {
    let dir = TempDir::new().unwrap();
    let src = "# #@ @name: markers @#\n\
               # #@codestart@#\n\
               END = \"\\#@codeend@#\"\n\
               # #@codeend@#\n";
    let file = write(dir.path(), "markers.py", src);

    cmd()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("```py\nEND = \"#@codeend@#\"\n```"));
}

#[test]
fn files_keep_command_line_order() {
    let dir = TempDir::new().unwrap();
    let b = write(dir.path(), "beta.js", "/* #@ @name: B @# */");
    let a = write(dir.path(), "alpha.js", "/* #@ @name: A @# */");

    let assert = cmd().arg(&b).arg(&a).assert().success();
    let out = stdout_of(&assert);
    assert!(out.find("# Beta").unwrap() < out.find("# Alpha").unwrap());
}

#[test]
fn directory_argument_is_scanned() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.c", "/* #@ @name: B @# */");
    write(dir.path(), "a.py", "'''\n#@\n@name: A\n@#\n'''");
    write(dir.path(), "skip.md", "#@ @name: no @#");

    let assert = cmd().arg(dir.path()).assert().success();
    let out = stdout_of(&assert);
    assert!(out.find("# A").unwrap() < out.find("# B").unwrap());
    assert!(!out.contains("## no"));
}

#[test]
fn footer_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let math = write(dir.path(), "math.js", MATH_JS);

    cmd()
        .arg(&math)
        .assert()
        .success()
        .stdout(predicate::str::contains("generated with [EasyGen]"));
    cmd()
        .arg("--no-footer")
        .arg(&math)
        .assert()
        .success()
        .stdout(predicate::str::contains("generated with").not())
        .stdout(predicate::str::ends_with("---\n"));
}

// -- malformed blocks --

#[test]
fn malformed_block_aborts_run() {
    let dir = TempDir::new().unwrap();
    let good = write(dir.path(), "good.js", MATH_JS);
    let bad = write(dir.path(), "bad.js", "/* #@ @name:Foo@ @# */");

    cmd()
        .arg(&good)
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("bad.js"))
        .stderr(predicate::str::contains("Tags found: 2, Contents found: 1"));
}

#[test]
fn keep_going_skips_malformed_file() {
    let dir = TempDir::new().unwrap();
    let good = write(dir.path(), "good.js", MATH_JS);
    let bad = write(dir.path(), "bad.js", "/* #@ @name:Foo@ @# */");

    cmd()
        .arg("--keep-going")
        .arg(&bad)
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Add"))
        .stdout(predicate::str::contains("Foo").not())
        .stderr(predicate::str::contains("❌"));
}

// -- input and output --

#[test]
fn latin1_file_does_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    let good = write(dir.path(), "good.c", "/* #@ @name: Good @# */\n");
    let latin = dir.path().join("latin.c");
    std::fs::write(&latin, b"/* #@ @name: caf\xe9 @# */\n").unwrap();

    cmd()
        .arg(&good)
        .arg(&latin)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Good"))
        .stdout(predicate::str::contains("## caf\u{fffd}"))
        .stderr(predicate::str::is_match("✔️ .*good\\.c").unwrap())
        .stderr(predicate::str::is_match("✔️ .*latin\\.c").unwrap())
        .stderr(predicate::str::contains("❌").not());
}

#[test]
fn stdin_input_uses_given_name() {
    cmd()
        .args(["--stdin", "calc.js"])
        .write_stdin(MATH_JS)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Calc\n"))
        .stdout(predicate::str::contains("## Add"));
}

#[test]
fn output_file_is_written() {
    let dir = TempDir::new().unwrap();
    let math = write(dir.path(), "math.js", MATH_JS);
    let out = dir.path().join("documentation.md");

    cmd()
        .arg("-o")
        .arg(&out)
        .arg(&math)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let doc = std::fs::read_to_string(&out).unwrap();
    assert!(doc.starts_with("# Math\n"));
}

#[test]
fn output_directory_gets_default_name() {
    let dir = TempDir::new().unwrap();
    let math = write(dir.path(), "math.js", MATH_JS);
    let docs = dir.path().join("docs");
    std::fs::create_dir(&docs).unwrap();

    cmd().arg("-o").arg(&docs).arg(&math).assert().success();
    let doc = std::fs::read_to_string(docs.join("documentation.md")).unwrap();
    assert!(doc.starts_with("# Math\n"));

    cmd()
        .args(["-f", "json", "-o"])
        .arg(&docs)
        .arg(&math)
        .assert()
        .success();
    let json = std::fs::read_to_string(docs.join("documentation.json")).unwrap();
    assert!(json.starts_with("[\n"));
}

#[test]
fn no_input_is_a_no_op() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Nothing to document"));
}

#[test]
fn undocumented_files_produce_nothing() {
    let dir = TempDir::new().unwrap();
    let plain = write(dir.path(), "plain.c", "int main(void) { return 0; }\n");
    let out = dir.path().join("doc.md");

    cmd()
        .arg("-o")
        .arg(&out)
        .arg(&plain)
        .assert()
        .success()
        .stderr(predicate::str::contains("no documentation found"));
    assert!(!out.exists());
}

#[test]
fn unmatched_glob_warns() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.js");

    cmd()
        .arg(&pattern)
        .assert()
        .success()
        .stderr(predicate::str::contains("no files matched"));
}

// -- formats and languages --

#[test]
fn json_format() {
    let dir = TempDir::new().unwrap();
    let math = write(dir.path(), "math.js", MATH_JS);

    let assert = cmd().args(["-f", "json"]).arg(&math).assert().success();
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&assert)).unwrap();
    assert_eq!(value[0]["extension"], "js");
    assert_eq!(value[0]["blocks"][0][0]["tag"], "name");
    assert_eq!(value[0]["blocks"][0][0]["content"], "Add");
}

#[test]
fn unknown_format_fails() {
    cmd()
        .args(["-f", "html", "whatever.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: html"));
}

#[test]
fn languages_file_adds_extension() {
    let dir = TempDir::new().unwrap();
    let langs = write(
        dir.path(),
        "languages.json",
        r#"{"languages": [{"extension": "kt", "block_start": "/*", "block_end": "*/", "line_comment": "//"}]}"#,
    );
    let kt = write(dir.path(), "main.kt", "/* #@ @name: main @# */\nfun main() {}\n");

    cmd()
        .arg("-l")
        .arg(&langs)
        .arg(&kt)
        .assert()
        .success()
        .stdout(predicate::str::contains("## main"));

    cmd()
        .arg("-l")
        .arg(&langs)
        .arg("--list-languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("kt\t/* */\t//"));
}

#[test]
fn invalid_languages_file_fails() {
    let dir = TempDir::new().unwrap();
    let langs = write(dir.path(), "languages.json", "{ nope");

    cmd()
        .arg("-l")
        .arg(&langs)
        .arg("--list-languages")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load languages"));
}

#[test]
fn list_languages_shows_builtins() {
    cmd()
        .arg("--list-languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("py\t''' '''\t#"))
        .stdout(predicate::str::contains("m\t%{ %}\t%"));
}
