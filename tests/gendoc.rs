//! gendoc runs a tool and writes its recursive usage as crate docs.
#![cfg(unix)]

mod common;

use common::{gendoc, stderr, widget_bin, ToolDir, WIDGET_EXTRA};
use std::path::Path;

const NOTICE: &str = "// This file was auto-generated by gendoc.\n// DO NOT UPDATE MANUALLY\n\n";

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read generated file")
}

#[test]
fn documents_a_tool_tree_with_delegates() {
    let tools = ToolDir::create();
    tools.script("widget-extra", WIDGET_EXTRA);
    let out = tools.path().join("doc.rs");

    let output = gendoc()
        .arg("--env")
        .arg(format!("PATH={}", tools.path().display()))
        .arg("--out")
        .arg(&out)
        .arg(widget_bin())
        .output()
        .expect("run gendoc");
    assert!(output.status.success(), "{}", stderr(&output));

    let doc = read(&out);
    let head = [
        NOTICE,
        "/*!\n",
        "Widget manages widgets and the stores that hold them.\n",
        "\n",
        "Usage:\n",
        "   widget <command>\n",
        "\n",
        "The widget commands are:\n",
        "   build       Builds widgets\n",
        "   store       Manages widget stores\n",
        "   extra       Extra widget tooling\n",
        "   help        Display help for commands or topics\n",
        "\n",
        "The widget additional help topics are:\n",
        "   stores      Description of widget stores\n",
        "\n",
        "The global flags are:\n",
        " -v=0\n",
        "   Log level for verbose output.\n",
        "\n",
        " -log_dir=\n",
        "   Write log files to this directory.\n",
        "\n",
        "Widget build - Builds widgets\n",
        "\n",
        "Build assembles widgets from their parts.\n",
    ]
    .concat();
    assert!(doc.starts_with(&head), "{doc}");
    assert!(doc.contains("\nWidget extra - Extra widget tooling\n\nExtra does extra things for widget.\n"));
    assert!(doc.contains(" -style=compact\n"));
    assert!(doc.contains(" -width=<terminal width>\n"));
    assert!(doc.ends_with("Stores are listed with:\n   widget store list\n*/\n"), "{doc}");

    let order = [
        "Widget store - Manages widget stores\n",
        "Widget store list - Lists stores\n",
        "Widget extra - Extra widget tooling\n",
        "Widget help - Display help for commands or topics\n",
        "Widget stores - Description of widget stores\n",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|header| doc.find(header).unwrap_or_else(|| panic!("missing {header:?}")))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn failing_tool_fails_the_run() {
    let tools = ToolDir::create();
    let tool = tools.script("broken", "#!/bin/sh\necho partial\nexit 4\n");
    let out = tools.path().join("doc.rs");

    let output = gendoc().arg("--env=").arg("--out").arg(&out).arg(&tool).output().expect("run gendoc");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("help ...\" failed"), "{}", stderr(&output));
    assert!(!out.exists());
}

#[test]
fn stderr_usage_with_post_processing_and_report() {
    let tools = ToolDir::create();
    let tool = tools.script(
        "flagtool",
        "#!/bin/sh\necho \"Usage of $0:\" >&2\necho \" -parallel=16\" >&2\necho \"   Worker count.\" >&2\nexit 2\n",
    );
    let notice = tools.path().join("NOTICE");
    std::fs::write(&notice, "// Copyright 2024 Widget Co.\n").unwrap();
    let out = tools.path().join("doc.rs");
    let report = tools.path().join("report.json");

    let output = gendoc()
        .arg("--env=")
        .arg("--use-stderr")
        .arg("--postprocess-output")
        .arg("--suppress-default")
        .arg("parallel=<number of CPUs>")
        .arg("--copyright-notice")
        .arg(&notice)
        .arg("--report")
        .arg(&report)
        .arg("--out")
        .arg(&out)
        .arg(&tool)
        .arg("usage")
        .output()
        .expect("run gendoc");
    assert!(output.status.success(), "{}", stderr(&output));

    let doc = read(&out);
    assert_eq!(
        doc,
        format!(
            "// Copyright 2024 Widget Co.\n{NOTICE}/*!\nUsage of flagtool:\n -parallel=<number of CPUs>\n   Worker count.\n*/\n"
        )
    );

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(report["args"], serde_json::json!(["usage"]));
    assert_eq!(report["bytes"], serde_json::json!(doc.len()));
    assert_eq!(report["out"], serde_json::json!(out.display().to_string()));
}

#[test]
fn go_flag_pkg_reads_stderr_and_hides_thread_count() {
    let tools = ToolDir::create();
    let tool = tools.script(
        "gotool",
        "#!/bin/sh\necho \"Usage of $0:\" >&2\necho \" -test.parallel=12\" >&2\necho \"   Run tests in parallel.\" >&2\nexit 2\n",
    );
    let out = tools.path().join("doc.rs");

    let output = gendoc()
        .arg("--env=")
        .arg("--go-flag-pkg")
        .arg("--out")
        .arg(&out)
        .arg(&tool)
        .arg("usage")
        .output()
        .expect("run gendoc");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        read(&out),
        format!("{NOTICE}/*!\nUsage of gotool:\n -test.parallel=<number of threads>\n   Run tests in parallel.\n*/\n")
    );
}
