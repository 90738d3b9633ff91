//! End-to-end help behavior of a tool built on the library.
#![cfg(unix)]

mod common;

use common::{run_widget, stderr, stdout, ToolDir, WIDGET_EXTRA};

const WIDTH: (&str, &str) = ("CMDLINE_WIDTH", "80");

#[test]
fn help_for_a_nested_command() {
    let tools = ToolDir::create();
    let output = run_widget(tools.path(), &[WIDTH], &["help", "store"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let expected = [
        "Store manages the places widgets are kept.\n",
        "\n",
        "Usage:\n",
        "   widget store <command>\n",
        "\n",
        "The widget store commands are:\n",
        "   list        Lists stores\n",
        "   help        Display help for commands or topics\n",
        "Run \"widget store help [command]\" for command usage.\n",
        "\n",
        "The global flags are:\n",
        " -v=0\n",
        "   Log level for verbose output.\n",
        "\n",
        "Run \"widget store help -style=full\" to show all global flags.\n",
    ]
    .concat();
    assert_eq!(stdout(&output), expected);
}

#[test]
fn dash_help_matches_help_path() {
    let tools = ToolDir::create();
    let direct = run_widget(tools.path(), &[WIDTH], &["build", "-help"]);
    let via_help = run_widget(tools.path(), &[WIDTH], &["help", "build"]);
    assert!(direct.status.success());
    assert_eq!(stdout(&direct), stdout(&via_help));
    assert!(stdout(&direct).contains("Usage:\n   widget build [flags] <name>...\n"));
}

#[test]
fn short_style_prints_one_line() {
    let tools = ToolDir::create();
    let output = run_widget(tools.path(), &[("CMDLINE_STYLE", "short")], &["build", "-help"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Builds widgets\n");
}

#[test]
fn short_style_ignores_narrow_widths() {
    let tools = ToolDir::create();
    let vars = [("CMDLINE_STYLE", "short"), ("CMDLINE_WIDTH", "5")];
    let output = run_widget(tools.path(), &vars, &["store", "-help"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Manages widget stores\n");
}

#[test]
fn unknown_command_exits_with_usage_error() {
    let tools = ToolDir::create();
    let output = run_widget(tools.path(), &[WIDTH], &["help", "nope"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(
        err.starts_with("ERROR: widget: unknown command or topic \"nope\"\n\n"),
        "{err}"
    );
    assert!(err.contains("Usage:\n   widget <command>\n"));
}

#[test]
fn runnable_commands_still_run() {
    let tools = ToolDir::create();
    let output = run_widget(tools.path(), &[], &["build", "gear", "cog"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "building gear cog\n");
}

#[test]
fn discovered_executables_are_listed_and_delegated_to() {
    let tools = ToolDir::create();
    tools.script("widget-extra", WIDGET_EXTRA);

    let output = run_widget(tools.path(), &[WIDTH], &[]);
    assert!(output.status.success());
    assert!(
        stdout(&output).contains("   extra       Extra widget tooling\n"),
        "{}",
        stdout(&output)
    );

    let output = run_widget(tools.path(), &[WIDTH], &["help", "extra"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "usage of widget extra\n");

    let output = run_widget(tools.path(), &[WIDTH], &["help", "extra", "gears"]);
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(stderr(&output), "extra cannot help with gears\n");
}
