use assert_cmd::Command;

/// Helper to get a Command for the forward binary.
#[allow(deprecated)]
fn forward_cmd() -> Command {
    Command::cargo_bin("gemara-to-ampel").unwrap()
}

/// Helper to get a Command for the reverse binary.
#[allow(deprecated)]
fn reverse_cmd() -> Command {
    Command::cargo_bin("ampel-to-gemara").unwrap()
}

#[test]
fn forward_help_works() {
    forward_cmd().arg("--help").assert().success();
}

#[test]
fn reverse_help_works() {
    reverse_cmd().arg("--help").assert().success();
}

#[test]
fn missing_input_argument_is_a_usage_error() {
    forward_cmd().assert().failure();
    reverse_cmd().assert().failure();
}
