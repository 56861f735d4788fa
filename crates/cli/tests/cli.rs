use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

const KERNEL: &str = include_str!("fixtures/kernel.dts");
const DUMP: &str = include_str!("fixtures/dump.dts");

fn dtsym(dir: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_dtsym"))
		.args(args)
		.current_dir(dir)
		.env_remove("DTSYM_REGISTRY")
		.env_remove("DTSYM_LOG")
		.output()
		.expect("run dtsym")
}

fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn wrong_argument_count_exits_with_usage() {
	let dir = tempfile::tempdir().expect("create tempdir");
	assert_eq!(dtsym(dir.path(), &[]).status.code(), Some(1));
	assert_eq!(dtsym(dir.path(), &["a.dts", "b.dts"]).status.code(), Some(1));
}

#[test]
fn missing_input_exits_with_two() {
	let dir = tempfile::tempdir().expect("create tempdir");
	let output = dtsym(dir.path(), &["nope.dts"]);
	assert_eq!(output.status.code(), Some(2));
	assert!(stdout(&output).contains("File not found: 'nope.dts'"));
}

#[test]
fn replace_without_registry_exits_with_three() {
	let dir = tempfile::tempdir().expect("create tempdir");
	fs::write(dir.path().join("dump.dts"), DUMP).expect("write dump");

	let output = dtsym(dir.path(), &["dump.dts"]);
	assert_eq!(output.status.code(), Some(3));
	assert!(stdout(&output).contains("Tip: "));
	assert!(!dir.path().join("dump.dts_cleaned").exists());
}

#[test]
fn replace_without_symbols_exits_with_four() {
	let dir = tempfile::tempdir().expect("create tempdir");
	let stripped = DUMP.split("\t__symbols__").next().expect("dump has symbols").to_string() + "};\n";
	fs::write(dir.path().join("dump.dts"), stripped).expect("write dump");
	fs::write(dir.path().join("phandles.txt"), "phandle;0\n").expect("write registry");

	let output = dtsym(dir.path(), &["dump.dts"]);
	assert_eq!(output.status.code(), Some(4));
	assert!(stdout(&output).contains("Couldn't find symbols"));
}

#[test]
fn learn_then_replace() {
	let dir = tempfile::tempdir().expect("create tempdir");
	fs::write(dir.path().join("kernel.dts"), KERNEL).expect("write kernel source");
	fs::write(dir.path().join("dump.dts"), DUMP).expect("write dump");

	let learned = dtsym(dir.path(), &["kernel.dts"]);
	assert_eq!(learned.status.code(), Some(0));
	assert!(stdout(&learned).contains("Added 3 phandle entries"));

	let registry = fs::read_to_string(dir.path().join("phandles.txt")).expect("registry written");
	assert_eq!(registry, "clocks;0\nclocks;1\ninterrupt-parent;0\nphandle;0\n");

	let again = dtsym(dir.path(), &["kernel.dts"]);
	assert!(stdout(&again).contains("Added 0 phandle entries"));
	assert_eq!(fs::read_to_string(dir.path().join("phandles.txt")).expect("registry kept"), registry);

	let replaced = dtsym(dir.path(), &["dump.dts"]);
	assert_eq!(replaced.status.code(), Some(0));
	let log = stdout(&replaced);
	assert!(log.contains("Registered 3 symbols"));
	assert!(log.contains("Registered the path of 3 phandles"));
	assert!(log.contains("3 phandle references replaced with their symbol"));

	let cleaned = fs::read_to_string(dir.path().join("dump.dts_cleaned")).expect("output written");
	assert_eq!(cleaned.lines().count(), DUMP.lines().count());
	assert!(cleaned.contains("\t\t\tinterrupt-parent = <&intc>;\n"));
	assert!(cleaned.contains("\t\t\tclocks = <&osc &osc>;\n"));
	assert!(cleaned.contains("\t\t\tinterrupts = <0x00 0x05 0x04>;\n"));
	assert!(cleaned.contains("\t\t\tphandle = <0x03>;\n"));
	assert_eq!(fs::read_to_string(dir.path().join("dump.dts")).expect("input kept"), DUMP);
}

#[test]
fn registry_and_output_flags() {
	let dir = tempfile::tempdir().expect("create tempdir");
	fs::write(dir.path().join("dump.dts"), DUMP).expect("write dump");
	fs::write(dir.path().join("custom.txt"), "interrupt-parent;0\n").expect("write registry");

	let output = dtsym(dir.path(), &["--registry", "custom.txt", "-o", "resolved.dts", "dump.dts"]);
	assert_eq!(output.status.code(), Some(0));

	let cleaned = fs::read_to_string(dir.path().join("resolved.dts")).expect("output written");
	assert!(cleaned.contains("interrupt-parent = <&intc>;"));
	assert!(cleaned.contains("clocks = <0x01 0x01>;"));
	assert_eq!(
		fs::read_to_string(dir.path().join("custom.txt")).expect("registry saved"),
		"interrupt-parent;0\nphandle;0\n"
	);
}

#[test]
fn config_file_sets_registry_and_suffix() {
	let dir = tempfile::tempdir().expect("create tempdir");
	fs::write(dir.path().join("dtsym.toml"), "registry = \"db.txt\"\noutput_suffix = \".resolved\"\n").expect("write config");
	fs::write(dir.path().join("kernel.dts"), KERNEL).expect("write kernel source");
	fs::write(dir.path().join("dump.dts"), DUMP).expect("write dump");

	assert_eq!(dtsym(dir.path(), &["kernel.dts"]).status.code(), Some(0));
	assert!(dir.path().join("db.txt").exists());
	assert!(!dir.path().join("phandles.txt").exists());

	assert_eq!(dtsym(dir.path(), &["dump.dts"]).status.code(), Some(0));
	assert!(dir.path().join("dump.dts.resolved").exists());
}

#[test]
fn strict_mode_fails_on_duplicate_phandles() {
	let dir = tempfile::tempdir().expect("create tempdir");
	let duplicated = DUMP.replace("phandle = <0x03>;", "phandle = <0x01>;");
	fs::write(dir.path().join("dump.dts"), &duplicated).expect("write dump");
	fs::write(dir.path().join("phandles.txt"), "clocks;0\n").expect("write registry");

	let lenient = dtsym(dir.path(), &["dump.dts"]);
	assert_eq!(lenient.status.code(), Some(0));
	assert!(stdout(&lenient).contains("Warning: Phandle 0x1 is declared by both '/oscillator' and '/soc/serial@2000'"));

	let strict = dtsym(dir.path(), &["--strict", "dump.dts"]);
	assert_eq!(strict.status.code(), Some(5));
}
