use super::*;

const DUMP: &str = "\
/ {
\tx {
\t\ty {
\t\t\tphandle = <0x05>;
\t\t};
\t};

\t__symbols__ {
\t\tbar_label = \"/x/y\";
\t\talias_label = \"/x/y\";
\t\troot_child = \"/x\";
\t};
};
";

#[test]
fn maps_paths_to_labels() {
	let doc = Document::parse(DUMP);
	let table = SymbolTable::read(&doc).expect("symbols present");
	assert_eq!(table.len(), 3);
	assert_eq!(table.label(&NodePath::parse("/x/y")), Some("bar_label"));
	assert_eq!(table.label(&NodePath::parse("/x")), Some("root_child"));
	assert!(table.warnings().is_empty());
}

#[test]
fn matches_tracked_paths() {
	let doc = Document::parse(DUMP);
	let table = SymbolTable::read(&doc).expect("symbols present");
	let tracked = &doc.lines()[3].path;
	assert_eq!(table.label(tracked), Some("bar_label"));
}

#[test]
fn missing_block_is_fatal() {
	let doc = Document::parse("/ {\n\tfoo = <1>;\n};\n");
	assert!(matches!(SymbolTable::read(&doc), Err(DtsError::SymbolsNotFound)));
}

#[test]
fn bad_lines_warn_and_continue() {
	let source = "/ {\n\t__symbols__ {\n\t\tgood = \"/a\";\n\t\tbad line\n\t\tunquoted = /b;\n\t\tlast = \"/c\";\n\t};\n};\n";
	let doc = Document::parse(source);
	let table = SymbolTable::read(&doc).expect("symbols present");
	assert_eq!(table.len(), 2);
	assert_eq!(table.label(&NodePath::parse("/c")), Some("last"));
	assert_eq!(
		table.warnings(),
		[
			Warning::UnparsableSymbol {
				line: 3,
				text: "bad line".to_string()
			},
			Warning::UnparsableSymbol {
				line: 4,
				text: "unquoted = /b;".to_string()
			},
		]
	);
}

#[test]
fn only_reads_inside_block() {
	let source = "/ {\n\t__symbols__ {\n\t\ta = \"/a\";\n\t};\n\tother {\n\t\tb = \"/b\";\n\t};\n};\n";
	let doc = Document::parse(source);
	let table = SymbolTable::read(&doc).expect("symbols present");
	assert_eq!(table.len(), 1);
	assert_eq!(table.label(&NodePath::parse("/b")), None);
}
