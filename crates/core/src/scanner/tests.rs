use pretty_assertions::assert_eq;

use super::*;

fn scan(source: &str) -> Vec<PropertyAssignment> {
	Document::parse(source).assignments().collect()
}

fn tokens(assignment: &PropertyAssignment) -> Vec<&str> {
	assignment.cells().map(|cell| cell.text.as_str()).collect()
}

#[test]
fn single_group() {
	let found = scan("/ {\n\tnode {\n\t\tclocks = <&clk 1>;\n\t};\n};\n");
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].name, "clocks");
	assert_eq!(found[0].path.to_string(), "/node");
	assert_eq!(tokens(&found[0]), ["&clk", "1"]);
}

#[test]
fn indices_continue_across_groups() {
	let found = scan("clocks = <&a 1>, <&b 2>;\n");
	let assignment = &found[0];
	assert_eq!(assignment.groups.len(), 2);
	assert_eq!(assignment.cell_count(), 4);
	assert_eq!(assignment.cell(2).map(|c| c.text.as_str()), Some("&b"));
	assert_eq!(assignment.reference_indices().collect::<Vec<_>>(), [0, 2]);
}

#[test]
fn path_references_are_single_cells() {
	let source = "\tremote-endpoint = <&{/soc/port}>;\n\tclocks = <&{/osc} 1>, <&clk 2>;\n";
	let found = scan(source);
	assert_eq!(found.len(), 2);
	assert_eq!(tokens(&found[0]), ["&{/soc/port}"]);
	assert_eq!(tokens(&found[1]), ["&{/osc}", "1", "&clk", "2"]);
	assert_eq!(found[1].reference_indices().collect::<Vec<_>>(), [0, 2]);

	let line = source.lines().nth(1).unwrap();
	let first = found[1].cell(0).expect("path cell");
	assert_eq!(&line[first.span.clone()], "&{/osc}");
}

#[test]
fn joins_continuation_lines() {
	let source = "\tinterrupts = <0 10 4>,\n\t\t\t<0 11 4>;\n\tnext = <7>;\n";
	let found = scan(source);
	assert_eq!(found.len(), 2);
	assert_eq!(tokens(&found[0]), ["0", "10", "4", "0", "11", "4"]);
	assert_eq!(found[0].line, 0);

	let last = found[0].cell(5).expect("sixth cell");
	assert_eq!(last.line, 1);
	assert_eq!(&source.lines().nth(1).unwrap()[last.span.clone()], "4");
	assert_eq!(found[1].name, "next");
}

#[test]
fn cell_spans_point_at_tokens() {
	let source = "\tgpios = <&gpio0  12 0>;\n";
	let found = scan(source);
	let line = source.lines().next().unwrap();
	for cell in found[0].cells() {
		assert_eq!(&line[cell.span.clone()], cell.text);
	}
}

#[test]
fn properties_without_cells_are_skipped() {
	let found = scan("compatible = \"vendor,chip\", \"generic\";\nstatus = \"okay\";\nreg = <0x0 0x1000>;\n");
	let names: Vec<&str> = found.iter().map(|a| a.name.as_str()).collect();
	assert_eq!(names, ["reg"]);
}

#[test]
fn quoted_equals_and_semicolons_do_not_split() {
	let found = scan("bootargs = \"console=ttyS0; quiet\"; reg = <1>;\n");
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].name, "reg");
}

#[test]
fn several_statements_on_one_line() {
	let found = scan("a = <1>; b = <&x>;\n");
	let names: Vec<&str> = found.iter().map(|a| a.name.as_str()).collect();
	assert_eq!(names, ["a", "b"]);
}

#[test]
fn single_line_node_property() {
	let found = scan("/ {\n\tleds { gpios = <&gpio 3>; };\n};\n");
	assert_eq!(found[0].name, "gpios");
	assert_eq!(found[0].path.to_string(), "/leds");
}

#[test]
fn parenthesised_expression_is_one_cell() {
	let found = scan("interrupts = <GIC_SPI (32 + 4) IRQ_TYPE_LEVEL_HIGH>;\n");
	assert_eq!(tokens(&found[0]), ["GIC_SPI", "(32 + 4)", "IRQ_TYPE_LEVEL_HIGH"]);
}

#[test]
fn commented_assignments_are_ignored() {
	let found = scan("// foo = <&bar>;\n/* baz = <&qux>; */\nreal = <&x>; // tail = <1>;\n");
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].name, "real");
}

#[test]
fn bits_prefix_and_hash_names() {
	let found = scan("#address-cells = <1>;\nvalues = /bits/ 16 <0x1 0x2>;\n");
	assert_eq!(found[0].name, "#address-cells");
	assert_eq!(tokens(&found[1]), ["0x1", "0x2"]);
}

#[test]
fn unterminated_statement_is_dropped() {
	let found = scan("broken = <1 2\nok = <3>;\n");
	let names: Vec<&str> = found.iter().map(|a| a.name.as_str()).collect();
	assert_eq!(names, ["ok"]);
}

#[test]
fn scanner_is_restartable() {
	let doc = Document::parse("a = <1>;\nb = <2>;\n");
	let scanner = doc.assignments();
	let first: Vec<_> = scanner.clone().collect();
	let second: Vec<_> = scanner.collect();
	assert_eq!(first, second);
	assert_eq!(first.len(), 2);
}
