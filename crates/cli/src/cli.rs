use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "dtsym")]
#[command(about = "Resolve phandles in decompiled Devicetree sources back into labels")]
#[command(long_about = "Detects whether the DTS was taken from the kernel source tree or decompiled from a DTB.\n\n\
	For kernel sources, records which property cells hold phandle references in the registry file.\n\
	For decompiled dumps, rewrites those cells in a copy of the file using the labels from __symbols__.")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// DTS file from the kernel tree or from `dtc -I dtb -O dts -@`
	pub dts: PathBuf,

	/// Registry file of phandle-bearing cells (default: phandles.txt)
	#[arg(long, short = 'r', value_name = "PATH")]
	pub registry: Option<PathBuf>,

	/// Where to write the rewritten dump (default: <dts>_cleaned)
	#[arg(long, short = 'o', value_name = "PATH")]
	pub output: Option<PathBuf>,

	/// Fail when two nodes declare the same phandle
	#[arg(long)]
	pub strict: bool,

	/// Verbose logging on stderr
	#[arg(long, short = 'v')]
	pub verbose: bool,
}
