//! Node paths reconstructed from brace nesting.
//!
//! Devicetree nodes open with `name {` and close with `};`. [`PathTracker`]
//! keeps one segment per open brace so the path depth always equals the
//! nesting depth. The root node `/ {` contributes a segment that renders as
//! nothing, which is why `/soc/uart@1000` has three segments when parsed from
//! a decompiled dump but renders with two names.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};


/// Segment pushed for the root node `/ {`.
const ROOT_SEGMENT: &str = "/";

/// Root-relative location of a node.
///
/// Equality, ordering and hashing only look at node names, so a path tracked
/// through an explicit `/ {` equals the same path parsed from a string.
#[derive(Debug, Clone, Default)]
pub struct NodePath {
	segments: Vec<String>,
}

impl NodePath {
	/// The empty path, rendered as `/`.
	pub fn root() -> Self {
		Self::default()
	}

	/// Parses an absolute path such as `/soc/serial@1000`.
	///
	/// Empty segments are ignored, so `/x/y/` and `/x/y` are equal.
	pub fn parse(path: &str) -> Self {
		Self {
			segments: path.split('/').filter(|s| !s.is_empty()).map(str::to_string).collect(),
		}
	}

	/// Number of open nodes, counting the root node when it was opened explicitly.
	pub fn depth(&self) -> usize {
		self.segments.len()
	}

	/// Whether the path renders as `/`.
	pub fn is_root(&self) -> bool {
		self.names().next().is_none()
	}

	/// Node names, skipping the root segment.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().map(String::as_str).filter(|s| *s != ROOT_SEGMENT)
	}

	/// Name of the innermost node, if any.
	pub fn leaf(&self) -> Option<&str> {
		self.names().last()
	}

	pub fn push(&mut self, segment: impl Into<String>) {
		self.segments.push(segment.into());
	}

	pub fn pop(&mut self) -> Option<String> {
		self.segments.pop()
	}
}

impl PartialEq for NodePath {
	fn eq(&self, other: &Self) -> bool {
		self.names().eq(other.names())
	}
}

impl Eq for NodePath {}

impl Hash for NodePath {
	fn hash<H: Hasher>(&self, state: &mut H) {
		for name in self.names() {
			name.hash(state);
		}
	}
}

impl PartialOrd for NodePath {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for NodePath {
	fn cmp(&self, other: &Self) -> Ordering {
		self.names().cmp(other.names())
	}
}

impl fmt::Display for NodePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names = self.names().peekable();
		if names.peek().is_none() {
			return f.write_str("/");
		}
		for name in names {
			write!(f, "/{name}")?;
		}
		Ok(())
	}
}

/// Stack-based tracker of the node path active at each line.
///
/// Lines are fed in order and must already be free of comments. Every `{`
/// opens a node and every `}` closes one, skipping quoted text and `&{/path}`
/// references. A line reports the deepest path it reaches, so
/// `n { a = <1>; };` belongs to `n` and leaves the depth unchanged.
#[derive(Debug, Clone, Default)]
pub struct PathTracker {
	current: NodePath,
}

impl PathTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Path in effect after the last fed line.
	pub fn current(&self) -> &NodePath {
		&self.current
	}

	/// Consumes one line and returns the path the line belongs to.
	///
	/// The opening line of a node belongs to that node, and so does its
	/// closing `};`. Closing more nodes than were opened leaves the path at
	/// the root.
	pub fn feed(&mut self, code: &str) -> NodePath {
		let mut line_path = self.current.clone();
		let mut head = 0;

		for (offset, brace) in node_braces(code) {
			if brace == '{' {
				self.current.push(node_segment(&code[head..offset]));
				if self.current.depth() > line_path.depth() {
					line_path = self.current.clone();
				}
			} else {
				self.current.pop();
			}
			head = offset + 1;
		}

		line_path
	}

	/// Paths for every line of `lines`, starting from the root.
	pub fn annotate<'a, I>(lines: I) -> Vec<NodePath>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut tracker = Self::new();
		lines.into_iter().map(|line| tracker.feed(line)).collect()
	}
}

/// Offsets of the braces in `code` that open or close nodes.
fn node_braces(code: &str) -> Vec<(usize, char)> {
	let mut braces = Vec::new();
	let mut in_string = false;
	let mut escaped = false;
	let mut in_path = false;
	let mut previous = None;

	for (offset, ch) in code.char_indices() {
		if in_string {
			match ch {
				_ if escaped => escaped = false,
				'\\' => escaped = true,
				'"' => in_string = false,
				_ => {}
			}
		} else if in_path {
			in_path = ch != '}';
		} else {
			match ch {
				'"' => in_string = true,
				'{' if previous == Some('&') => in_path = true,
				'{' | '}' => braces.push((offset, ch)),
				_ => {}
			}
		}
		previous = Some(ch);
	}

	braces
}

/// Extracts the node name from the text preceding a `{`.
///
/// Labels (`uart0:`) and any earlier statement are dropped, so
/// `uart0: serial@1000 ` yields `serial@1000`.
fn node_segment(head: &str) -> String {
	let head = head.rsplit(';').next().unwrap_or(head);
	head.split_whitespace()
		.filter(|token| !token.ends_with(':'))
		.next_back()
		.unwrap_or(ROOT_SEGMENT)
		.to_string()
}
