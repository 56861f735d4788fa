//! Line-oriented view of a Devicetree source.
//!
//! Every physical line keeps its original text and terminator so a rewrite can
//! reproduce the input byte for byte. Alongside the text each line carries a
//! `code` copy with comments blanked to spaces (byte offsets stay aligned with
//! `text`) and the node path it belongs to.

use crate::path::{NodePath, PathTracker};


/// One physical line of a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
	/// Zero-based line index.
	pub index: usize,
	/// Line content without its terminator.
	pub text: &'a str,
	/// `"\n"`, `"\r\n"`, or empty for an unterminated last line.
	pub terminator: &'a str,
	/// `text` with `//` and `/* */` comments replaced by spaces.
	pub code: String,
	/// Node the line belongs to.
	pub path: NodePath,
}

/// A parsed source: lines, comment-free code, and node paths.
#[derive(Debug, Clone)]
pub struct Document<'a> {
	source: &'a str,
	lines: Vec<Line<'a>>,
}

impl<'a> Document<'a> {
	pub fn parse(source: &'a str) -> Self {
		let mut in_block = false;
		let mut lines: Vec<Line<'a>> = source
			.split_inclusive('\n')
			.enumerate()
			.map(|(index, raw)| {
				let (text, terminator) = split_terminator(raw);
				Line {
					index,
					text,
					terminator,
					code: blank_comments(text, &mut in_block),
					path: NodePath::root(),
				}
			})
			.collect();

		let paths = PathTracker::annotate(lines.iter().map(|line| line.code.as_str()));
		for (line, path) in lines.iter_mut().zip(paths) {
			line.path = path;
		}

		Self { source, lines }
	}

	/// The text this document was parsed from.
	pub fn source(&self) -> &'a str {
		self.source
	}

	pub fn lines(&self) -> &[Line<'a>] {
		&self.lines
	}

	pub fn line(&self, index: usize) -> Option<&Line<'a>> {
		self.lines.get(index)
	}

	/// Number of physical lines.
	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}
}

fn split_terminator(raw: &str) -> (&str, &str) {
	if let Some(text) = raw.strip_suffix("\r\n") {
		(text, "\r\n")
	} else if let Some(text) = raw.strip_suffix('\n') {
		(text, "\n")
	} else {
		(raw, "")
	}
}

/// Replaces comment bytes with spaces, carrying block-comment state across lines.
///
/// Quoted strings are copied verbatim so `"http://x"` is not cut short.
fn blank_comments(text: &str, in_block: &mut bool) -> String {
	let mut code = String::with_capacity(text.len());
	let mut in_string = false;
	let mut chars = text.char_indices().peekable();

	while let Some((offset, ch)) = chars.next() {
		if *in_block {
			if ch == '*' && chars.peek().is_some_and(|&(_, next)| next == '/') {
				chars.next();
				code.push_str("  ");
				*in_block = false;
			} else {
				code.extend(std::iter::repeat_n(' ', ch.len_utf8()));
			}
			continue;
		}

		if in_string {
			code.push(ch);
			if ch == '\\' {
				if let Some((_, escaped)) = chars.next() {
					code.push(escaped);
				}
			} else if ch == '"' {
				in_string = false;
			}
			continue;
		}

		match (ch, chars.peek().map(|&(_, next)| next)) {
			('"', _) => {
				in_string = true;
				code.push(ch);
			}
			('/', Some('/')) => {
				code.extend(std::iter::repeat_n(' ', text.len() - offset));
				break;
			}
			('/', Some('*')) => {
				chars.next();
				code.push_str("  ");
				*in_block = true;
			}
			_ => code.push(ch),
		}
	}

	code
}
