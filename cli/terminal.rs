use anyhow::Result;
use colored::Colorize;
use diabetes_core::{DisplaySink, DisplayState};
use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Format {
	/// The label, painted with the display state's colors when `colorize` is set.
	Text { colorize: bool },
	/// The display state as a single line of json.
	Json,
}

/// Prints each display state to a writer, one per line.
pub struct Terminal<W> {
	format: Format,
	writer: W,
}

impl<W> Terminal<W>
where
	W: Write,
{
	pub fn new(format: Format, writer: W) -> Terminal<W> {
		Terminal { format, writer }
	}

	pub fn into_inner(self) -> W {
		self.writer
	}
}

impl<W> DisplaySink for Terminal<W>
where
	W: Write,
{
	fn render(&mut self, state: &DisplayState) -> Result<()> {
		match self.format {
			Format::Text { colorize: true } => {
				let label = format!(" {} ", state.label)
					.truecolor(state.color.r, state.color.g, state.color.b)
					.on_truecolor(state.background.r, state.background.g, state.background.b)
					.bold();
				writeln!(self.writer, "{}", label)?;
			}
			Format::Text { colorize: false } => {
				writeln!(self.writer, "{}", state.label)?;
			}
			Format::Json => {
				let json = serde_json::to_string(state)?;
				writeln!(self.writer, "{}", json)?;
			}
		}
		self.writer.flush()?;
		Ok(())
	}
}

#[cfg(test)]
use diabetes_core::Risk;

#[test]
fn test_text_output() {
	let mut terminal = Terminal::new(Format::Text { colorize: false }, Vec::new());
	terminal
		.render(&DisplayState::for_risk(Risk::High))
		.unwrap();
	terminal.render(&DisplayState::for_risk(Risk::Low)).unwrap();
	let output = String::from_utf8(terminal.into_inner()).unwrap();
	assert_eq!(output, "⚠️ High Diabetes Risk\n✅ Low Diabetes Risk\n");
}

#[test]
fn test_json_output() {
	let mut terminal = Terminal::new(Format::Json, Vec::new());
	terminal
		.render(&DisplayState::for_risk(Risk::High))
		.unwrap();
	let output = String::from_utf8(terminal.into_inner()).unwrap();
	assert_eq!(
		output,
		"{\"risk\":\"high\",\"label\":\"⚠️ High Diabetes Risk\",\"background\":\"#ffe0e0\",\"color\":\"#c62828\"}\n"
	);
}
