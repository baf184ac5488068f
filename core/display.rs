use anyhow::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Risk {
	High,
	Low,
}

/// An sRGB color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
		Color { r, g, b }
	}
}

impl std::fmt::Display for Color {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

impl serde::Serialize for Color {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_str(self)
	}
}

const HIGH_RISK_LABEL: &str = "⚠️ High Diabetes Risk";
const HIGH_RISK_BACKGROUND: Color = Color::rgb(0xff, 0xe0, 0xe0);
const HIGH_RISK_COLOR: Color = Color::rgb(0xc6, 0x28, 0x28);
const LOW_RISK_LABEL: &str = "✅ Low Diabetes Risk";
const LOW_RISK_BACKGROUND: Color = Color::rgb(0xe0, 0xff, 0xe3);
const LOW_RISK_COLOR: Color = Color::rgb(0x2e, 0x7d, 0x32);

/// What the output element shows after a prediction.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DisplayState {
	pub risk: Risk,
	pub label: &'static str,
	pub background: Color,
	pub color: Color,
}

impl DisplayState {
	pub fn for_risk(risk: Risk) -> DisplayState {
		match risk {
			Risk::High => DisplayState {
				risk,
				label: HIGH_RISK_LABEL,
				background: HIGH_RISK_BACKGROUND,
				color: HIGH_RISK_COLOR,
			},
			Risk::Low => DisplayState {
				risk,
				label: LOW_RISK_LABEL,
				background: LOW_RISK_BACKGROUND,
				color: LOW_RISK_COLOR,
			},
		}
	}
}

/// Where a [`DisplayState`] is written. Each call replaces whatever was shown before.
pub trait DisplaySink {
	fn render(&mut self, state: &DisplayState) -> Result<()>;
}

impl<S> DisplaySink for &mut S
where
	S: DisplaySink + ?Sized,
{
	fn render(&mut self, state: &DisplayState) -> Result<()> {
		(**self).render(state)
	}
}

#[test]
fn test_high_risk_state() {
	let state = DisplayState::for_risk(Risk::High);
	assert_eq!(state.label, "⚠️ High Diabetes Risk");
	assert_eq!(state.background.to_string(), "#ffe0e0");
	assert_eq!(state.color.to_string(), "#c62828");
}

#[test]
fn test_low_risk_state() {
	let state = DisplayState::for_risk(Risk::Low);
	assert_eq!(state.label, "✅ Low Diabetes Risk");
	assert_eq!(state.background.to_string(), "#e0ffe3");
	assert_eq!(state.color.to_string(), "#2e7d32");
}

#[test]
fn test_serialize_state() {
	let state = DisplayState::for_risk(Risk::Low);
	let json = serde_json::to_string(&state).unwrap();
	insta::assert_snapshot!(json.as_str(), @r###"{"risk":"low","label":"✅ Low Diabetes Risk","background":"#e0ffe3","color":"#2e7d32"}"###);
}
