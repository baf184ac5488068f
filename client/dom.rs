use crate::error::ClientError;
use anyhow::Result;
use diabetes_core::{DisplaySink, DisplayState, Field, FieldReader};
use wasm_bindgen::JsCast;

pub const OUTPUT_ELEMENT_ID: &str = "result";

pub fn document() -> Result<web_sys::Document, ClientError> {
	let window = web_sys::window().ok_or(ClientError::NoWindow)?;
	window.document().ok_or(ClientError::NoDocument)
}

/// Reads field values from the form controls whose ids are the field identifiers.
pub struct DocumentForm<'a> {
	document: &'a web_sys::Document,
}

impl<'a> DocumentForm<'a> {
	pub fn new(document: &'a web_sys::Document) -> DocumentForm<'a> {
		DocumentForm { document }
	}
}

impl<'a> FieldReader for DocumentForm<'a> {
	fn read(&self, field: Field) -> Option<String> {
		let element = self.document.get_element_by_id(field.id())?;
		if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
			Some(input.value())
		} else if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
			Some(select.value())
		} else {
			element
				.dyn_ref::<web_sys::HtmlTextAreaElement>()
				.map(|text_area| text_area.value())
		}
	}
}

/// Writes the display state into the text and style of the output element.
pub struct OutputElement<'a> {
	document: &'a web_sys::Document,
	id: &'a str,
}

impl<'a> OutputElement<'a> {
	pub fn new(document: &'a web_sys::Document, id: &'a str) -> OutputElement<'a> {
		OutputElement { document, id }
	}

	pub fn element(&self) -> Result<web_sys::HtmlElement, ClientError> {
		self.document
			.get_element_by_id(self.id)
			.ok_or_else(|| ClientError::ElementNotFound {
				id: self.id.to_owned(),
			})?
			.dyn_into::<web_sys::HtmlElement>()
			.map_err(|_| ClientError::NotHtmlElement {
				id: self.id.to_owned(),
			})
	}

	/// The api base url set with a `data-api-url` attribute, if any.
	pub fn api_url(&self) -> Option<String> {
		self.element().ok()?.dataset().get("apiUrl")
	}
}

impl<'a> DisplaySink for OutputElement<'a> {
	fn render(&mut self, state: &DisplayState) -> Result<()> {
		let element = self.element()?;
		element.set_text_content(Some(state.label));
		let style = element.style();
		style
			.set_property("background-color", &state.background.to_string())
			.map_err(ClientError::from)?;
		style
			.set_property("color", &state.color.to_string())
			.map_err(ClientError::from)?;
		Ok(())
	}
}
