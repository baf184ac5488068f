use derive_more::{Display, Error};
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Display, Error, PartialEq)]
pub enum ClientError {
	#[display(fmt = "there is no global window")]
	NoWindow,
	#[display(fmt = "the window has no document")]
	NoDocument,
	#[display(fmt = "no element with id \"{}\"", id)]
	ElementNotFound { id: String },
	#[display(fmt = "the element with id \"{}\" is not an html element", id)]
	NotHtmlElement { id: String },
	#[display(fmt = "{}", message)]
	Js { message: String },
}

impl From<JsValue> for ClientError {
	fn from(value: JsValue) -> ClientError {
		let message = value
			.as_string()
			.or_else(|| {
				value
					.dyn_ref::<js_sys::Error>()
					.map(|error| String::from(error.message()))
			})
			.unwrap_or_else(|| format!("{:?}", value));
		ClientError::Js { message }
	}
}

/// Convert an error into the value a rejected promise carries.
pub fn to_js_value(error: anyhow::Error) -> JsValue {
	js_sys::Error::new(&format!("{:#}", error)).into()
}

#[test]
fn test_display() {
	assert_eq!(
		ClientError::ElementNotFound {
			id: "result".to_owned()
		}
		.to_string(),
		"no element with id \"result\""
	);
	assert_eq!(
		ClientError::Js {
			message: "Failed to fetch".to_owned()
		}
		.to_string(),
		"Failed to fetch"
	);
}
