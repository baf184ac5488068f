/*!
This crate binds the diabetes risk client to a web page. Call `predict()` from the page, for example from a button's click handler, to read the form, request a prediction and update the `#result` element.
*/

use self::{
	dom::{DocumentForm, OutputElement, OUTPUT_ELEMENT_ID},
	error::to_js_value,
	fetch::FetchTransport,
};
use anyhow::Result;
use diabetes_core::{Endpoint, PredictionClient};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::prelude::*;

mod console;
mod dom;
mod error;
mod fetch;

pub use self::error::ClientError;

thread_local! {
	static CLIENT: RefCell<Option<Rc<PredictionClient<FetchTransport>>>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() {
	console_error_panic_hook::set_once();
	let level = if cfg!(debug_assertions) {
		log::LevelFilter::Debug
	} else {
		log::LevelFilter::Info
	};
	console::init(level);
}

/// Read the form, send it to the prediction service, and show the risk label in the output element. The returned promise rejects if the request fails, the response is not json, or the output element is missing.
#[wasm_bindgen]
pub async fn predict() -> Result<(), JsValue> {
	submit().await.map_err(to_js_value)
}

/// Resolve to the prediction service's health document.
#[wasm_bindgen]
pub async fn health() -> Result<JsValue, JsValue> {
	let status = async {
		let document = dom::document()?;
		let client = client(&document)?;
		let status = client.health().await?;
		let status = serde_json::to_string(&status)?;
		Ok::<_, anyhow::Error>(status)
	}
	.await
	.map_err(to_js_value)?;
	js_sys::JSON::parse(&status)
}

async fn submit() -> Result<()> {
	let document = dom::document()?;
	let client = client(&document)?;
	let form = DocumentForm::new(&document);
	let mut output = OutputElement::new(&document, OUTPUT_ELEMENT_ID);
	client.submit_and_display(&form, &mut output).await?;
	Ok(())
}

/// The client is created on first use and shared by every later call, so a slow response cannot overwrite the result of a newer one.
fn client(document: &web_sys::Document) -> Result<Rc<PredictionClient<FetchTransport>>> {
	CLIENT.with(|cell| {
		if let Some(client) = cell.borrow().as_ref() {
			return Ok(client.clone());
		}
		let endpoint = match OutputElement::new(document, OUTPUT_ELEMENT_ID).api_url() {
			Some(api_url) => Endpoint::parse(&api_url)?,
			None => Endpoint::default(),
		};
		log::debug!("using prediction service at {}", endpoint.base_url());
		let client = Rc::new(PredictionClient::new(endpoint, FetchTransport));
		cell.replace(Some(client.clone()));
		Ok(client)
	})
}
