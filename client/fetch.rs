use crate::error::ClientError;
use anyhow::Result;
use diabetes_core::Transport;
use futures::{future::LocalBoxFuture, FutureExt};
use url::Url;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// A [`Transport`] backed by the window's `fetch`.
pub struct FetchTransport;

impl Transport for FetchTransport {
	fn post_json<'a>(&'a self, url: &'a Url, body: String) -> LocalBoxFuture<'a, Result<String>> {
		async move {
			let init = web_sys::RequestInit::new();
			init.set_method("POST");
			init.set_body(&JsValue::from_str(&body));
			let request = web_sys::Request::new_with_str_and_init(url.as_str(), &init)
				.map_err(ClientError::from)?;
			request
				.headers()
				.set("Content-Type", "application/json")
				.map_err(ClientError::from)?;
			let text = fetch_text(&request).await?;
			Ok::<_, anyhow::Error>(text)
		}
		.boxed_local()
	}

	fn get<'a>(&'a self, url: &'a Url) -> LocalBoxFuture<'a, Result<String>> {
		async move {
			let request =
				web_sys::Request::new_with_str(url.as_str()).map_err(ClientError::from)?;
			let text = fetch_text(&request).await?;
			Ok::<_, anyhow::Error>(text)
		}
		.boxed_local()
	}
}

async fn fetch_text(request: &web_sys::Request) -> Result<String, ClientError> {
	let window = web_sys::window().ok_or(ClientError::NoWindow)?;
	let response = JsFuture::from(window.fetch_with_request(request)).await?;
	let response = response.dyn_into::<web_sys::Response>()?;
	let text = JsFuture::from(response.text()?).await?;
	Ok(text.as_string().unwrap_or_default())
}
