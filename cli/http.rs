use anyhow::Result;
use diabetes_core::Transport;
use futures::{future::LocalBoxFuture, FutureExt};
use std::time::Duration;
use url::Url;

/// A [`Transport`] backed by a `reqwest` client. Every request is aborted once `timeout` elapses.
pub struct HttpTransport {
	client: reqwest::Client,
}

impl HttpTransport {
	pub fn new(timeout: Duration) -> Result<HttpTransport> {
		let client = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(HttpTransport { client })
	}
}

impl Transport for HttpTransport {
	fn post_json<'a>(&'a self, url: &'a Url, body: String) -> LocalBoxFuture<'a, Result<String>> {
		async move {
			let response = self
				.client
				.post(url.clone())
				.header(reqwest::header::CONTENT_TYPE, "application/json")
				.body(body)
				.send()
				.await?;
			log::debug!("{} {}", url, response.status());
			let text = response.text().await?;
			Ok::<_, anyhow::Error>(text)
		}
		.boxed_local()
	}

	fn get<'a>(&'a self, url: &'a Url) -> LocalBoxFuture<'a, Result<String>> {
		async move {
			let response = self.client.get(url.clone()).send().await?;
			log::debug!("{} {}", url, response.status());
			let text = response.text().await?;
			Ok::<_, anyhow::Error>(text)
		}
		.boxed_local()
	}
}
