use anyhow::{format_err, Result};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// The location of the prediction service.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
	base_url: Url,
}

impl Endpoint {
	pub fn new(base_url: Url) -> Result<Endpoint> {
		if base_url.cannot_be_a_base() {
			return Err(format_err!("{} cannot be used as a base url", base_url));
		}
		Ok(Endpoint { base_url })
	}

	pub fn parse(base_url: &str) -> Result<Endpoint> {
		let base_url = Url::parse(base_url)
			.map_err(|error| format_err!("invalid url \"{}\": {}", base_url, error))?;
		Endpoint::new(base_url)
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	pub fn predict_url(&self) -> Url {
		self.join("predict")
	}

	pub fn health_url(&self) -> Url {
		self.join("health")
	}

	fn join(&self, segment: &str) -> Url {
		let mut url = self.base_url.clone();
		if let Ok(mut segments) = url.path_segments_mut() {
			segments.pop_if_empty().push(segment);
		}
		url
	}
}

impl Default for Endpoint {
	fn default() -> Endpoint {
		Endpoint {
			base_url: Url::parse(DEFAULT_BASE_URL).unwrap(),
		}
	}
}

#[test]
fn test_default_endpoint() {
	let endpoint = Endpoint::default();
	assert_eq!(
		endpoint.predict_url().as_str(),
		"http://localhost:8000/predict"
	);
	assert_eq!(endpoint.health_url().as_str(), "http://localhost:8000/health");
}

#[test]
fn test_endpoint_with_path() {
	let endpoint = Endpoint::parse("https://example.com/api/").unwrap();
	assert_eq!(
		endpoint.predict_url().as_str(),
		"https://example.com/api/predict"
	);
	let endpoint = Endpoint::parse("https://example.com/api").unwrap();
	assert_eq!(
		endpoint.predict_url().as_str(),
		"https://example.com/api/predict"
	);
}

#[test]
fn test_invalid_endpoint() {
	assert!(Endpoint::parse("localhost:8000").is_err());
	assert!(Endpoint::parse("not a url").is_err());
	assert!(Endpoint::parse("mailto:someone@example.com").is_err());
}
