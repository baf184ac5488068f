use crate::{
	display::{DisplaySink, DisplayState},
	endpoint::Endpoint,
	fields::FieldReader,
	health::HealthStatus,
	payload::RequestPayload,
	prediction::PredictionResult,
};
use anyhow::{format_err, Result};
use futures::future::LocalBoxFuture;
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

/// The HTTP client used to reach the prediction service. The futures are not required to be `Send`, so implementations can be backed by the browser's `fetch`.
pub trait Transport {
	/// Send `body` to `url` in a POST request with the header `Content-Type: application/json` and resolve to the response body. The status code is not inspected.
	fn post_json<'a>(&'a self, url: &'a Url, body: String) -> LocalBoxFuture<'a, Result<String>>;

	/// Send a GET request to `url` and resolve to the response body.
	fn get<'a>(&'a self, url: &'a Url) -> LocalBoxFuture<'a, Result<String>>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
	/// The display state was written to the sink.
	Rendered(DisplayState),
	/// A submission issued after this one had already rendered, so its display state was dropped.
	Superseded(DisplayState),
}

pub struct PredictionClient<T> {
	endpoint: Endpoint,
	transport: T,
	/// The number of submissions issued so far. Each submission takes the next value as its ticket.
	issued: AtomicU64,
	/// The highest ticket that has rendered. A response only renders if its ticket is higher. Failed submissions never advance it.
	rendered: AtomicU64,
}

impl<T> PredictionClient<T>
where
	T: Transport,
{
	pub fn new(endpoint: Endpoint, transport: T) -> PredictionClient<T> {
		PredictionClient {
			endpoint,
			transport,
			issued: AtomicU64::new(0),
			rendered: AtomicU64::new(0),
		}
	}

	pub fn endpoint(&self) -> &Endpoint {
		&self.endpoint
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Send `payload` to the prediction service and parse its response.
	pub async fn predict(&self, payload: &RequestPayload) -> Result<PredictionResult> {
		let url = self.endpoint.predict_url();
		let body = payload.to_json()?;
		log::debug!("POST {} {}", url, body);
		let response = self.transport.post_json(&url, body).await?;
		let result = PredictionResult::from_json(&response)
			.map_err(|error| format_err!("failed to parse the prediction response: {}", error))?;
		if let Some(error) = result.error.as_ref() {
			log::warn!("the prediction service reported an error: {}", error);
		}
		Ok(result)
	}

	/// Read the form, request a prediction and write the resulting display state to `sink`. Any failure leaves the sink untouched.
	pub async fn submit_and_display<R, S>(&self, reader: &R, sink: &mut S) -> Result<Outcome>
	where
		R: FieldReader + ?Sized,
		S: DisplaySink + ?Sized,
	{
		let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
		let payload = RequestPayload::read(reader);
		let result = self.predict(&payload).await?;
		let state = DisplayState::for_risk(result.risk());
		if self.rendered.fetch_max(ticket, Ordering::SeqCst) > ticket {
			log::debug!("dropping the response to submission {}", ticket);
			return Ok(Outcome::Superseded(state));
		}
		log::info!("{:?} diabetes risk", state.risk);
		sink.render(&state)?;
		Ok(Outcome::Rendered(state))
	}

	/// Query the prediction service's health check.
	pub async fn health(&self) -> Result<HealthStatus> {
		let url = self.endpoint.health_url();
		log::debug!("GET {}", url);
		let response = self.transport.get(&url).await?;
		let status = HealthStatus::from_json(&response)
			.map_err(|error| format_err!("failed to parse the health response: {}", error))?;
		Ok(status)
	}
}

#[cfg(test)]
use {
	crate::{display::Risk, fields::Field},
	futures::{channel::oneshot, executor::block_on, FutureExt},
	std::cell::RefCell,
};

/// Answers every request with the same body and records what was sent.
#[cfg(test)]
struct StaticTransport {
	response: std::result::Result<String, String>,
	requests: RefCell<Vec<(String, String)>>,
}

#[cfg(test)]
impl StaticTransport {
	fn ok(body: &str) -> StaticTransport {
		StaticTransport {
			response: Ok(body.to_owned()),
			requests: RefCell::new(Vec::new()),
		}
	}

	fn err(message: &str) -> StaticTransport {
		StaticTransport {
			response: Err(message.to_owned()),
			requests: RefCell::new(Vec::new()),
		}
	}

	fn respond(&self, url: &Url, body: String) -> LocalBoxFuture<Result<String>> {
		self.requests.borrow_mut().push((url.to_string(), body));
		let response = self
			.response
			.clone()
			.map_err(|message| format_err!("{}", message));
		futures::future::ready(response).boxed_local()
	}
}

#[cfg(test)]
impl Transport for StaticTransport {
	fn post_json<'a>(&'a self, url: &'a Url, body: String) -> LocalBoxFuture<'a, Result<String>> {
		self.respond(url, body)
	}

	fn get<'a>(&'a self, url: &'a Url) -> LocalBoxFuture<'a, Result<String>> {
		self.respond(url, String::new())
	}
}

/// Holds every request open until the test answers it through the stored sender.
#[cfg(test)]
#[derive(Default)]
struct ChannelTransport {
	senders: RefCell<Vec<oneshot::Sender<String>>>,
}

#[cfg(test)]
impl Transport for ChannelTransport {
	fn post_json<'a>(&'a self, _url: &'a Url, _body: String) -> LocalBoxFuture<'a, Result<String>> {
		let (sender, receiver) = oneshot::channel();
		self.senders.borrow_mut().push(sender);
		async move {
			receiver
				.await
				.map_err(|_| format_err!("the request was canceled"))
		}
		.boxed_local()
	}

	fn get<'a>(&'a self, url: &'a Url) -> LocalBoxFuture<'a, Result<String>> {
		self.post_json(url, String::new())
	}
}

#[cfg(test)]
#[derive(Default)]
struct RecordingSink {
	states: Vec<DisplayState>,
}

#[cfg(test)]
impl DisplaySink for RecordingSink {
	fn render(&mut self, state: &DisplayState) -> Result<()> {
		self.states.push(state.clone());
		Ok(())
	}
}

#[cfg(test)]
struct MissingSink;

#[cfg(test)]
impl DisplaySink for MissingSink {
	fn render(&mut self, _state: &DisplayState) -> Result<()> {
		Err(format_err!("output element not found"))
	}
}

#[cfg(test)]
fn example_form(field: Field) -> Option<String> {
	let value = match field {
		Field::Pregnancies => "2",
		Field::Glucose => "150",
		Field::BloodPressure => "80",
		Field::SkinThickness => "30",
		Field::Insulin => "100",
		Field::Bmi => "28.5",
		Field::DiabetesPedigreeFunction => "0.5",
		Field::Age => "45",
	};
	Some(value.to_owned())
}

#[test]
fn test_submit_high_risk() {
	let client = PredictionClient::new(
		Endpoint::default(),
		StaticTransport::ok(r#"{"prediction":1}"#),
	);
	let mut sink = RecordingSink::default();
	let outcome = block_on(client.submit_and_display(&example_form, &mut sink)).unwrap();
	let expected = DisplayState::for_risk(Risk::High);
	assert_eq!(outcome, Outcome::Rendered(expected.clone()));
	assert_eq!(sink.states, vec![expected]);
	let requests = client.transport().requests.borrow();
	assert_eq!(requests.len(), 1);
	let (url, body) = &requests[0];
	assert_eq!(url, "http://localhost:8000/predict");
	insta::assert_snapshot!(body.as_str(), @r###"{"Pregnancies":2,"Glucose":150,"BloodPressure":80,"SkinThickness":30,"Insulin":100,"BMI":28.5,"DiabetesPedigreeFunction":0.5,"Age":45}"###);
}

#[test]
fn test_submit_low_risk() {
	let bodies = [
		r#"{"prediction":0}"#,
		r#"{"prediction":"1"}"#,
		r#"{"error":"Model not loaded"}"#,
	];
	for body in bodies.iter() {
		let client = PredictionClient::new(Endpoint::default(), StaticTransport::ok(body));
		let mut sink = RecordingSink::default();
		let outcome = block_on(client.submit_and_display(&example_form, &mut sink)).unwrap();
		let expected = DisplayState::for_risk(Risk::Low);
		assert_eq!(outcome, Outcome::Rendered(expected.clone()), "{}", body);
		assert_eq!(sink.states, vec![expected]);
	}
}

#[test]
fn test_submit_failures_leave_display_untouched() {
	let client = PredictionClient::new(
		Endpoint::default(),
		StaticTransport::err("connection refused"),
	);
	let mut sink = RecordingSink::default();
	let error = block_on(client.submit_and_display(&example_form, &mut sink)).unwrap_err();
	assert_eq!(error.to_string(), "connection refused");
	assert!(sink.states.is_empty());

	let client = PredictionClient::new(
		Endpoint::default(),
		StaticTransport::ok("<h1>Bad Gateway</h1>"),
	);
	let result = block_on(client.submit_and_display(&example_form, &mut sink));
	assert!(result.is_err());
	assert!(sink.states.is_empty());

	let client = PredictionClient::new(
		Endpoint::default(),
		StaticTransport::ok(r#"{"prediction":1}"#),
	);
	let result = block_on(client.submit_and_display(&example_form, &mut MissingSink));
	assert!(result.is_err());
	assert_eq!(client.transport().requests.borrow().len(), 1);
}

#[test]
fn test_superseded_submission_is_not_rendered() {
	let client = PredictionClient::new(Endpoint::default(), ChannelTransport::default());
	let mut first_sink = RecordingSink::default();
	let mut second_sink = RecordingSink::default();
	block_on(async {
		let mut first = client
			.submit_and_display(&example_form, &mut first_sink)
			.boxed_local();
		assert!(futures::poll!(first.as_mut()).is_pending());
		let second = client.submit_and_display(&example_form, &mut second_sink);
		let mut second = second.boxed_local();
		assert!(futures::poll!(second.as_mut()).is_pending());
		let mut senders = client
			.transport()
			.senders
			.borrow_mut()
			.drain(..)
			.collect::<Vec<_>>();
		assert_eq!(senders.len(), 2);
		senders
			.remove(1)
			.send(r#"{"prediction":0}"#.to_owned())
			.unwrap();
		let second = second.await.unwrap();
		assert_eq!(second, Outcome::Rendered(DisplayState::for_risk(Risk::Low)));
		senders
			.remove(0)
			.send(r#"{"prediction":1}"#.to_owned())
			.unwrap();
		let first = first.await.unwrap();
		assert_eq!(
			first,
			Outcome::Superseded(DisplayState::for_risk(Risk::High))
		);
	});
	assert!(first_sink.states.is_empty());
	assert_eq!(second_sink.states.len(), 1);
}

#[test]
fn test_failed_submission_does_not_supersede() {
	let client = PredictionClient::new(Endpoint::default(), ChannelTransport::default());
	let mut first_sink = RecordingSink::default();
	let mut second_sink = RecordingSink::default();
	block_on(async {
		let mut first = client
			.submit_and_display(&example_form, &mut first_sink)
			.boxed_local();
		assert!(futures::poll!(first.as_mut()).is_pending());
		let mut second = client
			.submit_and_display(&example_form, &mut second_sink)
			.boxed_local();
		assert!(futures::poll!(second.as_mut()).is_pending());
		let mut senders = client
			.transport()
			.senders
			.borrow_mut()
			.drain(..)
			.collect::<Vec<_>>();
		drop(senders.remove(1));
		assert!(second.await.is_err());
		senders
			.remove(0)
			.send(r#"{"prediction":1}"#.to_owned())
			.unwrap();
		let first = first.await.unwrap();
		assert_eq!(first, Outcome::Rendered(DisplayState::for_risk(Risk::High)));
	});
	assert_eq!(first_sink.states, vec![DisplayState::for_risk(Risk::High)]);
	assert!(second_sink.states.is_empty());
}

#[test]
fn test_health() {
	let client = PredictionClient::new(
		Endpoint::parse("http://127.0.0.1:9000").unwrap(),
		StaticTransport::ok(r#"{"status":"ok","model_loaded":true,"preprocessor_loaded":false}"#),
	);
	let status = block_on(client.health()).unwrap();
	assert_eq!(
		status,
		HealthStatus {
			status: "ok".to_owned(),
			model_loaded: true,
			preprocessor_loaded: false,
		}
	);
	assert_eq!(
		client.transport().requests.borrow()[0].0,
		"http://127.0.0.1:9000/health"
	);
}
