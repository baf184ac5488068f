use crate::display::Risk;
use serde_json::Value;

/// The response of the prediction service. Only `prediction` decides the outcome. The reference service answers with an `error` instead of a prediction when its model is not loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredictionResult {
	/// `null` when the body is not an object or has no `prediction` key.
	pub prediction: Value,
	/// The `error` message, when it is a string. It is only logged.
	pub error: Option<String>,
}

impl PredictionResult {
	/// Parse a response body. Any valid json is accepted and a later duplicate key replaces an earlier one.
	pub fn from_json(body: &str) -> serde_json::Result<PredictionResult> {
		let value: Value = serde_json::from_str(body)?;
		let prediction = value.get("prediction").cloned().unwrap_or(Value::Null);
		let error = value
			.get("error")
			.and_then(Value::as_str)
			.map(ToOwned::to_owned);
		Ok(PredictionResult { prediction, error })
	}

	/// A prediction is positive only when it is the JSON number 1. Strings, booleans and missing values are negative.
	pub fn is_positive(&self) -> bool {
		match &self.prediction {
			Value::Number(number) => {
				if let Some(value) = number.as_i64() {
					value == 1
				} else {
					number.as_f64() == Some(1.0)
				}
			}
			_ => false,
		}
	}

	pub fn risk(&self) -> Risk {
		if self.is_positive() {
			Risk::High
		} else {
			Risk::Low
		}
	}
}

#[test]
fn test_risk() {
	let cases = [
		(r#"{"prediction":1}"#, Risk::High),
		(r#"{"prediction":1.0}"#, Risk::High),
		(r#"{"prediction":0}"#, Risk::Low),
		(r#"{"prediction":2}"#, Risk::Low),
		(r#"{"prediction":-1}"#, Risk::Low),
		(r#"{"prediction":"1"}"#, Risk::Low),
		(r#"{"prediction":true}"#, Risk::Low),
		(r#"{"prediction":null}"#, Risk::Low),
		(r#"{}"#, Risk::Low),
		(r#"{"prediction":1,"probability":0.93}"#, Risk::High),
		(r#"{"prediction":0,"prediction":1}"#, Risk::High),
		(r#"{"prediction":1,"prediction":0}"#, Risk::Low),
		("[1]", Risk::Low),
		("1", Risk::Low),
		("\"1\"", Risk::Low),
		("null", Risk::Low),
	];
	for (body, risk) in cases.iter() {
		let result = PredictionResult::from_json(body).unwrap();
		assert_eq!(result.risk(), *risk, "{}", body);
	}
}

#[test]
fn test_error_field() {
	let result =
		PredictionResult::from_json(r#"{"error":"Model not loaded (train container not run yet)"}"#)
			.unwrap();
	assert_eq!(result.risk(), Risk::Low);
	assert_eq!(
		result.error.as_deref(),
		Some("Model not loaded (train container not run yet)")
	);
	let result = PredictionResult::from_json(r#"{"prediction":1,"error":{"code":3}}"#).unwrap();
	assert_eq!(result.risk(), Risk::High);
	assert_eq!(result.error, None);
}

#[test]
fn test_invalid_json() {
	assert!(PredictionResult::from_json("Internal Server Error").is_err());
	assert!(PredictionResult::from_json("{\"prediction\":1").is_err());
	assert!(PredictionResult::from_json("").is_err());
}
