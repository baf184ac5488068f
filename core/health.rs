/// The body of the prediction service's health check.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct HealthStatus {
	pub status: String,
	#[serde(default)]
	pub model_loaded: bool,
	#[serde(default)]
	pub preprocessor_loaded: bool,
}

impl HealthStatus {
	pub fn from_json(body: &str) -> serde_json::Result<HealthStatus> {
		serde_json::from_str(body)
	}

	/// The service is ready to serve predictions only when both the model and its preprocessor are loaded.
	pub fn is_ready(&self) -> bool {
		self.status == "ok" && self.model_loaded && self.preprocessor_loaded
	}
}

#[test]
fn test_health_status() {
	let status = HealthStatus::from_json(
		r#"{"status":"ok","model_loaded":true,"preprocessor_loaded":true}"#,
	)
	.unwrap();
	assert!(status.is_ready());
	let status = HealthStatus::from_json(
		r#"{"status":"ok","model_loaded":false,"preprocessor_loaded":true}"#,
	)
	.unwrap();
	assert!(!status.is_ready());
	let status = HealthStatus::from_json(r#"{"status":"ok"}"#).unwrap();
	assert!(!status.model_loaded);
	assert!(!status.is_ready());
	assert!(HealthStatus::from_json(r#"{"model_loaded":true}"#).is_err());
}
