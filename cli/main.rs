//! This module contains the main entrypoint to the diabetes cli.

use self::{
	http::HttpTransport,
	terminal::{Format, Terminal},
};
use anyhow::{format_err, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use diabetes_core::{
	coerce_field_value, parse_float, Endpoint, Field, FieldReader, PredictionClient,
};
use std::time::Duration;

mod http;
mod terminal;

#[derive(Parser, Debug)]
#[clap(about = "Check diabetes risk with a prediction service.")]
struct Options {
	#[clap(
		long,
		env = "DIABETES_API_URL",
		default_value = "http://localhost:8000",
		global = true,
		help = "the base url of the prediction service"
	)]
	url: String,
	#[clap(
		long,
		env = "DIABETES_API_TIMEOUT",
		default_value = "30",
		global = true,
		help = "the request timeout in seconds"
	)]
	timeout: u64,
	#[clap(
		short,
		long,
		parse(from_occurrences),
		global = true,
		help = "log more, repeat for even more"
	)]
	verbose: u64,
	#[clap(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	#[clap(about = "request a prediction and print the risk label")]
	Predict(PredictOptions),
	#[clap(about = "check that the prediction service is ready")]
	Health,
}

#[derive(Args, Debug)]
struct PredictOptions {
	#[clap(long, allow_hyphen_values = true)]
	pregnancies: Option<String>,
	#[clap(long, allow_hyphen_values = true)]
	glucose: Option<String>,
	#[clap(long, allow_hyphen_values = true)]
	blood_pressure: Option<String>,
	#[clap(long, allow_hyphen_values = true)]
	skin_thickness: Option<String>,
	#[clap(long, allow_hyphen_values = true)]
	insulin: Option<String>,
	#[clap(long, allow_hyphen_values = true)]
	bmi: Option<String>,
	#[clap(long, allow_hyphen_values = true)]
	diabetes_pedigree_function: Option<String>,
	#[clap(long, allow_hyphen_values = true)]
	age: Option<String>,
	#[clap(long, help = "print the result as json")]
	json: bool,
	#[clap(long = "no-color", help = "do not color the label")]
	no_color: bool,
}

impl FieldReader for PredictOptions {
	fn read(&self, field: Field) -> Option<String> {
		let value = match field {
			Field::Pregnancies => &self.pregnancies,
			Field::Glucose => &self.glucose,
			Field::BloodPressure => &self.blood_pressure,
			Field::SkinThickness => &self.skin_thickness,
			Field::Insulin => &self.insulin,
			Field::Bmi => &self.bmi,
			Field::DiabetesPedigreeFunction => &self.diabetes_pedigree_function,
			Field::Age => &self.age,
		};
		value.clone()
	}
}

#[tokio::main]
async fn main() {
	let options = Options::parse();
	let default_filter = match options.verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
		.format_timestamp_millis()
		.init();
	if let Err(error) = run(options).await {
		eprintln!("{}: {:#}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

async fn run(options: Options) -> Result<()> {
	let endpoint = Endpoint::parse(&options.url)?;
	let transport = HttpTransport::new(Duration::from_secs(options.timeout))?;
	let client = PredictionClient::new(endpoint, transport);
	match options.command {
		Command::Predict(options) => cli_predict(&client, options).await,
		Command::Health => cli_health(&client).await,
	}
}

async fn cli_predict(
	client: &PredictionClient<HttpTransport>,
	options: PredictOptions,
) -> Result<()> {
	for message in coercion_warnings(&options) {
		log::warn!("{}", message);
	}
	let format = if options.json {
		Format::Json
	} else {
		Format::Text {
			colorize: !options.no_color,
		}
	};
	let mut terminal = Terminal::new(format, std::io::stdout());
	client.submit_and_display(&options, &mut terminal).await?;
	Ok(())
}

async fn cli_health(client: &PredictionClient<HttpTransport>) -> Result<()> {
	let status = client.health().await?;
	println!("status: {}", status.status);
	println!("model loaded: {}", status.model_loaded);
	println!("preprocessor loaded: {}", status.preprocessor_loaded);
	if !status.is_ready() {
		return Err(format_err!(
			"the prediction service at {} is not ready",
			client.endpoint().base_url()
		));
	}
	Ok(())
}

/// Describe every field that will be sent as 0 even though its text does not say 0.
fn coercion_warnings(reader: &dyn FieldReader) -> Vec<String> {
	Field::ALL
		.iter()
		.filter_map(|field| match reader.read(*field) {
			None => Some(format!("{} was not provided, sending 0", field)),
			Some(text)
				if coerce_field_value(Some(&text)) == 0.0 && parse_float(&text) != Some(0.0) =>
			{
				Some(format!("{} \"{}\" is not a finite number, sending 0", field, text))
			}
			Some(_) => None,
		})
		.collect()
}

#[cfg(test)]
const EXAMPLE_ARGS: &[&str] = &[
	"diabetes",
	"predict",
	"--pregnancies",
	"2",
	"--glucose",
	"150",
	"--blood-pressure",
	"80",
	"--skin-thickness",
	"30",
	"--insulin",
	"100",
	"--bmi",
	"28.5",
	"--diabetes-pedigree-function",
	"0.5",
	"--age",
	"45",
];

#[test]
fn test_parse_predict_options() {
	let options = Options::try_parse_from(EXAMPLE_ARGS).unwrap();
	assert_eq!(options.url, "http://localhost:8000");
	assert_eq!(options.timeout, 30);
	let options = match options.command {
		Command::Predict(options) => options,
		Command::Health => panic!("expected the predict command"),
	};
	let payload = diabetes_core::RequestPayload::read(&options);
	let body = payload.to_json().unwrap();
	assert_eq!(
		body,
		r#"{"Pregnancies":2,"Glucose":150,"BloodPressure":80,"SkinThickness":30,"Insulin":100,"BMI":28.5,"DiabetesPedigreeFunction":0.5,"Age":45}"#
	);
	assert!(coercion_warnings(&options).is_empty());
}

#[test]
fn test_parse_global_options() {
	let options = Options::try_parse_from(&[
		"diabetes",
		"health",
		"--url",
		"http://127.0.0.1:9000",
		"--timeout",
		"5",
		"-vv",
	])
	.unwrap();
	assert_eq!(options.url, "http://127.0.0.1:9000");
	assert_eq!(options.timeout, 5);
	assert_eq!(options.verbose, 2);
	assert!(matches!(options.command, Command::Health));
}

#[test]
fn test_coercion_warnings() {
	let options = Options::try_parse_from(&[
		"diabetes",
		"predict",
		"--glucose",
		"high",
		"--insulin",
		"Infinity",
		"--skin-thickness",
		"0",
		"--bmi",
		"-1",
		"--age",
		"45 years",
	])
	.unwrap();
	let options = match options.command {
		Command::Predict(options) => options,
		Command::Health => panic!("expected the predict command"),
	};
	let warnings = coercion_warnings(&options);
	assert_eq!(
		warnings,
		vec![
			"Pregnancies was not provided, sending 0",
			"Glucose \"high\" is not a finite number, sending 0",
			"BloodPressure was not provided, sending 0",
			"Insulin \"Infinity\" is not a finite number, sending 0",
			"DiabetesPedigreeFunction was not provided, sending 0",
		]
	);
	let payload = diabetes_core::RequestPayload::read(&options);
	assert_eq!(payload.bmi, -1.0);
	assert_eq!(payload.age, 45.0);
	assert_eq!(payload.glucose, 0.0);
	assert_eq!(payload.insulin, 0.0);
}
