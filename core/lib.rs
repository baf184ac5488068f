/*!
This crate contains the request, response and display logic of the diabetes risk client. It knows nothing about the environment it runs in: field values come from a [`FieldReader`], requests go out through a [`Transport`], and the outcome is written to a [`DisplaySink`].
*/

#![allow(clippy::tabs_in_doc_comments)]

mod display;
mod endpoint;
mod fields;
mod health;
mod parse;
mod payload;
mod prediction;
mod submit;

pub use self::{
	display::{Color, DisplaySink, DisplayState, Risk},
	endpoint::{Endpoint, DEFAULT_BASE_URL},
	fields::{Field, FieldReader},
	health::HealthStatus,
	parse::{coerce_field_value, parse_float},
	payload::RequestPayload,
	prediction::PredictionResult,
	submit::{Outcome, PredictionClient, Transport},
};
