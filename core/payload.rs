use crate::{
	fields::{Field, FieldReader},
	parse::coerce_field_value,
};
use serde::{Serialize, Serializer};

/// The body of a prediction request. Every field is always present. Values are serialized the way a browser would serialize them, so integral values are written without a fractional part.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RequestPayload {
	#[serde(rename = "Pregnancies", serialize_with = "serialize_number")]
	pub pregnancies: f64,
	#[serde(rename = "Glucose", serialize_with = "serialize_number")]
	pub glucose: f64,
	#[serde(rename = "BloodPressure", serialize_with = "serialize_number")]
	pub blood_pressure: f64,
	#[serde(rename = "SkinThickness", serialize_with = "serialize_number")]
	pub skin_thickness: f64,
	#[serde(rename = "Insulin", serialize_with = "serialize_number")]
	pub insulin: f64,
	#[serde(rename = "BMI", serialize_with = "serialize_number")]
	pub bmi: f64,
	#[serde(
		rename = "DiabetesPedigreeFunction",
		serialize_with = "serialize_number"
	)]
	pub diabetes_pedigree_function: f64,
	#[serde(rename = "Age", serialize_with = "serialize_number")]
	pub age: f64,
}

impl RequestPayload {
	/// Read every field from `reader` and coerce it to a number.
	pub fn read<R>(reader: &R) -> RequestPayload
	where
		R: FieldReader + ?Sized,
	{
		let mut payload = RequestPayload::default();
		for field in Field::ALL.iter().copied() {
			let text = reader.read(field);
			*payload.get_mut(field) = coerce_field_value(text.as_deref());
		}
		payload
	}

	pub fn get(&self, field: Field) -> f64 {
		match field {
			Field::Pregnancies => self.pregnancies,
			Field::Glucose => self.glucose,
			Field::BloodPressure => self.blood_pressure,
			Field::SkinThickness => self.skin_thickness,
			Field::Insulin => self.insulin,
			Field::Bmi => self.bmi,
			Field::DiabetesPedigreeFunction => self.diabetes_pedigree_function,
			Field::Age => self.age,
		}
	}

	pub fn get_mut(&mut self, field: Field) -> &mut f64 {
		match field {
			Field::Pregnancies => &mut self.pregnancies,
			Field::Glucose => &mut self.glucose,
			Field::BloodPressure => &mut self.blood_pressure,
			Field::SkinThickness => &mut self.skin_thickness,
			Field::Insulin => &mut self.insulin,
			Field::Bmi => &mut self.bmi,
			Field::DiabetesPedigreeFunction => &mut self.diabetes_pedigree_function,
			Field::Age => &mut self.age,
		}
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}

/// Integers up to this magnitude are exactly representable in an f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let value = *value;
	if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
		serializer.serialize_i64(value as i64)
	} else {
		serializer.serialize_f64(value)
	}
}

#[cfg(test)]
fn reader_from(
	values: &'static [(&'static str, &'static str)],
) -> impl Fn(Field) -> Option<String> {
	move |field: Field| {
		values
			.iter()
			.find(|(id, _)| *id == field.id())
			.map(|(_, value)| (*value).to_owned())
	}
}

#[test]
fn test_read_valid_fields() {
	let reader = reader_from(&[
		("Pregnancies", "2"),
		("Glucose", "150"),
		("BloodPressure", "80"),
		("SkinThickness", "30"),
		("Insulin", "100"),
		("BMI", "28.5"),
		("DiabetesPedigreeFunction", "0.5"),
		("Age", "45"),
	]);
	let payload = RequestPayload::read(&reader);
	let expected = [2.0, 150.0, 80.0, 30.0, 100.0, 28.5, 0.5, 45.0];
	for (field, expected) in Field::ALL.iter().zip(expected.iter()) {
		assert_eq!(payload.get(*field), *expected, "{}", field);
	}
	let body = payload.to_json().unwrap();
	insta::assert_snapshot!(body.as_str(), @r###"{"Pregnancies":2,"Glucose":150,"BloodPressure":80,"SkinThickness":30,"Insulin":100,"BMI":28.5,"DiabetesPedigreeFunction":0.5,"Age":45}"###);
}

#[test]
fn test_read_invalid_and_missing_fields() {
	let reader = reader_from(&[
		("Pregnancies", ""),
		("Glucose", "abc"),
		("BloodPressure", "   "),
		("Insulin", "12abc"),
		("BMI", "NaN"),
	]);
	let payload = RequestPayload::read(&reader);
	assert_eq!(payload.pregnancies, 0.0);
	assert_eq!(payload.glucose, 0.0);
	assert_eq!(payload.blood_pressure, 0.0);
	assert_eq!(payload.skin_thickness, 0.0);
	assert_eq!(payload.insulin, 12.0);
	assert_eq!(payload.bmi, 0.0);
	assert_eq!(payload.diabetes_pedigree_function, 0.0);
	assert_eq!(payload.age, 0.0);
}

#[test]
fn test_every_key_present_once() {
	let payload = RequestPayload::read(&|_: Field| -> Option<String> { None });
	let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
	let object = value.as_object().unwrap();
	assert_eq!(object.len(), Field::ALL.len());
	for field in Field::ALL.iter() {
		assert_eq!(object[field.id()], serde_json::json!(0));
	}
}

#[test]
fn test_serialize_number() {
	let payload = RequestPayload {
		pregnancies: -1.0,
		glucose: 1e20,
		bmi: 0.1,
		..Default::default()
	};
	let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
	assert_eq!(value["Pregnancies"], serde_json::json!(-1));
	assert_eq!(value["Glucose"].as_f64(), Some(1e20));
	assert!(value["Glucose"].is_f64());
	assert_eq!(value["BMI"].as_f64(), Some(0.1));
}
