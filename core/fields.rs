/// One of the eight inputs the prediction service expects. The identifier returned by [`Field::id`] is both the id of the form element and the key in the request body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
	Pregnancies,
	Glucose,
	BloodPressure,
	SkinThickness,
	Insulin,
	Bmi,
	DiabetesPedigreeFunction,
	Age,
}

impl Field {
	/// All fields in the order they are read and serialized.
	pub const ALL: [Field; 8] = [
		Field::Pregnancies,
		Field::Glucose,
		Field::BloodPressure,
		Field::SkinThickness,
		Field::Insulin,
		Field::Bmi,
		Field::DiabetesPedigreeFunction,
		Field::Age,
	];

	pub fn id(self) -> &'static str {
		match self {
			Field::Pregnancies => "Pregnancies",
			Field::Glucose => "Glucose",
			Field::BloodPressure => "BloodPressure",
			Field::SkinThickness => "SkinThickness",
			Field::Insulin => "Insulin",
			Field::Bmi => "BMI",
			Field::DiabetesPedigreeFunction => "DiabetesPedigreeFunction",
			Field::Age => "Age",
		}
	}
}

impl std::fmt::Display for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str(self.id())
	}
}

/// A source of raw field text, such as a form in a document or a set of command line flags.
pub trait FieldReader {
	/// Return the current text of `field`, or `None` if the field does not exist.
	fn read(&self, field: Field) -> Option<String>;
}

impl<F> FieldReader for F
where
	F: Fn(Field) -> Option<String>,
{
	fn read(&self, field: Field) -> Option<String> {
		self(field)
	}
}

#[test]
fn test_field_ids() {
	let ids = Field::ALL.iter().map(|field| field.id()).collect::<Vec<_>>();
	assert_eq!(
		ids,
		vec![
			"Pregnancies",
			"Glucose",
			"BloodPressure",
			"SkinThickness",
			"Insulin",
			"BMI",
			"DiabetesPedigreeFunction",
			"Age",
		]
	);
	assert_eq!(Field::Bmi.to_string(), "BMI");
}
