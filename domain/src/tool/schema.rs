//! Declarative tool schemas: the single source of truth for validation,
//! defaulting and schema export.
//!
//! An [`InputSchema`] is an ordered list of [`ParamSpec`]s. The same value:
//!
//! 1. validates raw, model-supplied arguments ([`InputSchema::validate`]),
//! 2. fills in declared defaults, and
//! 3. renders the JSON Schema handed to the model ([`InputSchema::to_json_schema`]).
//!
//! ```
//! use toolkit_domain::tool::schema::{InputSchema, ParamSpec, ParamType};
//!
//! let schema = InputSchema::new()
//!     .with_param(ParamSpec::new("query", "The search query", ParamType::String).required())
//!     .with_param(
//!         ParamSpec::new("num_results", "Number of results", ParamType::Integer)
//!             .with_default(5)
//!             .with_range(1.0, 10.0),
//!     );
//!
//! let raw = serde_json::json!({"query": "rust"});
//! let args = schema.validate(raw.as_object().unwrap()).unwrap();
//! assert_eq!(args["num_results"], 5);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Primitive type of a tool input parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
        }
    }

    /// Returns the value coerced to this type, or `None` on a type mismatch.
    ///
    /// Integral floats (`5.0`) are accepted for `Integer` and normalized to
    /// JSON integers so typed deserialization into `u32`/`i64` succeeds.
    fn coerce(&self, value: &Value) -> Option<Value> {
        match self {
            ParamType::String => value.is_string().then(|| value.clone()),
            ParamType::Boolean => value.is_boolean().then(|| value.clone()),
            ParamType::Number => value.is_number().then(|| value.clone()),
            ParamType::Integer => {
                if value.is_i64() || value.is_u64() {
                    Some(value.clone())
                } else {
                    value
                        .as_f64()
                        .filter(|f| f.is_finite() && f.fract() == 0.0)
                        .map(|f| Value::from(f as i64))
                }
            }
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Specification of a single input parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name (key in the argument object)
    pub name: String,
    /// LLM-facing description
    pub description: String,
    /// Expected JSON type
    pub param_type: ParamType,
    /// Whether the caller must supply this parameter
    pub required: bool,
    /// Value used when the parameter is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Inclusive lower bound (numeric parameters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound (numeric parameters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Allowed values (string parameters); empty means unrestricted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
}

impl ParamSpec {
    /// Create an optional parameter with no default and no constraints.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        param_type: ParamType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            param_type,
            required: false,
            default: None,
            minimum: None,
            maximum: None,
            allowed: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set a default. A parameter with a default is never required.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self.required = false;
        self
    }

    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    pub fn with_allowed<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = values.into_iter().map(Into::into).collect();
        self
    }

    /// Render a bound as an integer for integer parameters so exported
    /// schemas read `"minimum": 1` rather than `1.0`.
    fn bound_value(&self, bound: f64) -> Value {
        if self.param_type == ParamType::Integer {
            json!(bound as i64)
        } else {
            json!(bound)
        }
    }

    fn to_json_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".to_string(), json!(self.param_type.as_str()));
        prop.insert("description".to_string(), json!(self.description));
        if let Some(default) = &self.default {
            prop.insert("default".to_string(), default.clone());
        }
        if let Some(min) = self.minimum {
            prop.insert("minimum".to_string(), self.bound_value(min));
        }
        if let Some(max) = self.maximum {
            prop.insert("maximum".to_string(), self.bound_value(max));
        }
        if !self.allowed.is_empty() {
            prop.insert("enum".to_string(), json!(self.allowed));
        }
        Value::Object(prop)
    }

    /// Check a single present value; returns the normalized value.
    fn check(&self, value: &Value) -> Result<Value, Constraint> {
        let value = self.param_type.coerce(value).ok_or(Constraint::WrongType {
            expected: self.param_type,
        })?;

        if let Some(n) = value.as_f64() {
            if let Some(min) = self.minimum
                && n < min
            {
                return Err(Constraint::BelowMinimum { minimum: min });
            }
            if let Some(max) = self.maximum
                && n > max
            {
                return Err(Constraint::AboveMaximum { maximum: max });
            }
        }

        if !self.allowed.is_empty()
            && let Some(s) = value.as_str()
            && !self.allowed.iter().any(|a| a == s)
        {
            return Err(Constraint::NotAllowed {
                allowed: self.allowed.clone(),
            });
        }

        Ok(value)
    }
}

/// The constraint a supplied argument violated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// A required parameter was absent
    Missing,
    /// The value had the wrong JSON type
    WrongType { expected: ParamType },
    /// Below the inclusive lower bound
    BelowMinimum { minimum: f64 },
    /// Above the inclusive upper bound
    AboveMaximum { maximum: f64 },
    /// Not one of the allowed values
    NotAllowed { allowed: Vec<String> },
    /// The argument payload itself was unusable (e.g. not a JSON object)
    Malformed { reason: String },
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Missing => write!(f, "field required"),
            Constraint::WrongType { expected } => write!(f, "expected {}", expected),
            Constraint::BelowMinimum { minimum } => {
                write!(f, "must be greater than or equal to {}", minimum)
            }
            Constraint::AboveMaximum { maximum } => {
                write!(f, "must be less than or equal to {}", maximum)
            }
            Constraint::NotAllowed { allowed } => {
                write!(f, "must be one of: {}", allowed.join(", "))
            }
            Constraint::Malformed { reason } => write!(f, "{}", reason),
        }
    }
}

/// A single validation failure: which field, and which constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub field: String,
    pub constraint: Constraint,
}

impl Violation {
    pub fn new(field: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            field: field.into(),
            constraint,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.constraint)
    }
}

/// Ordered description of the parameters a tool accepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    pub params: Vec<ParamSpec>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }

    /// Validate raw arguments and apply defaults.
    ///
    /// Every parameter is checked and all violations are reported together.
    /// An explicit `null` counts as absent. Keys not declared in the schema
    /// are ignored and do not appear in the normalized output.
    pub fn validate(&self, raw: &Map<String, Value>) -> Result<Map<String, Value>, Vec<Violation>> {
        let mut normalized = Map::new();
        let mut violations = Vec::new();

        for param in &self.params {
            match raw.get(&param.name).filter(|v| !v.is_null()) {
                Some(value) => match param.check(value) {
                    Ok(value) => {
                        normalized.insert(param.name.clone(), value);
                    }
                    Err(constraint) => violations.push(Violation::new(&param.name, constraint)),
                },
                None => {
                    if let Some(default) = &param.default {
                        normalized.insert(param.name.clone(), default.clone());
                    } else if param.required {
                        violations.push(Violation::new(&param.name, Constraint::Missing));
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(normalized)
        } else {
            Err(violations)
        }
    }

    /// Render as a JSON Schema object (`{"type": "object", ...}`).
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.clone(), p.to_json_schema()))
            .collect();
        let required: Vec<&str> = self.required_names().collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Type of an output field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Array(Box<FieldType>),
    Object(Vec<FieldSpec>),
}

impl FieldType {
    pub fn array_of(item: FieldType) -> Self {
        FieldType::Array(Box::new(item))
    }

    fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array(_) => "array",
            FieldType::Object(_) => "object",
        }
    }

    fn to_json_schema(&self, nullable: bool) -> Value {
        let type_value = if nullable {
            json!([self.type_name(), "null"])
        } else {
            json!(self.type_name())
        };
        match self {
            FieldType::Array(item) => json!({"type": type_value, "items": item.to_json_schema(false)}),
            FieldType::Object(fields) => {
                let mut schema = object_schema(fields);
                schema["type"] = type_value;
                schema
            }
            _ => json!({"type": type_value}),
        }
    }

    fn check(&self, value: &Value, path: &str, problems: &mut Vec<String>) {
        let ok = match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Array(item) => match value.as_array() {
                Some(items) => {
                    for (i, element) in items.iter().enumerate() {
                        item.check(element, &format!("{}[{}]", path, i), problems);
                    }
                    true
                }
                None => false,
            },
            FieldType::Object(fields) => {
                if value.is_object() {
                    check_fields(fields, value, path, problems);
                    true
                } else {
                    false
                }
            }
        };
        if !ok {
            problems.push(format!("{}: expected {}", path, self.type_name()));
        }
    }
}

/// A named field of a tool's output.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub description: String,
    pub field_type: FieldType,
    /// Whether `null` is an acceptable value
    pub nullable: bool,
}

impl FieldSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            field_type,
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Ordered description of the shape of a tool's result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSchema {
    pub fields: Vec<FieldSpec>,
}

impl OutputSchema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn to_json_schema(&self) -> Value {
        object_schema(&self.fields)
    }

    /// Check that a serialized output has every declared field with the
    /// declared type. Returns the list of problems found.
    pub fn check(&self, value: &Value) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        if value.is_object() {
            check_fields(&self.fields, value, "", &mut problems);
        } else {
            problems.push("output: expected object".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

fn object_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = Map::new();
    for field in fields {
        let mut prop = field.field_type.to_json_schema(field.nullable);
        prop["description"] = json!(field.description);
        properties.insert(field.name.clone(), prop);
    }
    let required: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn check_fields(fields: &[FieldSpec], value: &Value, path: &str, problems: &mut Vec<String>) {
    for field in fields {
        let field_path = if path.is_empty() {
            field.name.clone()
        } else {
            format!("{}.{}", path, field.name)
        };
        match value.get(&field.name) {
            None => problems.push(format!("{}: missing", field_path)),
            Some(Value::Null) if field.nullable => {}
            Some(v) => field.field_type.check(v, &field_path, problems),
        }
    }
}
