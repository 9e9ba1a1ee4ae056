//! Declarative tool input schemas.
//!
//! Each tool declares its accepted fields once; the declaration drives both
//! the JSON Schema advertised over the protocol and the validation applied
//! to raw arguments before a handler runs. Validation substitutes declared
//! defaults for omitted optional fields and tolerates unknown extra fields
//! (they are dropped, never rejected).

use serde_json::{Map, Value, json};
use shophand_core::Email;

use crate::error::ToolError;

/// Constraint applied to a string field beyond its type.
#[derive(Debug, Clone, Copy)]
pub enum StringFormat {
    /// Any string, including empty.
    Any,
    /// Must contain at least one character.
    NonEmpty,
    /// Must parse as an email address.
    Email,
    /// Must parse as an absolute URL.
    Url,
    /// Must match the given regular expression.
    Pattern(&'static str),
}

/// The shape a field's value must take.
#[derive(Debug, Clone)]
pub enum FieldType {
    String(StringFormat),
    /// String restricted to a fixed value set.
    Enum(&'static [&'static str]),
    Integer {
        min: Option<i64>,
    },
    Number,
    Boolean,
    /// Array of strings.
    StringArray,
    /// Nested object validated against its own schema.
    Object(InputSchema),
    /// Array of objects, each validated against the same schema.
    ObjectArray(InputSchema),
    /// Accepted as-is; the tool normalizes it itself.
    Json,
}

/// One declared field of a tool's input.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    description: &'static str,
    ty: FieldType,
    required: bool,
    default: Option<Value>,
}

impl Field {
    fn new(name: &'static str, description: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            description,
            ty,
            required: false,
            default: None,
        }
    }

    /// A free-form string field.
    #[must_use]
    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldType::String(StringFormat::Any))
    }

    /// A string field that must be non-empty.
    #[must_use]
    pub fn non_empty(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldType::String(StringFormat::NonEmpty))
    }

    /// A string field that must be a well-formed email address.
    #[must_use]
    pub fn email(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldType::String(StringFormat::Email))
    }

    /// A string field that must be an absolute URL.
    #[must_use]
    pub fn url(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldType::String(StringFormat::Url))
    }

    /// A string field constrained by a regular expression.
    #[must_use]
    pub fn pattern(
        name: &'static str,
        description: &'static str,
        pattern: &'static str,
    ) -> Self {
        Self::new(
            name,
            description,
            FieldType::String(StringFormat::Pattern(pattern)),
        )
    }

    /// A string field restricted to an enumerated value set.
    #[must_use]
    pub fn enumeration(
        name: &'static str,
        description: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self::new(name, description, FieldType::Enum(values))
    }

    /// An integer field.
    #[must_use]
    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldType::Integer { min: None })
    }

    /// An integer field with an inclusive lower bound.
    #[must_use]
    pub fn integer_min(name: &'static str, description: &'static str, min: i64) -> Self {
        Self::new(name, description, FieldType::Integer { min: Some(min) })
    }

    /// A floating-point number field.
    #[must_use]
    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldType::Number)
    }

    /// A boolean field.
    #[must_use]
    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldType::Boolean)
    }

    /// An array-of-strings field.
    #[must_use]
    pub fn string_array(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldType::StringArray)
    }

    /// A nested object field.
    #[must_use]
    pub fn object(name: &'static str, description: &'static str, schema: InputSchema) -> Self {
        Self::new(name, description, FieldType::Object(schema))
    }

    /// An array-of-objects field.
    #[must_use]
    pub fn object_array(
        name: &'static str,
        description: &'static str,
        schema: InputSchema,
    ) -> Self {
        Self::new(name, description, FieldType::ObjectArray(schema))
    }

    /// A field accepted without shape checks; the tool normalizes it.
    #[must_use]
    pub fn json(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldType::Json)
    }

    /// Mark this field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Substitute this value when the field is omitted.
    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// An ordered set of declared fields.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    fields: Vec<Field>,
}

impl InputSchema {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field declaration.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Render the declaration as a JSON Schema object for protocol listing.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut prop = match &field.ty {
                FieldType::String(format) => {
                    let mut p = json!({"type": "string"});
                    match format {
                        StringFormat::Any | StringFormat::NonEmpty => {}
                        StringFormat::Email => {
                            p["format"] = json!("email");
                        }
                        StringFormat::Url => {
                            p["format"] = json!("uri");
                        }
                        StringFormat::Pattern(pattern) => {
                            p["pattern"] = json!(pattern);
                        }
                    }
                    p
                }
                FieldType::Enum(values) => json!({"type": "string", "enum": values}),
                FieldType::Integer { min } => {
                    let mut p = json!({"type": "integer"});
                    if let Some(min) = min {
                        p["minimum"] = json!(min);
                    }
                    p
                }
                FieldType::Number => json!({"type": "number"}),
                FieldType::Boolean => json!({"type": "boolean"}),
                FieldType::StringArray => {
                    json!({"type": "array", "items": {"type": "string"}})
                }
                FieldType::Object(schema) => schema.to_json_schema(),
                FieldType::ObjectArray(schema) => {
                    json!({"type": "array", "items": schema.to_json_schema()})
                }
                FieldType::Json => json!({}),
            };

            if let Some(obj) = prop.as_object_mut() {
                if !field.description.is_empty() {
                    obj.insert("description".to_string(), json!(field.description));
                }
                if let Some(default) = &field.default {
                    obj.insert("default".to_string(), default.clone());
                }
            }

            properties.insert(field.name.to_string(), prop);
            if field.required {
                required.push(json!(field.name));
            }
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = Value::Array(required);
        }
        schema
    }

    /// Validate a raw argument object against this schema.
    ///
    /// Returns the normalized input: declared defaults filled in, unknown
    /// fields dropped, nested objects normalized recursively. An explicit
    /// `null` counts as an omitted field.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Validation`] naming the offending field and the
    /// constraint it violated.
    pub fn validate(&self, raw: &Value) -> Result<Map<String, Value>, ToolError> {
        self.validate_at(raw, "")
    }

    fn validate_at(&self, raw: &Value, prefix: &str) -> Result<Map<String, Value>, ToolError> {
        let empty = Map::new();
        let object = match raw {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(ToolError::validation(
                    if prefix.is_empty() { "input" } else { prefix },
                    format!("expected an object, got {}", type_name(other)),
                ));
            }
        };

        let mut normalized = Map::new();

        for field in &self.fields {
            let path = if prefix.is_empty() {
                field.name.to_string()
            } else {
                format!("{prefix}.{}", field.name)
            };

            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(ToolError::validation(path, "is required"));
                    }
                    if let Some(default) = &field.default {
                        normalized.insert(field.name.to_string(), default.clone());
                    }
                }
                Some(value) => {
                    let checked = check_value(&field.ty, value, &path)?;
                    normalized.insert(field.name.to_string(), checked);
                }
            }
        }

        Ok(normalized)
    }
}

fn check_value(ty: &FieldType, value: &Value, path: &str) -> Result<Value, ToolError> {
    match ty {
        FieldType::String(format) => {
            let s = value
                .as_str()
                .ok_or_else(|| expected(path, "a string", value))?;
            check_format(*format, s, path)?;
            Ok(value.clone())
        }
        FieldType::Enum(values) => {
            let s = value
                .as_str()
                .ok_or_else(|| expected(path, "a string", value))?;
            if values.contains(&s) {
                Ok(value.clone())
            } else {
                Err(ToolError::validation(
                    path,
                    format!("must be one of [{}]", values.join(", ")),
                ))
            }
        }
        FieldType::Integer { min } => {
            let n = value
                .as_i64()
                .ok_or_else(|| expected(path, "an integer", value))?;
            if let Some(min) = min
                && n < *min
            {
                return Err(ToolError::validation(path, format!("must be >= {min}")));
            }
            Ok(value.clone())
        }
        FieldType::Number => {
            if value.is_number() {
                Ok(value.clone())
            } else {
                Err(expected(path, "a number", value))
            }
        }
        FieldType::Boolean => {
            if value.is_boolean() {
                Ok(value.clone())
            } else {
                Err(expected(path, "a boolean", value))
            }
        }
        FieldType::StringArray => {
            let items = value
                .as_array()
                .ok_or_else(|| expected(path, "an array of strings", value))?;
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(ToolError::validation(
                        format!("{path}[{i}]"),
                        format!("expected a string, got {}", type_name(item)),
                    ));
                }
            }
            Ok(value.clone())
        }
        FieldType::Object(schema) => {
            let normalized = schema.validate_at(value, path)?;
            Ok(Value::Object(normalized))
        }
        FieldType::ObjectArray(schema) => {
            let items = value
                .as_array()
                .ok_or_else(|| expected(path, "an array of objects", value))?;
            let mut normalized = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let entry = schema.validate_at(item, &format!("{path}[{i}]"))?;
                normalized.push(Value::Object(entry));
            }
            Ok(Value::Array(normalized))
        }
        FieldType::Json => Ok(value.clone()),
    }
}

fn check_format(format: StringFormat, s: &str, path: &str) -> Result<(), ToolError> {
    match format {
        StringFormat::Any => Ok(()),
        StringFormat::NonEmpty => {
            if s.is_empty() {
                Err(ToolError::validation(path, "must not be empty"))
            } else {
                Ok(())
            }
        }
        StringFormat::Email => Email::parse(s)
            .map(|_| ())
            .map_err(|e| ToolError::validation(path, e.to_string())),
        StringFormat::Url => url::Url::parse(s)
            .map(|_| ())
            .map_err(|_| ToolError::validation(path, "must be a valid URL")),
        StringFormat::Pattern(pattern) => {
            let re = regex::Regex::new(pattern).map_err(|e| {
                ToolError::Configuration(format!("invalid schema pattern `{pattern}`: {e}"))
            })?;
            if re.is_match(s) {
                Ok(())
            } else {
                Err(ToolError::validation(
                    path,
                    format!("must match pattern {pattern}"),
                ))
            }
        }
    }
}

fn expected(path: &str, what: &str, got: &Value) -> ToolError {
    ToolError::validation(path, format!("expected {what}, got {}", type_name(got)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_schema() -> InputSchema {
        InputSchema::new()
            .field(Field::string("query", "Free-text filter"))
            .field(
                Field::integer_min("limit", "Maximum results", 1)
                    .default_value(json!(10)),
            )
    }

    #[test]
    fn applies_default_for_omitted_field() {
        let normalized = list_schema().validate(&json!({})).expect("valid");
        assert_eq!(normalized.get("limit"), Some(&json!(10)));
        assert!(!normalized.contains_key("query"));
    }

    #[test]
    fn explicit_value_matches_default_shape() {
        let explicit = list_schema()
            .validate(&json!({"limit": 10}))
            .expect("valid");
        let defaulted = list_schema().validate(&json!({})).expect("valid");
        assert_eq!(explicit, defaulted);
    }

    #[test]
    fn null_counts_as_omitted() {
        let normalized = list_schema()
            .validate(&json!({"limit": null}))
            .expect("valid");
        assert_eq!(normalized.get("limit"), Some(&json!(10)));
    }

    #[test]
    fn unknown_fields_are_dropped_not_rejected() {
        let normalized = list_schema()
            .validate(&json!({"limit": 5, "whatever": true}))
            .expect("valid");
        assert!(!normalized.contains_key("whatever"));
    }

    #[test]
    fn missing_required_field_names_it() {
        let schema =
            InputSchema::new().field(Field::non_empty("productId", "Product id").required());
        let err = schema.validate(&json!({})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: field `productId`: is required"
        );
    }

    #[test]
    fn type_mismatch_is_reported() {
        let err = list_schema()
            .validate(&json!({"limit": "ten"}))
            .unwrap_err();
        assert!(err.to_string().contains("expected an integer"));
    }

    #[test]
    fn minimum_is_enforced() {
        let err = list_schema().validate(&json!({"limit": 0})).unwrap_err();
        assert!(err.to_string().contains("must be >= 1"));
    }

    #[test]
    fn enum_values_are_restricted() {
        let schema = InputSchema::new().field(Field::enumeration(
            "status",
            "Order status",
            &["OPEN", "CLOSED"],
        ));
        assert!(schema.validate(&json!({"status": "OPEN"})).is_ok());
        let err = schema.validate(&json!({"status": "open"})).unwrap_err();
        assert!(err.to_string().contains("must be one of [OPEN, CLOSED]"));
    }

    #[test]
    fn email_and_url_formats() {
        let schema = InputSchema::new()
            .field(Field::email("email", "Customer email"))
            .field(Field::url("trackingUrl", "Tracking URL"));
        assert!(
            schema
                .validate(&json!({"email": "a@b.com", "trackingUrl": "https://t.co/x"}))
                .is_ok()
        );
        assert!(schema.validate(&json!({"email": "nope"})).is_err());
        assert!(schema.validate(&json!({"trackingUrl": "not a url"})).is_err());
    }

    #[test]
    fn pattern_format() {
        let schema =
            InputSchema::new().field(Field::pattern("customerId", "Numeric id", r"^\d+$"));
        assert!(schema.validate(&json!({"customerId": "123"})).is_ok());
        let err = schema
            .validate(&json!({"customerId": "gid://shopify/Customer/123"}))
            .unwrap_err();
        assert!(err.to_string().contains("must match pattern"));
    }

    #[test]
    fn nested_object_errors_carry_full_path() {
        let address = InputSchema::new().field(Field::non_empty("city", "City").required());
        let schema = InputSchema::new().field(Field::object("address", "Shipping address", address));
        let err = schema
            .validate(&json!({"address": {"city": ""}}))
            .unwrap_err();
        assert!(err.to_string().contains("`address.city`"));
    }

    #[test]
    fn object_array_indexes_errors() {
        let item = InputSchema::new()
            .field(Field::non_empty("variantId", "Variant id").required())
            .field(Field::integer_min("quantity", "Quantity", 1).required());
        let schema = InputSchema::new().field(Field::object_array("lineItems", "Items", item));
        let err = schema
            .validate(&json!({"lineItems": [{"variantId": "9", "quantity": 0}]}))
            .unwrap_err();
        assert!(err.to_string().contains("`lineItems[0].quantity`"));
    }

    #[test]
    fn json_schema_rendering() {
        let schema = list_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["limit"]["type"], "integer");
        assert_eq!(schema["properties"]["limit"]["default"], 10);
        assert_eq!(schema["properties"]["limit"]["minimum"], 1);
        assert!(schema.get("required").is_none());
    }
}
