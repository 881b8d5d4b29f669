//! Argument schemas for remote functions

use serde_json::{json, Map, Value};

use crate::codec::JsonMap;
use crate::error::{Error, Result};
use crate::models::StoreFunctionParameter;

/// JSON type a parameter accepts; unknown types fall back to string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    Number,
    Integer,
    Boolean,
}

impl ParameterType {
    pub fn parse(type_: Option<&str>) -> Self {
        match type_ {
            Some("number") => ParameterType::Number,
            Some("integer") => ParameterType::Integer,
            Some("boolean") => ParameterType::Boolean,
            _ => ParameterType::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Integer => "integer",
            ParameterType::Boolean => "boolean",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            ParameterType::String => value.is_string(),
            ParameterType::Number => value.is_number(),
            ParameterType::Integer => value.is_i64() || value.is_u64(),
            ParameterType::Boolean => value.is_boolean(),
        }
    }
}

/// Build the JSON Schema of a tool's arguments, titled `{name}Schema`.
///
/// Every parameter becomes a required property. Parameters without a name
/// are skipped.
pub fn create_dynamic_schema(name: &str, parameters: &[StoreFunctionParameter]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for param in parameters {
        let Some(param_name) = param.name.value() else {
            continue;
        };
        let type_ = ParameterType::parse(param.type_.as_deref());
        properties.insert(
            param_name.clone(),
            json!({
                "type": type_.as_str(),
                "description": param.description.as_deref().unwrap_or(""),
            }),
        );
        required.push(Value::String(param_name.clone()));
    }

    json!({
        "title": format!("{}Schema", name),
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Check `args` against a schema built by [`create_dynamic_schema`] and keep
/// only the declared properties
pub fn validate_args(schema: &Value, args: Value) -> Result<JsonMap> {
    let title = schema["title"].as_str().unwrap_or("arguments");
    let Value::Object(mut args) = args else {
        return Err(Error::tool(format!("{}: arguments must be a JSON object", title)));
    };
    let Some(properties) = schema["properties"].as_object() else {
        return Ok(JsonMap::new());
    };

    let mut validated = JsonMap::new();
    for (key, property) in properties {
        let type_ = ParameterType::parse(property["type"].as_str());
        match args.remove(key) {
            None | Some(Value::Null) => {
                return Err(Error::tool(format!("{}: missing argument `{}`", title, key)));
            }
            Some(value) if !type_.accepts(&value) => {
                return Err(Error::tool(format!(
                    "{}: argument `{}` must be {}",
                    title,
                    key,
                    type_.as_str()
                )));
            }
            Some(value) => {
                validated.insert(key.clone(), value);
            }
        }
    }
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Field;

    fn param(name: &str, type_: Option<&str>, description: Option<&str>) -> StoreFunctionParameter {
        StoreFunctionParameter {
            name: Field::Present(name.to_string()),
            type_: Field::from_option(type_.map(str::to_string)),
            description: Field::from_option(description.map(str::to_string)),
            ..Default::default()
        }
    }

    #[test]
    fn test_schema_maps_types() {
        let schema = create_dynamic_schema(
            "search",
            &[
                param("query", Some("string"), Some("What to look for")),
                param("limit", Some("integer"), None),
                param("threshold", Some("number"), None),
                param("exact", Some("boolean"), None),
                param("region", Some("enum"), None),
            ],
        );

        assert_eq!(schema["title"], "searchSchema");
        assert_eq!(schema["properties"]["query"]["description"], "What to look for");
        assert_eq!(schema["properties"]["limit"]["type"], "integer");
        assert_eq!(schema["properties"]["limit"]["description"], "");
        assert_eq!(schema["properties"]["threshold"]["type"], "number");
        assert_eq!(schema["properties"]["exact"]["type"], "boolean");
        assert_eq!(schema["properties"]["region"]["type"], "string");
        assert_eq!(schema["required"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_validate_args() {
        let schema = create_dynamic_schema(
            "search",
            &[param("query", None, None), param("limit", Some("integer"), None)],
        );

        let args = validate_args(&schema, json!({"query": "rust", "limit": 3, "extra": true}))
            .unwrap();
        assert_eq!(args.len(), 2);
        assert!(!args.contains_key("extra"));

        let err = validate_args(&schema, json!({"query": "rust"})).unwrap_err();
        assert!(err.to_string().contains("missing argument `limit`"));

        let err = validate_args(&schema, json!({"query": "rust", "limit": 1.5})).unwrap_err();
        assert!(err.to_string().contains("must be integer"));

        assert!(validate_args(&schema, json!([1, 2])).is_err());
    }
}
