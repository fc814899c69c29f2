//! Static JSON Schemas for item request bodies.

use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::error::ApiError;

fn item_properties() -> Value {
    json!({
        "name": { "type": "string", "minLength": 1 },
        "value": { "type": "number" },
        "year": { "type": "string" },
        "condition": { "type": "string" },
        "location": { "type": "string" },
        "group": { "type": "string" }
    })
}

/// Body of `POST /<resource>`
pub fn create_schema() -> Value {
    json!({
        "type": "object",
        "properties": item_properties(),
        "required": ["name"],
        "additionalProperties": false
    })
}

/// Body of `PATCH /<resource>/:name`; every field optional
pub fn patch_schema() -> Value {
    json!({
        "type": "object",
        "properties": item_properties(),
        "additionalProperties": false
    })
}

static CREATE_VALIDATOR: Lazy<Validator> = Lazy::new(|| compile(&create_schema()));
static PATCH_VALIDATOR: Lazy<Validator> = Lazy::new(|| compile(&patch_schema()));

fn compile(schema: &Value) -> Validator {
    jsonschema::validator_for(schema).expect("static item schema must compile")
}

fn check(validator: &Validator, body: &Value) -> Result<(), ApiError> {
    let errors: Vec<String> = validator.iter_errors(body).map(|e| e.to_string()).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(errors))
    }
}

pub fn validate_create(body: &Value) -> Result<(), ApiError> {
    check(&CREATE_VALIDATOR, body)
}

pub fn validate_patch(body: &Value) -> Result<(), ApiError> {
    check(&PATCH_VALIDATOR, body)
}
