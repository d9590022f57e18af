use crate::utils::error::{AicError, Result};
use crate::utils::validation::{
    validate_minimum, validate_non_empty_string, validate_range, validate_required_field,
};
use serde_json::{Map, Value};

/// Typed access to the JSON argument object of a `tools/call` request.
///
/// Every accessor validates before a request is built, so a bad argument
/// never reaches the remote API.
#[derive(Debug, Clone, Copy)]
pub struct ToolArguments<'a> {
    raw: &'a Map<String, Value>,
}

impl<'a> ToolArguments<'a> {
    pub fn new(raw: &'a Map<String, Value>) -> Self {
        Self { raw }
    }

    /// Present and not JSON `null`.
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.raw.get(field).filter(|v| !v.is_null())
    }

    pub fn query(&self) -> Result<String> {
        let query = self.get("query");
        let value = *validate_required_field("query", &query)?;
        let query = value
            .as_str()
            .ok_or_else(|| AicError::invalid("query", value, "must be a string"))?;
        validate_non_empty_string("query", query)?;
        Ok(query.trim().to_string())
    }

    /// Page size, `1..=max`.
    pub fn limit(&self, default: u32, max: u32) -> Result<u32> {
        match self.get("limit") {
            None => Ok(default.min(max)),
            Some(value) => {
                let limit = integer("limit", value)?;
                validate_range("limit", limit, 1, i64::from(max))?;
                Ok(limit as u32)
            }
        }
    }

    pub fn page(&self) -> Result<u32> {
        match self.get("page") {
            None => Ok(1),
            Some(value) => {
                let page = integer("page", value)?;
                validate_minimum("page", page, 1)?;
                u32::try_from(page).map_err(|_| AicError::invalid("page", value, "is too large"))
            }
        }
    }

    /// A record ID such as `artwork_id`: a positive integer, given either
    /// as a JSON number or as a string of digits.
    pub fn id(&self, field: &str) -> Result<u64> {
        let raw = self.get(field);
        let value = *validate_required_field(field, &raw)?;
        let id = integer(field, value)
            .map_err(|_| AicError::invalid(field, value, "must be a positive integer"))?;
        validate_minimum(field, id, 1)
            .map_err(|_| AicError::invalid(field, value, "must be a positive integer"))?;
        Ok(id as u64)
    }

    /// Comma-separated field projection; blank counts as absent.
    pub fn fields(&self) -> Result<Option<String>> {
        match self.get("fields") {
            None => Ok(None),
            Some(Value::String(fields)) => {
                let cleaned: Vec<&str> = fields
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .collect();
                if cleaned.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(cleaned.join(",")))
                }
            }
            Some(other) => Err(AicError::invalid(
                "fields",
                other,
                "must be a comma-separated string",
            )),
        }
    }
}

fn integer(field: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| AicError::invalid(field, value, "must be an integer")),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AicError::invalid(field, value, "must be an integer")),
        _ => Err(AicError::invalid(field, value, "must be an integer")),
    }
}
