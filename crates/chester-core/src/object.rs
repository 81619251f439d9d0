//! JSON treasures.
//!
//! `lock_obj` accepts anything that serializes to a JSON object or array;
//! scalars are rejected so that `unlock_obj` always yields structured data.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    chester::{Chester, LockOptions, UnlockOptions},
    env::Environment,
    error::ChesterError,
};

impl<E: Environment> Chester<E> {
    /// Serialize `treasure` to JSON and lock it.
    ///
    /// # Errors
    ///
    /// - `Serialization` if `treasure` cannot be represented as JSON
    /// - `InvalidArgument` if it serializes to something other than an object
    ///   or array
    /// - any error from [`Chester::lock`]
    pub fn lock_obj<T>(&self, treasure: &T, options: &LockOptions) -> Result<String, ChesterError>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(treasure).map_err(ChesterError::Serialization)?;
        if !(value.is_object() || value.is_array()) {
            let reason =
                format!("treasure must be a JSON object or array, got {}", type_name(&value));
            return Err(ChesterError::InvalidArgument { reason });
        }

        let json = serde_json::to_string(&value).map_err(ChesterError::Serialization)?;
        self.lock(&json, options)
    }

    /// Unlock a chest and parse its treasure as JSON.
    ///
    /// # Errors
    ///
    /// - `Deserialization` if the treasure is not valid JSON for `T`
    /// - any error from [`Chester::unlock`]
    pub fn unlock_obj<T>(&self, chest: &str, options: &UnlockOptions) -> Result<T, ChesterError>
    where
        T: DeserializeOwned,
    {
        let json = self.unlock(chest, options)?;
        serde_json::from_str(&json).map_err(ChesterError::Deserialization)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
