use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub type CourseId = i64;

/// A course as stored and returned to clients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub price: f64,
}

/// Create/update payload. The id is always assigned by the store, so any `id`
/// field sent by a client is ignored during deserialization.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CourseInput {
    pub name: String,
    pub price: f64,
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("Course name is required".into()));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), ModelError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ModelError::Validation("Price must be greater than 0".into()));
    }
    Ok(())
}

impl CourseInput {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self { name: name.into(), price }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_price(self.price)
    }
}

impl Course {
    pub fn from_input(id: CourseId, input: CourseInput) -> Self {
        Self { id, name: input.name, price: input.price }
    }

    /// Replace the mutable fields, keeping the id.
    pub fn apply(&mut self, input: CourseInput) {
        self.name = input.name;
        self.price = input.price;
    }
}
