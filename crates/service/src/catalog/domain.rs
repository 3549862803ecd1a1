use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A priced offering listed on the homepage.
///
/// `price` is display text, not a number: "Consultar" means "ask for a quote".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: String,
}

/// Candidate fields for a new service; the id is assigned by the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ServiceInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: String,
}

impl ServiceInput {
    /// Presence check for the required fields.
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_fields(&self.name, &self.price)
    }

    pub(crate) fn into_service(self, id: String) -> Service {
        Service { id, name: self.name, description: self.description, price: self.price }
    }
}

impl Service {
    /// Same presence check as [`ServiceInput::validate`], plus a non-empty id.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.id.trim().is_empty() {
            return Err(ServiceError::Validation("id is required".into()));
        }
        require_fields(&self.name, &self.price)
    }
}

fn require_fields(name: &str, price: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("name is required".into()));
    }
    if price.trim().is_empty() {
        return Err(ServiceError::Validation("price is required".into()));
    }
    Ok(())
}

/// Millisecond timestamp id, bumped until it is unused in `existing`.
pub fn next_id(existing: &[Service]) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    while existing.iter().any(|s| s.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_skips_taken_ids() -> anyhow::Result<()> {
        let first: i64 = next_id(&[]).parse()?;
        let taken: Vec<Service> = (0..5)
            .map(|offset| Service {
                id: (first + offset).to_string(),
                name: "x".into(),
                description: None,
                price: "1".into(),
            })
            .collect();
        let id = next_id(&taken);
        assert!(!id.is_empty());
        assert!(taken.iter().all(|s| s.id != id));
        Ok(())
    }

    #[test]
    fn validation_requires_name_and_price() {
        let ok = ServiceInput { name: "Balanceo".into(), description: None, price: "Consultar".into() };
        assert!(ok.validate().is_ok());

        let no_name = ServiceInput { name: "  ".into(), ..ok.clone() };
        assert!(matches!(no_name.validate(), Err(ServiceError::Validation(m)) if m.contains("name")));

        let no_price = ServiceInput { price: String::new(), ..ok.clone() };
        assert!(matches!(no_price.validate(), Err(ServiceError::Validation(m)) if m.contains("price")));

        let no_id = ok.into_service(String::new());
        assert!(no_id.validate().is_err());
    }

    #[test]
    fn absent_description_is_omitted_on_the_wire() -> anyhow::Result<()> {
        let svc = Service { id: "1700000000000".into(), name: "Balanceo".into(), description: None, price: "Consultar".into() };
        let json = serde_json::to_value(&svc)?;
        assert_eq!(json, serde_json::json!({"id": "1700000000000", "name": "Balanceo", "price": "Consultar"}));

        let back: Service = serde_json::from_value(json)?;
        assert_eq!(back, svc);
        Ok(())
    }
}
