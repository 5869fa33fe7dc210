//! Customer entity.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MAX_CUSTOMER_ID_LENGTH;

/// Errors that can occur when constructing or mutating a [`Customer`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// The customer identifier is empty.
    #[error("customerId is required")]
    EmptyCustomerId,
    /// The customer identifier is too long.
    #[error("customerId exceeds maximum length of {MAX_CUSTOMER_ID_LENGTH} characters, got {got}")]
    CustomerIdTooLong {
        /// Actual length of the input.
        got: usize,
    },
    /// The last-seen timestamp is unset.
    #[error("lastSeen must be set")]
    MissingLastSeen,
    /// A preference key is empty.
    #[error("preference key cannot be empty")]
    EmptyPreferenceKey,
}

/// An identified customer.
///
/// Created on the first resolved sighting; `last_seen` is updated on every
/// successful resolution and drives the duplicate-suppression window.
/// Preferences are pass-through storage: an opaque string-to-string mapping
/// mutated by external collaborators, never absent but possibly empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    customer_id: String,
    last_seen: DateTime<Utc>,
    preferences: HashMap<String, String>,
}

impl Customer {
    /// Construct a customer with `last_seen` set to the current time.
    ///
    /// # Errors
    ///
    /// Returns a [`CustomerError`] if the identifier is empty or too long.
    pub fn new(
        customer_id: impl Into<String>,
        preferences: Option<HashMap<String, String>>,
    ) -> Result<Self, CustomerError> {
        let customer = Self {
            customer_id: customer_id.into(),
            last_seen: Utc::now(),
            preferences: preferences.unwrap_or_default(),
        };
        customer.validate()?;
        Ok(customer)
    }

    /// Rehydrate a customer from stored fields.
    ///
    /// Used by repositories when loading a persisted record; the same
    /// invariants apply as at first construction.
    ///
    /// # Errors
    ///
    /// Returns a [`CustomerError`] if the stored record violates an
    /// invariant.
    pub fn from_parts(
        customer_id: impl Into<String>,
        last_seen: DateTime<Utc>,
        preferences: HashMap<String, String>,
    ) -> Result<Self, CustomerError> {
        let customer = Self {
            customer_id: customer_id.into(),
            last_seen,
            preferences,
        };
        customer.validate()?;
        Ok(customer)
    }

    /// Re-run the structural invariants on an existing customer.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), CustomerError> {
        if self.customer_id.is_empty() {
            return Err(CustomerError::EmptyCustomerId);
        }
        if self.customer_id.len() > MAX_CUSTOMER_ID_LENGTH {
            return Err(CustomerError::CustomerIdTooLong {
                got: self.customer_id.len(),
            });
        }
        if self.last_seen == DateTime::<Utc>::UNIX_EPOCH {
            return Err(CustomerError::MissingLastSeen);
        }
        Ok(())
    }

    /// The customer's unique identifier.
    #[must_use]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Timestamp of the customer's last identification.
    #[must_use]
    pub const fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    /// The customer's preference mapping.
    #[must_use]
    pub const fn preferences(&self) -> &HashMap<String, String> {
        &self.preferences
    }

    /// Record a sighting at `at`, overwriting the last-seen timestamp.
    pub const fn mark_seen(&mut self, at: DateTime<Utc>) {
        self.last_seen = at;
    }

    /// Add or overwrite a preference key-value pair.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::EmptyPreferenceKey`] for an empty key.
    pub fn set_preference(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), CustomerError> {
        let key = key.into();
        if key.is_empty() {
            return Err(CustomerError::EmptyPreferenceKey);
        }
        self.preferences.insert(key, value.into());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let customer = Customer::new("cust123", None).unwrap();
        assert_eq!(customer.customer_id(), "cust123");
        assert!(customer.preferences().is_empty());
        assert!(customer.last_seen() > DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_new_with_preferences() {
        let prefs = HashMap::from([("drink".to_owned(), "coffee".to_owned())]);
        let customer = Customer::new("cust123", Some(prefs)).unwrap();
        assert_eq!(
            customer.preferences().get("drink").map(String::as_str),
            Some("coffee")
        );
    }

    #[test]
    fn test_empty_customer_id() {
        assert_eq!(
            Customer::new("", None).unwrap_err(),
            CustomerError::EmptyCustomerId
        );
    }

    #[test]
    fn test_customer_id_too_long() {
        let id = "x".repeat(65);
        assert_eq!(
            Customer::new(id, None).unwrap_err(),
            CustomerError::CustomerIdTooLong { got: 65 }
        );
    }

    #[test]
    fn test_customer_id_max_length_ok() {
        assert!(Customer::new("x".repeat(64), None).is_ok());
    }

    #[test]
    fn test_mark_seen() {
        let mut customer = Customer::new("cust123", None).unwrap();
        let at = Utc::now() + chrono::Duration::minutes(5);
        customer.mark_seen(at);
        assert_eq!(customer.last_seen(), at);
    }

    #[test]
    fn test_validate_rejects_epoch_last_seen() {
        let mut customer = Customer::new("cust123", None).unwrap();
        customer.mark_seen(DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(customer.validate(), Err(CustomerError::MissingLastSeen));
    }

    #[test]
    fn test_set_preference() {
        let mut customer = Customer::new("cust123", None).unwrap();
        customer.set_preference("drink", "tea").unwrap();
        customer.set_preference("drink", "coffee").unwrap();
        assert_eq!(
            customer.preferences().get("drink").map(String::as_str),
            Some("coffee")
        );
    }

    #[test]
    fn test_set_preference_empty_key() {
        let mut customer = Customer::new("cust123", None).unwrap();
        assert_eq!(
            customer.set_preference("", "coffee").unwrap_err(),
            CustomerError::EmptyPreferenceKey
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut customer = Customer::new("cust123", None).unwrap();
        customer.set_preference("drink", "coffee").unwrap();
        let json = serde_json::to_string(&customer).unwrap();
        let parsed: Customer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, customer);
    }
}
