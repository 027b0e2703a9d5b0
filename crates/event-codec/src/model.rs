//! Event and subscription data model.

use std::collections::BTreeMap;

use event_path::{validate_key, vocab, FieldPath, PathError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Multi-valued query-style parameters.
///
/// Values under one key keep their insertion order.
pub type Params = IndexMap<String, Vec<String>>;

/// A business event as attached to spans and propagated between services.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub params: Params,
    #[serde(skip_serializing_if = "is_false")]
    pub is_anonymous: bool,
    /// Dense: position `i` is the `i`-th subscription, no gaps.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subscriptions: Vec<Subscription>,
}

/// A billing subscription touched by an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub price_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub usage: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub increment_by: f64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Append one value to the end of `key`'s parameter sequence.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.entry(key.into()).or_default().push(value.into());
        self
    }

    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    /// Report the first map key that cannot survive a trip through a
    /// rendered key because it holds `.`, `[` or `]`.
    ///
    /// Encoding never calls this; the returned path tells where the key sits.
    pub fn validate_keys(&self) -> Result<(), (FieldPath, PathError)> {
        let check = |path: FieldPath, key: &str| {
            validate_key(key).map_err(|err| (path.key(key), err))
        };

        for key in self.meta.keys() {
            check(FieldPath::root().field(vocab::META), key.as_str())?;
        }
        for key in self.params.keys() {
            check(FieldPath::root().field(vocab::PARAMS), key.as_str())?;
        }
        for (index, subscription) in self.subscriptions.iter().enumerate() {
            for key in subscription.metadata.keys() {
                let base = FieldPath::root()
                    .field(vocab::SUBSCRIPTIONS)
                    .index(index)
                    .field(vocab::METADATA);
                check(base, key.as_str())?;
            }
        }
        Ok(())
    }
}

impl Subscription {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = customer_id.into();
        self
    }

    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    pub fn with_price_id(mut self, price_id: impl Into<String>) -> Self {
        self.price_id = price_id.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_increment_by(mut self, increment_by: f64) -> Self {
        self.increment_by = increment_by;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The plain string fields, paired with their vocabulary names, in
    /// rendering order.
    pub fn string_fields(&self) -> [(&'static str, &str); 5] {
        [
            (vocab::ID, self.id.as_str()),
            (vocab::CUSTOMER_ID, self.customer_id.as_str()),
            (vocab::PRODUCT_ID, self.product_id.as_str()),
            (vocab::PRICE_ID, self.price_id.as_str()),
            (vocab::USAGE, self.usage.as_str()),
        ]
    }

    /// Mutable access to a plain string field by vocabulary name.
    pub fn string_field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            vocab::ID => Some(&mut self.id),
            vocab::CUSTOMER_ID => Some(&mut self.customer_id),
            vocab::PRODUCT_ID => Some(&mut self.product_id),
            vocab::PRICE_ID => Some(&mut self.price_id),
            vocab::USAGE => Some(&mut self.usage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let event = Event::new("checkout")
            .with_meta("hello", "world")
            .with_param("query", "a")
            .with_param("query", "b")
            .with_subscription(Subscription::new("sub_1").with_increment_by(2.0));

        assert_eq!(event.name, "checkout");
        assert_eq!(event.meta["hello"], "world");
        assert_eq!(event.params["query"], vec!["a", "b"]);
        assert_eq!(event.subscriptions[0].id, "sub_1");
        assert_eq!(event.subscriptions[0].increment_by, 2.0);
    }

    #[test]
    fn test_string_field_mut_covers_string_fields() {
        let mut subscription = Subscription::default();
        for (name, _) in Subscription::default().string_fields() {
            *subscription.string_field_mut(name).unwrap() = name.to_uppercase();
        }
        assert_eq!(subscription.id, "ID");
        assert_eq!(subscription.customer_id, "CUSTOMER_ID");
        assert_eq!(subscription.usage, "USAGE");
        assert!(subscription.string_field_mut("increment_by").is_none());
        assert!(subscription.string_field_mut("metadata").is_none());
    }

    #[test]
    fn test_validate_keys() {
        assert!(Event::new("n").with_meta("ok", "v").validate_keys().is_ok());

        let event = Event::default().with_subscription(
            Subscription::new("s").with_metadata("v1.2", "x"),
        );
        let (path, err) = event.validate_keys().unwrap_err();
        assert_eq!(path.to_attribute_key(), "event.subscriptions[0].metadata.v1.2");
        assert_eq!(err, PathError::ReservedCharacter('.'));
    }

    #[test]
    fn test_serde_skips_empty_fields() {
        let json = serde_json::to_value(Event::new("n")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "n"}));

        let event: Event = serde_json::from_value(serde_json::json!({
            "name": "n",
            "params": {"query": ["a", "b"]},
            "subscriptions": [{"id": "s", "increment_by": 1.25}]
        }))
        .unwrap();
        assert_eq!(event.params["query"], vec!["a", "b"]);
        assert_eq!(event.subscriptions[0].increment_by, 1.25);
    }
}
