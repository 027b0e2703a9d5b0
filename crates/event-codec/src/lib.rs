//! Business event codec for span attributes and propagation carriers.
//!
//! An [`Event`] is flattened into string pairs in one of two key forms (see
//! [`event_path::KeyForm`]):
//!
//! - [`inject_event_to_flat_map`] writes span attributes, every field
//!   included: `event.subscriptions[0].id`.
//! - [`inject_event_to_baggage`] writes the compact subset that crosses
//!   process boundaries: `event.subscriptions.0.id`.
//!
//! On the receiving side [`extract_event_from_baggage`] rebuilds the event
//! from whatever carrier pairs arrive, in whatever order, skipping pairs it
//! does not understand.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use event_codec::{extract_event_from_baggage, inject_event_to_baggage, Event, Subscription};
//!
//! let event = Event::new("invoice.paid")
//!     .with_meta("tenant", "acme")
//!     .with_subscription(Subscription::new("sub_1").with_increment_by(1.25));
//!
//! let mut carrier = HashMap::new();
//! inject_event_to_baggage(&event, &mut carrier);
//! assert_eq!(carrier["event.subscriptions.0.increment_by"], "1.250000");
//!
//! carrier.insert("unrelated".to_string(), "value".to_string());
//! assert_eq!(extract_event_from_baggage(&carrier), event);
//! ```

pub mod decode;
pub mod encode;
pub mod extract;
pub mod model;
pub mod subscription;

pub use decode::{
    apply_event_from_baggage_member, DecodeOptions, DecodeOutcome, Decoder,
    DEFAULT_MAX_SEQUENCE_LEN,
};
pub use encode::{format_increment_by, inject_event_to_baggage, inject_event_to_flat_map};
pub use extract::{extract_event_from_baggage, extract_event_from_flat_map, ExtractStats};
pub use model::{Event, Params, Subscription};
pub use subscription::inject_event_subscriptions_to_flat_map;
