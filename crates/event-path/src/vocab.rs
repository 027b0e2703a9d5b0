//! Fixed leaf vocabulary for event field paths.
//!
//! Every vocabulary name is lower snake case. Map keys coming from event data
//! are not part of the vocabulary and are inserted into paths verbatim.

pub const NAME: &str = "name";
pub const META: &str = "meta";
pub const PARAMS: &str = "params";
pub const IS_ANONYMOUS: &str = "is_anonymous";
pub const SUBSCRIPTIONS: &str = "subscriptions";

pub const ID: &str = "id";
pub const CUSTOMER_ID: &str = "customer_id";
pub const PRODUCT_ID: &str = "product_id";
pub const PRICE_ID: &str = "price_id";
pub const USAGE: &str = "usage";
pub const INCREMENT_BY: &str = "increment_by";
pub const METADATA: &str = "metadata";
