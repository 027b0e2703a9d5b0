use std::collections::BTreeMap;

use event_codec::{
    apply_event_from_baggage_member, extract_event_from_baggage, extract_event_from_flat_map,
    inject_event_to_baggage, inject_event_to_flat_map, Event, Subscription,
};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

fn map_key() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_-]{0,7}"
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 :/=-]{0,10}"
}

/// Increments on a millionth grid survive the six-digit rendering exactly.
fn increment_by() -> impl Strategy<Value = f64> {
    (-5_000_000_i64..5_000_000).prop_map(|millionths| millionths as f64 / 1_000_000.0)
}

fn subscription() -> impl Strategy<Value = Subscription> {
    (
        "[a-z0-9_]{1,8}",
        text(),
        text(),
        text(),
        text(),
        increment_by(),
        btree_map(map_key(), text(), 0..3),
    )
        .prop_map(
            |(id, customer_id, product_id, price_id, usage, increment_by, metadata)| {
                Subscription {
                    id,
                    customer_id,
                    product_id,
                    price_id,
                    usage,
                    increment_by,
                    metadata,
                }
            },
        )
}

/// Events restricted to the fields that cross a carrier.
fn propagated_event() -> impl Strategy<Value = Event> {
    (
        text(),
        btree_map(map_key(), text(), 0..4),
        vec(subscription(), 0..4),
    )
        .prop_map(|(name, meta, subscriptions)| Event {
            name,
            meta,
            subscriptions,
            ..Event::default()
        })
}

fn full_event() -> impl Strategy<Value = Event> {
    (
        propagated_event(),
        btree_map(map_key(), vec(text(), 1..4), 0..3),
        any::<bool>(),
    )
        .prop_map(|(mut event, params, is_anonymous)| {
            event.params = params.into_iter().collect();
            event.is_anonymous = is_anonymous;
            event
        })
}

fn baggage(event: &Event) -> Vec<(String, String)> {
    let mut members = Vec::new();
    inject_event_to_baggage(event, &mut members);
    members
}

fn shuffled_baggage() -> impl Strategy<Value = (Event, Vec<(String, String)>)> {
    propagated_event().prop_flat_map(|event| {
        let members = baggage(&event);
        (Just(event), Just(members).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn baggage_roundtrip_reproduces_event(event in propagated_event()) {
        prop_assert_eq!(extract_event_from_baggage(baggage(&event)), event);
    }

    #[test]
    fn member_order_does_not_matter((event, members) in shuffled_baggage()) {
        let in_order = extract_event_from_baggage(baggage(&event));
        let shuffled = extract_event_from_baggage(members);
        prop_assert_eq!(&shuffled, &in_order);
        prop_assert_eq!(shuffled, event);
    }

    #[test]
    fn attribute_roundtrip_reproduces_event(event in full_event()) {
        let mut attributes = BTreeMap::new();
        inject_event_to_flat_map(&event, &mut attributes);
        prop_assert_eq!(extract_event_from_flat_map(&attributes), event);
    }

    #[test]
    fn attribute_order_does_not_matter(
        (event, attributes) in full_event().prop_flat_map(|event| {
            let mut attributes = Vec::new();
            inject_event_to_flat_map(&event, &mut attributes);
            (Just(event), Just(attributes).prop_shuffle())
        })
    ) {
        prop_assert_eq!(extract_event_from_flat_map(attributes), event);
    }

    #[test]
    fn sparse_index_materializes_every_lower_slot(position in 0_usize..200) {
        let mut event = Event::default();
        let path = format!("subscriptions.{position}.id");
        apply_event_from_baggage_member(&path, "x", &mut event);

        prop_assert_eq!(event.subscriptions.len(), position + 1);
        for placeholder in &event.subscriptions[..position] {
            prop_assert_eq!(placeholder, &Subscription::default());
        }
        prop_assert_eq!(&event.subscriptions[position].id, "x");
    }

    #[test]
    fn unknown_members_never_mutate(
        event in propagated_event(),
        head in "[a-z]{1,8}",
        tail in "[a-z.]{0,8}",
        value in text(),
    ) {
        let path = format!("{head}{tail}");
        let first = path.split('.').next().unwrap_or_default();
        prop_assume!(!["name", "meta", "subscriptions"].contains(&first));

        let mut decoded = event.clone();
        apply_event_from_baggage_member(&path, &value, &mut decoded);
        prop_assert_eq!(decoded, event);
    }

    #[test]
    fn increment_by_always_has_six_fraction_digits(value in increment_by()) {
        let members = baggage(&Event::default().with_subscription(
            Subscription::new("s").with_increment_by(value),
        ));
        if let Some((_, rendered)) = members
            .iter()
            .find(|(key, _)| key == "event.subscriptions.0.increment_by")
        {
            let (_, fraction) = rendered.split_once('.').expect("decimal point");
            prop_assert_eq!(fraction.len(), 6);
        } else {
            prop_assert_eq!(value, 0.0);
        }
    }
}
