//! Property-based tests for address normalization.

use seesound::managers::navigation_manager::normalize_address;
use proptest::prelude::*;

fn arb_host() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{1,12}", prop_oneof![Just("com"), Just("org"), Just("io")])
        .prop_map(|(name, tld)| format!("{}.{}", name, tld))
}

fn arb_path() -> impl Strategy<Value = String> {
    proptest::option::of("/[a-z0-9]{1,10}").prop_map(Option::unwrap_or_default)
}

fn arb_padding() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A bare host gets the default scheme, whatever whitespace surrounds it.
    #[test]
    fn bare_host_gets_https(
        host in arb_host(),
        path in arb_path(),
        left in arb_padding(),
        right in arb_padding(),
    ) {
        let typed = format!("{}{}{}{}", left, host, path, right);
        let url = normalize_address(&typed).unwrap().unwrap();
        prop_assert_eq!(url.scheme(), "https");
        prop_assert_eq!(url.host_str(), Some(host.as_str()));
    }

    /// Normalizing an already normalized address changes nothing.
    #[test]
    fn normalization_is_idempotent(host in arb_host(), path in arb_path()) {
        let first = normalize_address(&format!("{}{}", host, path)).unwrap().unwrap();
        let second = normalize_address(first.as_str()).unwrap().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn whitespace_is_empty(text in "[ \t\r\n]{0,10}") {
        prop_assert_eq!(normalize_address(&text).unwrap(), None);
    }

    /// The blank placeholder is refused in any letter case.
    #[test]
    fn placeholder_always_refused(mask in proptest::collection::vec(any::<bool>(), 11)) {
        let text: String = "about:blank"
            .chars()
            .zip(mask)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert!(normalize_address(&text).is_err());
    }
}
