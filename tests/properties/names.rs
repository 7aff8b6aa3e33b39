//! Property tests for deterministic name derivation.

use chrono::TimeZone;
use proptest::prelude::*;

use streambench::names::ResourceNames;

/// Prefixes that satisfy every derived-name constraint: lowercase
/// alphanumeric, leading letter, short enough for the 24-character caps.
fn valid_prefix() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9]{1,11}").unwrap()
}

fn at(minute: u32) -> chrono::DateTime<chrono::Local> {
    chrono::Local
        .with_ymd_and_hms(2024, 3, 1, 12, minute, 0)
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: derivation is a pure function of (prefix, time).
    #[test]
    fn property_same_prefix_same_names(prefix in valid_prefix()) {
        let a = ResourceNames::derive(&prefix, at(0)).unwrap();
        let b = ResourceNames::derive(&prefix, at(0)).unwrap();
        prop_assert_eq!(a, b);
    }

    /// PROPERTY: only the image tag depends on time.
    #[test]
    fn property_time_only_moves_the_image_tag(prefix in valid_prefix()) {
        let a = ResourceNames::derive(&prefix, at(0)).unwrap();
        let b = ResourceNames::derive(&prefix, at(30)).unwrap();

        prop_assert_ne!(&a.image_tag, &b.image_tag);

        let strip = |mut names: ResourceNames| {
            names.image_tag.clear();
            names
        };
        prop_assert_eq!(strip(a), strip(b));
    }

    /// PROPERTY: every valid prefix derives, and every derived name
    /// embeds the prefix or is a documented constant.
    #[test]
    fn property_valid_prefixes_always_derive(prefix in valid_prefix()) {
        let names = ResourceNames::derive(&prefix, at(0)).unwrap();
        prop_assert_eq!(&names.resource_group, &prefix);
        prop_assert!(names.storage_account.starts_with(prefix.as_str()));
        prop_assert!(names.storage_account.len() <= 24);
        prop_assert!(names.verify_vault.len() <= 24);
        prop_assert!(names.cluster_vault.len() <= 24);
        prop_assert!(names.container_registry.len() >= 5);
    }

    /// PROPERTY: prefixes past the key-vault cap always fail, fast.
    #[test]
    fn property_long_prefixes_always_fail(prefix in "[a-z]{17,40}") {
        prop_assert!(ResourceNames::derive(&prefix, at(0)).is_err());
    }

    /// PROPERTY: derivation never panics on arbitrary input.
    #[test]
    fn property_derive_never_panics(prefix in ".{0,40}") {
        let _ = ResourceNames::derive(&prefix, at(0));
    }
}
