//! Property tests for step-set parsing.

use proptest::prelude::*;

use streambench::{Step, StepSet};

fn alphabet_soup() -> impl Strategy<Value = Vec<char>> {
    proptest::collection::vec(
        prop::sample::select(vec![
            'C', 'I', 'P', 'T', 'M', 'V', 'c', 'i', 'p', 't', 'm', 'v',
        ]),
        0..12,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: membership is per-letter, case-insensitive, and
    /// independent of order and repetition.
    #[test]
    fn property_membership_matches_letters(letters in alphabet_soup()) {
        let input: String = letters.iter().collect();
        let set = StepSet::parse(&input).unwrap();

        for step in Step::ALL {
            let requested = letters
                .iter()
                .any(|c| c.to_ascii_uppercase() == step.letter());
            prop_assert_eq!(set.contains(step), requested);
        }
    }

    /// PROPERTY: parsing a string equals parsing its reverse and its
    /// doubling.
    #[test]
    fn property_parse_is_order_and_repeat_insensitive(letters in alphabet_soup()) {
        let input: String = letters.iter().collect();
        let reversed: String = letters.iter().rev().collect();
        let doubled = format!("{input}{input}");

        prop_assert_eq!(StepSet::parse(&input).unwrap(), StepSet::parse(&reversed).unwrap());
        prop_assert_eq!(StepSet::parse(&input).unwrap(), StepSet::parse(&doubled).unwrap());
    }

    /// PROPERTY: parse never panics, and errs exactly when the input
    /// holds a character outside the alphabet (whitespace excepted).
    #[test]
    fn property_parse_rejects_exactly_the_invalid(input in ".{0,20}") {
        let outside = input.chars().any(|c| {
            !c.is_ascii_whitespace() && Step::from_letter(c).is_none()
        });
        prop_assert_eq!(StepSet::parse(&input).is_err(), outside);
    }
}
