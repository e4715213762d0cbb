//! Property tests for the canned knowledge replies.

use proptest::prelude::*;
use vibe_context::canned_reply;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: "tailwind" in any case selects the Tailwind reply unless "next" is present
    #[test]
    fn prop_tailwind_any_case(prefix in "[a-m ]{0,10}", suffix in "[a-m ]{0,10}", mask in prop::collection::vec(any::<bool>(), 8)) {
        let keyword: String = "tailwind"
            .chars()
            .zip(mask)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let reply = canned_reply(&format!("{}{}{}", prefix, keyword, suffix));
        prop_assert!(reply.contains("Tailwind CSS v3.4"));
    }

    /// Property: queries without keywords are echoed verbatim
    #[test]
    fn prop_generic_reply_echoes(query in "[0-9 ,.!?]{0,40}") {
        let reply = canned_reply(&query);
        prop_assert!(reply.contains(&query));
        prop_assert!(reply.ends_with("Integration verified."));
    }
}
