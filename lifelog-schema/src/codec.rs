//! Notification flag codec.
//!
//! The `options` column of a custom field is a plain string list. Whether
//! reminders are enabled for the field is stored in that same list as a
//! reserved sentinel token, so no dedicated column is needed. All encode and
//! decode logic for the sentinel lives here.

use serde::{Deserialize, Serialize};

/// Reserved token marking "notifications enabled" inside `options`.
pub const NOTIFICATION_SENTINEL: &str = "ENABLE_NOTIFICATION";

/// True iff `options` contains the sentinel exactly.
pub fn has_flag(options: &[String]) -> bool {
    options.iter().any(|o| o == NOTIFICATION_SENTINEL)
}

/// `options` with every sentinel occurrence removed.
pub fn strip(options: &[String]) -> Vec<String> {
    options
        .iter()
        .filter(|o| o.as_str() != NOTIFICATION_SENTINEL)
        .cloned()
        .collect()
}

/// User options with the sentinel appended iff `enabled`.
///
/// Any sentinel already present is dropped first, so the result holds the
/// sentinel at most once no matter how often this is applied.
pub fn encode(user_options: &[String], enabled: bool) -> Vec<String> {
    let mut options = strip(user_options);
    if enabled {
        options.push(NOTIFICATION_SENTINEL.to_string());
    }
    options
}

/// Partial update of the options column and the notification flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_notification: Option<bool>,
}

impl OptionsUpdate {
    /// True when neither attribute is supplied.
    pub fn is_empty(&self) -> bool {
        self.options.is_none() && self.enable_notification.is_none()
    }
}

/// Merge an update into the stored options.
///
/// The base list comes from the update when it carries options, otherwise
/// from the current list; the flag comes from the update when supplied,
/// otherwise from the current list.
pub fn merge_update(current: &[String], update: &OptionsUpdate) -> Vec<String> {
    let base = match &update.options {
        Some(options) => strip(options),
        None => strip(current),
    };
    let flag = update
        .enable_notification
        .unwrap_or_else(|| has_flag(current));
    encode(&base, flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sentinel_count(options: &[String]) -> usize {
        options.iter().filter(|o| *o == NOTIFICATION_SENTINEL).count()
    }

    #[test]
    fn has_flag_requires_exact_match() {
        assert!(has_flag(&opts(&["a", NOTIFICATION_SENTINEL])));
        assert!(!has_flag(&opts(&["enable_notification", "ENABLE_NOTIFICATION "])));
        assert!(!has_flag(&[]));
    }

    #[test]
    fn encode_appends_once() {
        assert_eq!(
            encode(&opts(&["x", NOTIFICATION_SENTINEL, NOTIFICATION_SENTINEL]), true),
            opts(&["x", NOTIFICATION_SENTINEL])
        );
        assert_eq!(encode(&opts(&["x", NOTIFICATION_SENTINEL]), false), opts(&["x"]));
    }

    #[test]
    fn merge_with_new_options_keeps_current_flag() {
        let current = opts(&["old", NOTIFICATION_SENTINEL]);
        let update = OptionsUpdate {
            options: Some(opts(&["new", "newer"])),
            enable_notification: None,
        };
        assert_eq!(
            merge_update(&current, &update),
            opts(&["new", "newer", NOTIFICATION_SENTINEL])
        );
    }

    #[test]
    fn merge_with_flag_only_keeps_current_options() {
        let current = opts(&["a", "b"]);
        let update = OptionsUpdate {
            options: None,
            enable_notification: Some(true),
        };
        assert_eq!(merge_update(&current, &update), opts(&["a", "b", NOTIFICATION_SENTINEL]));

        let update = OptionsUpdate {
            options: None,
            enable_notification: Some(false),
        };
        let disabled = merge_update(&opts(&["a", NOTIFICATION_SENTINEL]), &update);
        assert_eq!(disabled, opts(&["a"]));
    }

    #[test]
    fn merge_strips_sentinel_smuggled_in_update_options() {
        let update = OptionsUpdate {
            options: Some(opts(&[NOTIFICATION_SENTINEL, "a"])),
            enable_notification: Some(false),
        };
        assert_eq!(merge_update(&[], &update), opts(&["a"]));
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(OptionsUpdate::default().is_empty());
    }

    proptest! {
        #[test]
        fn encode_is_idempotent(
            list in prop::collection::vec(
                prop_oneof![Just(NOTIFICATION_SENTINEL.to_string()), "[a-z]{0,6}"],
                0..8,
            ),
            enabled in any::<bool>(),
        ) {
            let once = encode(&list, enabled);
            let twice = encode(&once, enabled);
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(sentinel_count(&twice), usize::from(enabled));
        }

        #[test]
        fn empty_merge_preserves_flag_semantics(
            list in prop::collection::vec(
                prop_oneof![Just(NOTIFICATION_SENTINEL.to_string()), "[a-z]{0,6}"],
                0..8,
            ),
        ) {
            let merged = merge_update(&list, &OptionsUpdate::default());
            prop_assert_eq!(has_flag(&merged), has_flag(&list));
            prop_assert_eq!(strip(&merged), strip(&list));
            prop_assert!(sentinel_count(&merged) <= 1);
        }
    }
}
