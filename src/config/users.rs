//! User nickname overrides loaded from environment variables.
//!
//! Discord names are often handles rather than real names. `USER_ID_<n>` /
//! `USER_NICKNAME_<n>` pairs (n = 1, 2) let the household pick the display name
//! the identity provider reports for each account.

use std::collections::HashMap;

const MAX_CONFIGURED_USERS: usize = 2;

/// Gets a mapping of user IDs to their configured nicknames from environment variables.
///
/// Only pairs where both the id and the nickname are set are included.
#[must_use]
pub fn get_user_nicknames() -> HashMap<String, String> {
    nicknames_from(|key| std::env::var(key).ok())
}

fn nicknames_from(lookup: impl Fn(&str) -> Option<String>) -> HashMap<String, String> {
    let mut nicknames = HashMap::new();

    for n in 1..=MAX_CONFIGURED_USERS {
        if let (Some(user_id), Some(nickname)) = (
            lookup(&format!("USER_ID_{n}")),
            lookup(&format!("USER_NICKNAME_{n}")),
        ) {
            nicknames.insert(user_id, nickname);
        }
    }

    nicknames
}

/// Gets the nickname for a given user ID, if configured.
#[must_use]
pub fn get_nickname(user_id: &str) -> Option<String> {
    get_user_nicknames().remove(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_get_nickname_returns_none_when_not_found() {
        assert!(get_nickname("nonexistent_user_id").is_none());
    }

    #[test]
    fn test_configured_pairs_are_mapped() {
        let nicknames = nicknames_from(vars(&[
            ("USER_ID_1", "111"),
            ("USER_NICKNAME_1", "Ana"),
            ("USER_ID_2", "222"),
            ("USER_NICKNAME_2", "Bruno"),
        ]));

        assert_eq!(nicknames.len(), 2);
        assert_eq!(nicknames.get("111").map(String::as_str), Some("Ana"));
        assert_eq!(nicknames.get("222").map(String::as_str), Some("Bruno"));
    }

    #[test]
    fn test_half_configured_pairs_are_skipped() {
        let nicknames = nicknames_from(vars(&[
            ("USER_ID_1", "111"),
            ("USER_NICKNAME_2", "Bruno"),
        ]));
        assert!(nicknames.is_empty());

        let nicknames = nicknames_from(vars(&[
            ("USER_ID_1", "111"),
            ("USER_ID_2", "222"),
            ("USER_NICKNAME_2", "Bruno"),
        ]));
        assert_eq!(nicknames.len(), 1);
        assert!(!nicknames.contains_key("111"));
        assert_eq!(nicknames.get("222").map(String::as_str), Some("Bruno"));
    }

    #[test]
    fn test_pairs_beyond_the_limit_are_ignored() {
        let nicknames = nicknames_from(vars(&[
            ("USER_ID_3", "333"),
            ("USER_NICKNAME_3", "Carla"),
        ]));
        assert!(nicknames.is_empty());
    }
}
