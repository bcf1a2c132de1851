use crate::validation::reference::ReferenceLists;

/// Provider and username membership for one address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub is_free_provider: bool,
    pub is_common_username: bool,
}

/// Exact, case-sensitive membership tests against the loaded lists.
pub fn classify(lists: &ReferenceLists, hostname: &str, username: &str) -> Classification {
    Classification {
        is_free_provider: lists.is_free_provider(hostname),
        is_common_username: lists.is_common_username(username),
    }
}
