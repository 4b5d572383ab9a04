use ulid::Ulid;

/// Opaque token for ingredients, custom slots, shopping items and templates.
///
/// A ULID is a millisecond timestamp followed by 80 random bits, so ids
/// created in quick succession are distinct with overwhelming probability.
/// Uniqueness is not checked against existing ids.
pub fn new_id() -> String {
    Ulid::new().to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn rapid_ids_do_not_collide() {
        let ids = (0..1000).map(|_| new_id()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn ids_never_contain_key_separator() {
        assert!(!new_id().contains('_'));
    }
}
