use std::collections::HashMap;

use chanlog_core::Error;
use indexmap::IndexSet;

/// Static group name to channel names mapping.
#[derive(Debug, Clone, Default)]
pub struct Groups {
    groups: HashMap<String, Vec<String>>,
}

impl Groups {
    pub fn new(groups: HashMap<String, Vec<String>>) -> Self {
        Self { groups }
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Union of the members of `groups`, first occurrence first.
    ///
    /// Groups without members add nothing to the union. Fails with
    /// [`Error::EmptyGroup`] only when every requested group is empty.
    pub fn expand<S: AsRef<str>>(&self, groups: &[S]) -> Result<Vec<String>, Error> {
        let mut names = IndexSet::new();
        for group in groups {
            let group = group.as_ref();
            let members = self
                .groups
                .get(group)
                .ok_or_else(|| Error::GroupNotFound(group.to_string()))?;
            names.extend(members.iter().cloned());
        }
        match groups.first() {
            Some(first) if names.is_empty() => Err(Error::EmptyGroup(first.as_ref().to_string())),
            _ => Ok(names.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Groups {
        Groups::new(HashMap::from([
            ("g1".to_string(), vec!["a".to_string(), "b".to_string()]),
            ("g2".to_string(), vec!["b".to_string(), "c".to_string()]),
            ("none".to_string(), vec![]),
        ]))
    }

    #[test]
    fn test_overlapping_groups_are_deduplicated() {
        assert_eq!(groups().expand(&["g1", "g2"]).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(groups().expand(&["g2", "g1"]).unwrap(), vec!["b", "c", "a"]);
        assert_eq!(groups().expand(&["g1", "g1"]).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_group() {
        assert!(matches!(
            groups().expand(&["g1", "nogroup"]),
            Err(Error::GroupNotFound(name)) if name == "nogroup"
        ));
    }

    #[test]
    fn test_empty_group() {
        assert!(matches!(
            groups().expand(&["none"]),
            Err(Error::EmptyGroup(name)) if name == "none"
        ));
        assert!(matches!(
            groups().expand(&["none", "none"]),
            Err(Error::EmptyGroup(name)) if name == "none"
        ));
        assert!(groups().expand::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_empty_group_joins_the_union() {
        assert_eq!(groups().expand(&["g1", "none"]).unwrap(), vec!["a", "b"]);
        assert_eq!(groups().expand(&["none", "g2"]).unwrap(), vec!["b", "c"]);
    }

    #[test]
    fn test_unknown_group_fails_even_after_empty_one() {
        assert!(matches!(
            groups().expand(&["none", "nogroup"]),
            Err(Error::GroupNotFound(name)) if name == "nogroup"
        ));
    }
}
