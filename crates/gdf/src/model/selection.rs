//! Attribute selection for reading and writing.

/// Which attributes to carry through a decode or encode call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every attribute.
    #[default]
    All,
    /// No attributes at all.
    None,
    /// Only the named attributes. Unknown names are ignored.
    Names(Vec<String>),
}

impl Selection {
    /// Selects the given attribute names.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Names(names.into_iter().map(Into::into).collect())
    }

    /// Returns true if the attribute `name` is selected.
    pub fn includes(&self, name: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::None => false,
            Selection::Names(names) => names.iter().any(|n| n == name),
        }
    }

    /// Picks the selected names out of `available`.
    ///
    /// `All` keeps the order of `available`; `Names` uses the caller's
    /// order, dropping names that are not available and repeats.
    pub fn pick(&self, available: Vec<String>) -> Vec<String> {
        match self {
            Selection::All => available,
            Selection::None => Vec::new(),
            Selection::Names(names) => {
                let mut picked: Vec<String> = Vec::with_capacity(names.len());
                for name in names {
                    if available.contains(name) && !picked.contains(name) {
                        picked.push(name.clone());
                    }
                }
                picked
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_includes() {
        assert!(Selection::All.includes("x"));
        assert!(!Selection::None.includes("x"));
        let names = Selection::names(["x", "y"]);
        assert!(names.includes("y"));
        assert!(!names.includes("z"));
    }

    #[test]
    fn test_pick() {
        let available = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(Selection::All.pick(available.clone()), available);
        assert!(Selection::None.pick(available.clone()).is_empty());
        assert_eq!(
            Selection::names(["c", "missing", "a", "c"]).pick(available),
            vec!["c".to_string(), "a".to_string()]
        );
    }
}
