use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\$\{([^{}]+)\}").expect("placeholder regex must compile"))
}

/// Name→value map backing `${name}` substitution in command arguments.
///
/// The store is never reset by the engine; its lifetime is whatever the
/// caller gives the surrounding context, which may span several test cases.
#[derive(Debug, Clone, Default)]
pub struct VarStore {
    values: BTreeMap<String, String>,
}

impl VarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Missing variables read as the empty string, by convention.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Single non-recursive pass: a substituted value is never re-scanned,
    /// and markers naming an unset variable pass through verbatim.
    pub fn substitute(&self, template: &str) -> String {
        let regex = placeholder_regex();
        let mut output = String::new();
        let mut last_index = 0usize;
        for captures in regex.captures_iter(template) {
            let full = captures
                .get(0)
                .expect("capture group 0 must exist for each regex capture");
            let name = captures
                .get(1)
                .expect("capture group 1 must exist for each regex capture");
            output.push_str(&template[last_index..full.start()]);
            match self.values.get(name.as_str()) {
                Some(value) => output.push_str(value),
                None => output.push_str(full.as_str()),
            }
            last_index = full.end();
        }
        output.push_str(&template[last_index..]);
        output
    }

    /// Applies [`substitute`](Self::substitute) to each template
    /// independently, preserving argument order and count.
    pub fn substitute_all(&self, templates: &[String]) -> Vec<String> {
        templates
            .iter()
            .map(|template| self.substitute(template))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_reads_as_empty() {
        let store = VarStore::new();
        assert_eq!(store.get("absent"), "");
    }

    #[test]
    fn substitute_replaces_known_markers() {
        let mut store = VarStore::new();
        store.set("user", "alice");
        assert_eq!(store.substitute("hello ${user}!"), "hello alice!");
    }

    #[test]
    fn unresolved_markers_pass_through_verbatim() {
        let store = VarStore::new();
        assert_eq!(store.substitute("hello ${user}!"), "hello ${user}!");
    }

    #[test]
    fn substitution_is_not_recursive() {
        let mut store = VarStore::new();
        store.set("x", "${y}");
        store.set("y", "surprise");
        assert_eq!(store.substitute("${x}"), "${y}");
    }

    #[test]
    fn substitute_all_preserves_order_and_count() {
        let mut store = VarStore::new();
        store.set("a", "1");
        let templates = vec![
            "${a}".to_string(),
            "${b}".to_string(),
            "plain".to_string(),
        ];
        assert_eq!(
            store.substitute_all(&templates),
            vec!["1".to_string(), "${b}".to_string(), "plain".to_string()]
        );
    }

    #[test]
    fn several_markers_in_one_template() {
        let mut store = VarStore::new();
        store.set("a", "1");
        store.set("b", "2");
        assert_eq!(store.substitute("${a}+${b}=${c}"), "1+2=${c}");
    }
}
