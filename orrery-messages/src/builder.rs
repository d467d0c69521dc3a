use std::collections::HashMap;

/// Fills `{name}` placeholders in a message template.
pub struct MessageBuilder {
    template: &'static str,
    vars: HashMap<&'static str, String>,
}

impl MessageBuilder {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            vars: HashMap::new(),
        }
    }

    pub fn var(mut self, key: &'static str, value: impl ToString) -> Self {
        self.vars.insert(key, value.to_string());
        self
    }

    /// Substitutes in one pass over the template, so text inside a value is
    /// never expanded again.
    pub fn build(self) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template;
        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let key = &after[..close];
                    match self.vars.get(key) {
                        Some(value) => result.push_str(value),
                        None => {
                            result.push('{');
                            result.push_str(key);
                            result.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    result.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        result.push_str(rest);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_every_occurrence() {
        let text = MessageBuilder::new("{name} then {name} at {path}")
            .var("name", "freeglut")
            .var("path", "dependencies/freeglut")
            .build();
        assert_eq!(text, "freeglut then freeglut at dependencies/freeglut");
    }

    #[test]
    fn test_values_are_not_expanded_again() {
        for _ in 0..8 {
            let text = MessageBuilder::new("Could not convert {source}: {error}")
                .var("source", "data/{error}/mars.jpg")
                .var("error", "bad {source} marker")
                .build();
            assert_eq!(
                text,
                "Could not convert data/{error}/mars.jpg: bad {source} marker"
            );
        }
    }

    #[test]
    fn test_unclosed_brace_is_kept() {
        let text = MessageBuilder::new("{name} {oops").var("name", "cjson").build();
        assert_eq!(text, "cjson {oops");
    }

    #[test]
    fn test_unknown_placeholders_are_left_alone() {
        let text = MessageBuilder::new("{converted} of {total}")
            .var("converted", 3)
            .build();
        assert_eq!(text, "3 of {total}");
    }
}
