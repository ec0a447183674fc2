use std::{borrow::Cow, collections::HashMap};

/// The translation of one logical operator key: the rendered token and
/// whether the operator is rendered with function-call syntax instead of
/// infix placement.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorInfo {
    pub token: Cow<'static, str>,
    pub is_function: bool,
}

/// The translation of one logical function key.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInfo {
    pub name: Cow<'static, str>,
}

fn canonical(key: &str) -> String {
    key.to_ascii_lowercase()
}

/// A per-engine mutable table mapping logical operator keys to their
/// rendered form. Keys are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    entries: HashMap<String, OperatorInfo>,
}

impl OperatorRegistry {
    /// Adds or replaces a translation.
    pub fn add(&mut self, key: &str, token: impl Into<Cow<'static, str>>, is_function: bool) {
        self.entries.insert(
            canonical(key),
            OperatorInfo {
                token: token.into(),
                is_function,
            },
        );
    }

    /// Removes a translation, returning it when present.
    pub fn remove(&mut self, key: &str) -> Option<OperatorInfo> {
        self.entries.remove(&canonical(key))
    }

    /// Removes every translation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// `true` if the key has a translation.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&canonical(key))
    }

    /// The translation for the key, if any.
    pub fn get(&self, key: &str) -> Option<&OperatorInfo> {
        self.entries.get(&canonical(key))
    }

    /// The number of translations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the registry holds no translations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A per-engine mutable table mapping logical function keys to their
/// rendered name. Keys are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    entries: HashMap<String, FunctionInfo>,
}

impl FunctionRegistry {
    /// Adds or replaces a translation.
    pub fn add(&mut self, key: &str, name: impl Into<Cow<'static, str>>) {
        self.entries
            .insert(canonical(key), FunctionInfo { name: name.into() });
    }

    /// Removes a translation, returning it when present.
    pub fn remove(&mut self, key: &str) -> Option<FunctionInfo> {
        self.entries.remove(&canonical(key))
    }

    /// Removes every translation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// `true` if the key has a translation.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&canonical(key))
    }

    /// The translation for the key, if any.
    pub fn get(&self, key: &str) -> Option<&FunctionInfo> {
        self.entries.get(&canonical(key))
    }

    /// The number of translations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the registry holds no translations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The built-in operator table, consulted when the engine's registry has
/// no entry for a key.
pub(crate) fn default_operator(key: &str) -> Option<OperatorInfo> {
    let infix = |token: &'static str| OperatorInfo {
        token: token.into(),
        is_function: false,
    };

    let info = match canonical(key).as_str() {
        "and" => infix("AND"),
        "or" => infix("OR"),
        "not" => infix("NOT"),
        "eq" => infix("="),
        "ne" => infix("<>"),
        "gt" => infix(">"),
        "gte" => infix(">="),
        "lt" => infix("<"),
        "lte" => infix("<="),
        "like" => infix("LIKE"),
        "notlike" => infix("NOT LIKE"),
        "in" => infix("IN"),
        "notin" => infix("NOT IN"),
        "isnull" => infix("IS NULL"),
        "isnotnull" => infix("IS NOT NULL"),
        "concat" => infix("||"),
        "add" => infix("+"),
        "subtract" => infix("-"),
        "multiply" => infix("*"),
        "divide" => infix("/"),
        "modulo" => infix("%"),
        _ => return None,
    };

    Some(info)
}

/// The built-in function table, consulted when the engine's registry has
/// no entry for a key.
pub(crate) fn default_function(key: &str) -> Option<FunctionInfo> {
    let name: &'static str = match canonical(key).as_str() {
        "abs" => "ABS",
        "ceiling" => "CEILING",
        "floor" => "FLOOR",
        "round" => "ROUND",
        "upper" => "UPPER",
        "lower" => "LOWER",
        "length" => "LENGTH",
        "trim" => "TRIM",
        "count" => "COUNT",
        "sum" => "SUM",
        "avg" => "AVG",
        "min" => "MIN",
        "max" => "MAX",
        "coalesce" => "COALESCE",
        "substring" => "SUBSTRING",
        _ => return None,
    };

    Some(FunctionInfo { name: name.into() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let mut registry = FunctionRegistry::default();
        registry.add("Ceiling", "CEIL");

        assert!(registry.contains("CEILING"));
        assert_eq!("CEIL", registry.get("ceiling").unwrap().name);
    }

    #[test]
    fn removing_a_key_makes_it_unknown() {
        let mut registry = OperatorRegistry::default();
        registry.add("concat", "CONCAT", true);

        assert!(registry.remove("CONCAT").is_some());
        assert!(!registry.contains("concat"));
        assert!(registry.remove("concat").is_none());
    }

    #[test]
    fn clearing_drops_every_entry() {
        let mut registry = OperatorRegistry::default();
        registry.add("concat", "CONCAT", true);
        registry.add("eq", "==", false);
        registry.clear();

        assert!(registry.is_empty());
    }
}
