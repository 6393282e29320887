use indexmap::IndexMap;

/// A request parameter value: a single string or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

/// Params is the insertion-ordered parameter map passed to API requests.
pub type Params = IndexMap<String, ParamValue>;

impl ParamValue {
    /// The first value, if any
    pub fn first(&self) -> Option<&str> {
        match self {
            ParamValue::Single(v) => Some(v),
            ParamValue::Multi(values) => values.first().map(String::as_str),
        }
    }

    /// Iterate over every value
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            ParamValue::Single(v) => std::slice::from_ref(v),
            ParamValue::Multi(values) => values,
        };
        slice.iter().map(String::as_str)
    }

    /// Single value, only when this is not a list
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParamValue::Single(v) => Some(v),
            ParamValue::Multi(_) => None,
        }
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Single(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Single(v.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        ParamValue::Single(v.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Single(v.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::Single(v.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::Multi(v)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(v: Vec<&str>) -> Self {
        ParamValue::Multi(v.into_iter().map(str::to_string).collect())
    }
}

/// Flatten params into `(key, value)` pairs, one pair per list element.
pub fn flatten(params: &Params) -> Vec<(&str, &str)> {
    params
        .iter()
        .flat_map(|(k, v)| v.values().map(move |value| (k.as_str(), value)))
        .collect()
}

/// Build a [`Params`] map from literal pairs.
///
/// ```
/// let params = tripit::params! { "id" => "42", "format" => "json" };
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::Params::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Params::new();
        $( map.insert(($key).to_string(), $crate::ParamValue::from($value)); )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_multi_values() {
        let mut params = Params::new();
        params.insert("id".to_string(), "42".into());
        params.insert("tag".to_string(), vec!["b", "a"].into());

        assert_eq!(flatten(&params), vec![("id", "42"), ("tag", "b"), ("tag", "a")]);
    }

    #[test]
    fn test_first_and_single() {
        let single = ParamValue::from("json");
        assert_eq!(single.first(), Some("json"));
        assert_eq!(single.as_single(), Some("json"));

        let multi = ParamValue::from(vec!["x", "y"]);
        assert_eq!(multi.first(), Some("x"));
        assert_eq!(multi.as_single(), None);
    }

    #[test]
    fn test_params_macro_keeps_order() {
        let params = crate::params! { "z" => "1", "a" => 2i64 };
        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(params["a"], ParamValue::Single("2".to_string()));
    }
}
