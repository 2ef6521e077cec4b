// ABOUTME: Result-shape inference for one extraction key, computed once from the request.
// ABOUTME: Decides scalar vs. array output and whether every matched node is visited.

use serde_json::Value;

use crate::extractors::descriptor::Request;

/// How a key's request wants its nodes matched and its values returned.
///
/// The shape depends only on how the request is written, never on how many
/// nodes the document happens to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape {
    /// One node, first value, returned as a string or `null`.
    Scalar,
    /// One node, every requested attribute, returned as an array.
    Attributes,
    /// Every matched node, returned as a flat array.
    Collection,
}

/// Which of the matched nodes the selector resolver keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The first match, or the last one when reversed.
    First,
    /// The whole match sequence, reversed and limited.
    All,
}

impl RequestShape {
    /// Wrapping or a selector list makes a collection; an attribute list alone
    /// keeps a single node but still returns an array.
    pub fn of(request: &Request) -> Self {
        let descriptor = request.descriptor();
        if request.is_wrapped() || descriptor.selector.is_many() {
            RequestShape::Collection
        } else if descriptor.get.as_ref().is_some_and(|get| get.is_many()) {
            RequestShape::Attributes
        } else {
            RequestShape::Scalar
        }
    }

    pub fn match_mode(self) -> MatchMode {
        match self {
            RequestShape::Collection => MatchMode::All,
            RequestShape::Scalar | RequestShape::Attributes => MatchMode::First,
        }
    }

    pub fn is_array(self) -> bool {
        self != RequestShape::Scalar
    }

    /// Turn the flat value list into the key's output value.
    pub fn shape_values(self, values: Vec<String>) -> Value {
        if self.is_array() {
            Value::Array(values.into_iter().map(Value::String).collect())
        } else {
            values.into_iter().next().map_or(Value::Null, Value::String)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::descriptor::Descriptor;
    use serde_json::json;

    #[test]
    fn single_selector_single_attribute_is_scalar() {
        let request: Request = Descriptor::new("h1").get("text").into();
        assert_eq!(request.shape(), RequestShape::Scalar);
        assert_eq!(request.shape().match_mode(), MatchMode::First);
    }

    #[test]
    fn attribute_list_is_array_over_one_node() {
        let request: Request = Descriptor::new(".title").get(["class", "id"]).into();
        assert_eq!(request.shape(), RequestShape::Attributes);
        assert_eq!(request.shape().match_mode(), MatchMode::First);
        assert!(request.shape().is_array());
    }

    #[test]
    fn selector_list_is_collection() {
        let request: Request = Descriptor::new(["h1", "p"]).into();
        assert_eq!(request.shape(), RequestShape::Collection);
        assert_eq!(request.shape().match_mode(), MatchMode::All);
    }

    #[test]
    fn wrapping_is_collection_even_for_single_selector() {
        let request = Descriptor::new("p").wrapped();
        assert_eq!(request.shape(), RequestShape::Collection);
    }

    #[test]
    fn one_element_selector_list_is_still_collection() {
        let request: Request = Descriptor::new(vec!["p"]).into();
        assert_eq!(request.shape(), RequestShape::Collection);
    }

    #[test]
    fn shape_values_scalar_takes_first_or_null() {
        assert_eq!(
            RequestShape::Scalar.shape_values(vec!["a".into(), "b".into()]),
            json!("a")
        );
        assert_eq!(RequestShape::Scalar.shape_values(vec![]), Value::Null);
    }

    #[test]
    fn shape_values_array_keeps_everything() {
        assert_eq!(
            RequestShape::Collection.shape_values(vec!["a".into(), "b".into()]),
            json!(["a", "b"])
        );
        assert_eq!(RequestShape::Attributes.shape_values(vec![]), json!([]));
    }
}
