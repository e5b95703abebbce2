use std::{borrow::Borrow, fmt::Display};

use serde::{Deserialize, Serialize};

pub mod closure;
pub mod construction;
pub mod dfa;
pub mod nfa;
pub mod steps;
pub mod subset;

/// Declares an opaque, string-labelled identifier type.
macro_rules! label_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(label: impl Into<String>) -> Self {
                $name(label.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

label_type!(
    /// A state of an NFA. States are compared and ordered by their label.
    State
);

label_type!(
    /// An input symbol. The epsilon marker is never a symbol.
    Symbol
);

pub trait Alphabet {
    /// The input symbols in their declared order.
    fn alphabet(&self) -> &[Symbol];
}

/// The basic trait for anything that defines a language over a set alphabet.
pub trait Language: Alphabet {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> bool;
}

#[test]
fn test_labels_order_lexicographically() {
    let mut states = vec![State::from("q2"), State::from("q10"), State::from("p")];
    states.sort();
    assert_eq!(
        states.iter().map(State::as_str).collect::<Vec<_>>(),
        vec!["p", "q10", "q2"]
    );
}
