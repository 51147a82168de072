//! Lexical word classes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Word classes understood by lexical resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WordClass {
    Adjective,
    Adverb,
    Noun,
    Verb,
}

impl WordClass {
    /// Every word class; an empty restriction list stands for this set.
    pub const ALL: [WordClass; 4] = [
        WordClass::Adjective,
        WordClass::Adverb,
        WordClass::Noun,
        WordClass::Verb,
    ];

    /// One-letter code used inside synset identifiers.
    pub fn code(self) -> char {
        match self {
            WordClass::Adjective => 'a',
            WordClass::Adverb => 'r',
            WordClass::Noun => 'n',
            WordClass::Verb => 'v',
        }
    }

    /// Parse a one-letter code (`a`, `r`, `n`, `v`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "a" => Some(WordClass::Adjective),
            "r" => Some(WordClass::Adverb),
            "n" => Some(WordClass::Noun),
            "v" => Some(WordClass::Verb),
            _ => None,
        }
    }

    /// Word class of a generic POS class name (`RB*`, `JJ*`, `NN*`, `VB*`).
    pub fn from_generic_pos(class: &str) -> Option<Self> {
        match class {
            "RB*" => Some(WordClass::Adverb),
            "JJ*" => Some(WordClass::Adjective),
            "NN*" => Some(WordClass::Noun),
            "VB*" => Some(WordClass::Verb),
            _ => None,
        }
    }
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for class in WordClass::ALL {
            assert_eq!(WordClass::from_code(&class.code().to_string()), Some(class));
        }
        assert_eq!(WordClass::from_code("x"), None);
    }

    #[test]
    fn test_generic_pos_mapping() {
        assert_eq!(WordClass::from_generic_pos("RB*"), Some(WordClass::Adverb));
        assert_eq!(WordClass::from_generic_pos("NN*"), Some(WordClass::Noun));
        assert_eq!(WordClass::from_generic_pos("#*"), None);
    }
}
