use std::collections::BTreeMap;
use std::fmt;

pub const ID_ATTRIBUTE: &str = "id";
pub const CLASS_ATTRIBUTE: &str = "class";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// A segment that is neither `key:value`, `#id` nor `.class`.
    InvalidSegment { segment: String, input: String },
    /// `:value`
    EmptyKey { segment: String, input: String },
    /// `key:`
    EmptyValue { segment: String, input: String },
    DuplicateKey { key: String, input: String },
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeError::InvalidSegment { segment, input } => write!(
                f,
                "invalid attribute syntax '{}' in '{{{}}}'",
                segment, input
            ),
            AttributeError::EmptyKey { segment, input } => {
                write!(f, "attribute '{}' has no key in '{{{}}}'", segment, input)
            }
            AttributeError::EmptyValue { segment, input } => {
                write!(f, "attribute '{}' has no value in '{{{}}}'", segment, input)
            }
            AttributeError::DuplicateKey { key, input } => {
                write!(f, "duplicate attribute '{}' in '{{{}}}'", key, input)
            }
        }
    }
}

impl std::error::Error for AttributeError {}

/// Attributes attached to a heading, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: BTreeMap<String, Attribute>,
}

/// How a segment named its key; shorthand classes may repeat, nothing else may.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Origin {
    Explicit,
    IdShorthand,
    ClassShorthand,
}

impl Attributes {
    /// Parse the text between `{` and `}`: `;`-separated `key:value`, `#id` and
    /// `.class` segments. Blank input yields no attributes.
    pub fn parse(input: &str) -> Result<Self, AttributeError> {
        let mut attributes = Attributes::default();
        if input.trim().is_empty() {
            return Ok(attributes);
        }

        let mut origins: BTreeMap<String, Origin> = BTreeMap::new();
        for segment in input.split(';').map(str::trim) {
            let (key, value, origin) = parse_segment(segment, input)?;

            match origins.get(&key) {
                None => {
                    origins.insert(key.clone(), origin);
                    attributes.entries.insert(key.clone(), Attribute { key, value });
                }
                Some(Origin::ClassShorthand) if origin == Origin::ClassShorthand => {
                    if let Some(existing) = attributes.entries.get_mut(&key) {
                        existing.value.push(' ');
                        existing.value.push_str(&value);
                    }
                }
                Some(_) => {
                    return Err(AttributeError::DuplicateKey {
                        key,
                        input: input.to_string(),
                    });
                }
            }
        }

        Ok(attributes)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|a| a.value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.get(ID_ATTRIBUTE)
    }

    /// Class names from `.class` shorthands or an explicit `class` key.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get(CLASS_ATTRIBUTE)
            .into_iter()
            .flat_map(str::split_whitespace)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.values()
    }
}

fn parse_segment(segment: &str, input: &str) -> Result<(String, String, Origin), AttributeError> {
    let invalid = || AttributeError::InvalidSegment {
        segment: segment.to_string(),
        input: input.to_string(),
    };

    let (key, value, origin) = if let Some(id) = segment.strip_prefix('#') {
        (ID_ATTRIBUTE, id.trim(), Origin::IdShorthand)
    } else if let Some(class) = segment.strip_prefix('.') {
        (CLASS_ATTRIBUTE, class.trim(), Origin::ClassShorthand)
    } else {
        let (key, value) = segment.split_once(':').ok_or_else(invalid)?;
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() {
            return Err(AttributeError::EmptyKey {
                segment: segment.to_string(),
                input: input.to_string(),
            });
        }
        if value.is_empty() {
            return Err(AttributeError::EmptyValue {
                segment: segment.to_string(),
                input: input.to_string(),
            });
        }
        (key, value, Origin::Explicit)
    };

    if value.is_empty() {
        return Err(invalid());
    }
    Ok((key.to_string(), value.to_string(), origin))
}
