use std::fmt;

/// Document-local identifier of an element owned by the assembling document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    /// Identifier of the document element itself.
    pub fn document() -> Self {
        Self("SPDXRef-DOCUMENT".to_string())
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Either a locally owned element or an element of another SBOM reached
/// through an external document reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Local(ElementId),
    External {
        document_ref: String,
        element_id: String,
    },
}

impl ElementRef {
    pub fn local(&self) -> Option<&ElementId> {
        match self {
            ElementRef::Local(id) => Some(id),
            ElementRef::External { .. } => None,
        }
    }
}

impl From<ElementId> for ElementRef {
    fn from(id: ElementId) -> Self {
        ElementRef::Local(id)
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRef::Local(id) => write!(f, "{}", id),
            ElementRef::External {
                document_ref,
                element_id,
            } => write!(f, "{}:{}", document_ref, element_id),
        }
    }
}

/// Issues monotonically increasing local IDs for one document.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `SPDXRef-<kind>-<n>`; kind is sanitized to the idstring alphabet.
    pub fn allocate(&mut self, kind: &str) -> ElementId {
        self.next += 1;
        let kind: String = kind
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        ElementId(format!("SPDXRef-{}-{}", kind, self.next))
    }
}
