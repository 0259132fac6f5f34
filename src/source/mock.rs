use std::path::{Path, PathBuf};

use crate::source::{CompilationUnit, Declaration, Initializer, Location};

/// In-memory compilation unit for testing without parsing any source
pub struct MemoryUnit {
    path: PathBuf,
    declarations: Vec<MemoryDeclaration>,
}

pub struct MemoryDeclaration {
    name: String,
    location: Location,
    value: MemoryValue,
    assigned: Option<String>,
}

enum MemoryValue {
    Absent,
    Literal {
        raw: String,
        value: Option<String>,
        location: Location,
    },
    Expression {
        text: String,
        location: Location,
    },
}

impl MemoryUnit {
    /// Create a new empty unit
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MemoryUnit {
            path: path.into(),
            declarations: Vec::new(),
        }
    }

    fn push(mut self, name: &str, value: impl FnOnce(Location) -> MemoryValue) -> Self {
        let line = self.declarations.len() + 1;
        let file = self.path.display().to_string();
        let value_location = Location::new(file.clone(), line, name.len() + 8);
        self.declarations.push(MemoryDeclaration {
            name: name.to_string(),
            location: Location::new(file, line, 5),
            value: value(value_location),
            assigned: None,
        });
        self
    }

    /// Add a declaration initialized with a string literal holding `value`
    pub fn with_literal(self, name: &str, value: &str) -> Self {
        self.push(name, |location| MemoryValue::Literal {
            raw: format!("{:?}", value),
            value: Some(value.to_string()),
            location,
        })
    }

    /// Add a declaration whose string literal cannot be decoded
    pub fn with_undecodable_literal(self, name: &str, raw: &str) -> Self {
        self.push(name, |location| MemoryValue::Literal {
            raw: raw.to_string(),
            value: None,
            location,
        })
    }

    /// Add a declaration initialized with a non-literal expression
    pub fn with_expression(self, name: &str, text: &str) -> Self {
        self.push(name, |location| MemoryValue::Expression {
            text: text.to_string(),
            location,
        })
    }

    /// Add a declaration without an initializer
    pub fn without_value(self, name: &str) -> Self {
        self.push(name, |_| MemoryValue::Absent)
    }

    /// The value assigned to the first declaration called `name`, if any
    pub fn assigned(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.name == name)
            .and_then(|d| d.assigned.as_deref())
    }

    /// Values assigned so far, in declaration order
    pub fn assignments(&self) -> Vec<(&str, &str)> {
        self.declarations
            .iter()
            .filter_map(|d| d.assigned.as_deref().map(|v| (d.name.as_str(), v)))
            .collect()
    }
}

impl CompilationUnit for MemoryUnit {
    fn path(&self) -> &Path {
        &self.path
    }

    fn declarations_mut(&mut self) -> Vec<&mut dyn Declaration> {
        self.declarations
            .iter_mut()
            .map(|d| d as &mut dyn Declaration)
            .collect()
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for decl in &self.declarations {
            let value = match (&decl.assigned, &decl.value) {
                (Some(assigned), _) => Some(format!("{:?}", assigned)),
                (None, MemoryValue::Absent) => None,
                (None, MemoryValue::Literal { raw, .. }) => Some(raw.clone()),
                (None, MemoryValue::Expression { text, .. }) => Some(text.clone()),
            };
            match value {
                Some(value) => out.push_str(&format!("var {} = {}\n", decl.name, value)),
                None => out.push_str(&format!("var {}\n", decl.name)),
            }
        }
        out
    }
}

impl Declaration for MemoryDeclaration {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> &Location {
        &self.location
    }

    fn initializer(&self) -> Initializer<'_> {
        match &self.value {
            MemoryValue::Absent => Initializer::Absent,
            MemoryValue::Literal {
                raw,
                value,
                location,
            } => Initializer::StringLiteral {
                raw,
                value: value.clone(),
                location,
            },
            MemoryValue::Expression { location, .. } => Initializer::Other { location },
        }
    }

    fn assign(&mut self, value: &str) {
        self.assigned = Some(value.to_string());
    }
}
