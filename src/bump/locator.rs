use regex::Regex;

use crate::error::{BumpError, Result};
use crate::source::{CompilationUnit, Declaration, Initializer, Location};

/// A declaration whose name matched, with its current version text
pub struct DeclarationMatch<'a> {
    declaration: &'a mut dyn Declaration,
    pub name: String,
    pub location: Location,
    /// Literal value, or the default version when there was no initializer
    pub current: String,
}

impl<'a> DeclarationMatch<'a> {
    /// Write `version` into the declaration's value slot
    pub fn assign(&mut self, version: &str) {
        self.declaration.assign(version);
    }
}

/// Lazily yields matching declarations of one unit.
///
/// The first invalid initializer is yielded as an error and ends the
/// sequence. Matches handed out before it keep whatever was assigned to them.
pub struct Locator<'a> {
    declarations: std::vec::IntoIter<&'a mut dyn Declaration>,
    pattern: &'a Regex,
    default_version: &'a str,
    failed: bool,
}

/// Find declarations in `unit` whose name matches `pattern`
pub fn find_matches<'a>(
    unit: &'a mut dyn CompilationUnit,
    pattern: &'a Regex,
    default_version: &'a str,
) -> Locator<'a> {
    Locator {
        declarations: unit.declarations_mut().into_iter(),
        pattern,
        default_version,
        failed: false,
    }
}

impl<'a> Iterator for Locator<'a> {
    type Item = Result<DeclarationMatch<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for declaration in self.declarations.by_ref() {
            if !self.pattern.is_match(declaration.name()) {
                continue;
            }

            let current = match declaration.initializer() {
                Initializer::Absent => Ok(self.default_version.to_string()),
                Initializer::StringLiteral {
                    value: Some(value),
                    ..
                } => Ok(value),
                Initializer::StringLiteral {
                    raw,
                    value: None,
                    location,
                } => Err(BumpError::LiteralDecode(raw.to_string()).at(location.clone())),
                Initializer::Other { location } => {
                    Err(BumpError::NotAStringLiteral.at(location.clone()))
                }
            };

            return Some(match current {
                Ok(current) => Ok(DeclarationMatch {
                    name: declaration.name().to_string(),
                    location: declaration.location().clone(),
                    current,
                    declaration,
                }),
                Err(e) => {
                    self.failed = true;
                    Err(e)
                }
            });
        }

        None
    }
}
