use thiserror::Error;

use super::Fields;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("KeyError: '{0}'")]
    MissingKey(String),
    #[error("ValueError: positional field '{{}}' at byte {0}; templates take named fields only")]
    Positional(usize),
    #[error("ValueError: unmatched '{{' at byte {0}")]
    UnclosedField(usize),
    #[error("ValueError: single '}}' encountered at byte {0}")]
    StrayBrace(usize),
}

/// Substitutes `{name}` placeholders from `fields`.
///
/// `{{` and `}}` produce literal braces. A `:spec` or `!conv` suffix inside a
/// placeholder is accepted and ignored, so templates written for the old
/// bot keep working.
pub fn render(template: &str, fields: &Fields) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() * 2);
    let mut chars = template.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        match c {
            '{' if chars.peek().map(|&(_, next)| next) == Some('{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    field.push(c);
                }
                if !closed {
                    return Err(TemplateError::UnclosedField(at));
                }

                let name = field.split([':', '!']).next().unwrap_or_default().trim();
                if name.is_empty() {
                    return Err(TemplateError::Positional(at));
                }
                let value = fields
                    .get(name)
                    .ok_or_else(|| TemplateError::MissingKey(name.to_string()))?;
                out.push_str(value);
            }
            '}' if chars.peek().map(|&(_, next)| next) == Some('}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(TemplateError::StrayBrace(at)),
            c => out.push(c),
        }
    }

    Ok(out)
}
