use crate::ast::Expression;
use crate::error::{Error, ErrorKind};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    Text(String),
    Arg(usize),
}

/// A raw SQL fragment built from a template with `{N}` placeholders
/// referencing the supplied arguments, and `{{` / `}}` escaping literal
/// braces. The template is parsed once at construction; any malformed or
/// out-of-range placeholder is a format error raised here, never at
/// compile time.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSql<'a> {
    pub(crate) segments: Vec<Segment>,
    pub(crate) args: Vec<Expression<'a>>,
}

impl<'a> RawSql<'a> {
    /// Parses the template and pairs it with its arguments.
    pub fn new(template: &str, args: Vec<Expression<'a>>) -> crate::Result<Self> {
        let segments = parse_template(template, args.len())?;

        Ok(RawSql { segments, args })
    }

    /// The number of supplied arguments.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }
}

fn parse_template(template: &str, arg_count: usize) -> crate::Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    text.push('{');
                    continue;
                }

                let mut digits = String::new();

                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) if d.is_ascii_digit() => digits.push(d),
                        Some(d) => {
                            let kind = ErrorKind::format(format!(
                                "unexpected character `{d}` in placeholder"
                            ));
                            return Err(Error::builder(kind).build());
                        }
                        None => {
                            let kind = ErrorKind::format("unterminated placeholder");
                            return Err(Error::builder(kind).build());
                        }
                    }
                }

                if digits.is_empty() {
                    let kind = ErrorKind::format("empty placeholder");
                    return Err(Error::builder(kind).build());
                }

                let index: usize = digits.parse().map_err(|_| {
                    Error::builder(ErrorKind::format(format!(
                        "placeholder index `{digits}` is not a valid number"
                    )))
                    .build()
                })?;

                if index >= arg_count {
                    let kind = ErrorKind::format(format!(
                        "placeholder {{{index}}} is out of range for {arg_count} argument(s)"
                    ));
                    return Err(Error::builder(kind).build());
                }

                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }

                segments.push(Segment::Arg(index));
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    text.push('}');
                } else {
                    let kind = ErrorKind::format("unbalanced `}` outside a placeholder");
                    return Err(Error::builder(kind).build());
                }
            }
            c => text.push(c),
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;

    #[test]
    fn parses_a_plain_template() {
        let raw = RawSql::new("SELECT 1", Vec::new()).unwrap();
        assert_eq!(vec![Segment::Text("SELECT 1".into())], raw.segments);
    }

    #[test]
    fn parses_placeholders_and_literal_braces() {
        let raw = RawSql::new(
            "json_extract({0}, '{{a}}') = {1}",
            vec![Value::text("col").into(), Value::integer(1).into()],
        )
        .unwrap();

        assert_eq!(
            vec![
                Segment::Text("json_extract(".into()),
                Segment::Arg(0),
                Segment::Text(", '{a}') = ".into()),
                Segment::Arg(1),
            ],
            raw.segments
        );
    }

    #[test]
    fn an_out_of_range_index_is_a_format_error() {
        let err = RawSql::new("{1}", vec![Value::integer(1).into()]).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn an_unterminated_placeholder_is_a_format_error() {
        let err = RawSql::new("{0", vec![Value::integer(1).into()]).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn a_non_numeric_placeholder_is_a_format_error() {
        let err = RawSql::new("{a}", vec![Value::integer(1).into()]).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn a_stray_closing_brace_is_a_format_error() {
        let err = RawSql::new("a } b", Vec::new()).unwrap_err();
        assert!(err.is_format_error());
    }
}
