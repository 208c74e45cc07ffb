use crate::{
    config::DialectConfig,
    error::QueryError,
    lambda::{
        ConditionNode, ConditionTree, Connective, ParameterMap, PredicateOp,
        scan::{
            find_outside_quotes, last_segment, matching_paren, skip_quoted,
            split_top_level_comma, unquote,
        },
    },
};
use std::borrow::Cow;

const CONTAINS_CALL: &[u8] = b"contains(";
const EQ_TOKEN: &str = " eq ";
const BOUNDARIES: [(&[u8], Connective); 2] =
    [(b" and ", Connective::And), (b" or ", Connective::Or)];

/// Compile a lambda body with the default dialect.
pub fn compile(expression: &str) -> Result<(ConditionTree, ParameterMap), QueryError> {
    compile_with(expression, &DialectConfig::default())
}

/// Compile a lambda body into a condition tree and its parameter bindings.
///
/// `expression` is the text after the bound variable, e.g. `x/name eq 'a'`
/// for `tags/any(x: x/name eq 'a')`. Parameter numbering restarts at zero on
/// every call.
pub fn compile_with(
    expression: &str,
    config: &DialectConfig,
) -> Result<(ConditionTree, ParameterMap), QueryError> {
    let mut compiler = Compiler {
        source: expression,
        config,
        params: ParameterMap::new(),
        next_param: 0,
    };

    let nodes = compiler.compile_sequence(expression)?;
    let tree = ConditionTree::new(nodes);
    tree.validate()
        .map_err(|reason| QueryError::malformed_expression(expression, reason))?;

    Ok((tree, compiler.params))
}

///
/// Compiler
///
/// Per-call compile state. The parameter counter is shared by nested groups
/// so names stay unique across the whole expression.
///

struct Compiler<'a> {
    source: &'a str,
    config: &'a DialectConfig,
    params: ParameterMap,
    next_param: usize,
}

impl Compiler<'_> {
    fn compile_sequence(&mut self, text: &str) -> Result<Vec<ConditionNode>, QueryError> {
        let bytes = text.as_bytes();
        let mut nodes = Vec::new();
        let mut cursor = 0;
        let mut span_start = 0;

        while cursor < bytes.len() {
            let rest = &bytes[cursor..];

            // literals never contain structure
            if matches!(bytes[cursor], b'\'' | b'"') {
                cursor = skip_quoted(bytes, cursor)
                    .ok_or_else(|| self.malformed("unterminated string literal"))?;
                continue;
            }

            if rest.starts_with(CONTAINS_CALL) {
                let open = cursor + CONTAINS_CALL.len() - 1;
                let close = matching_paren(text, open)
                    .ok_or_else(|| self.malformed("unbalanced parentheses in contains()"))?;
                cursor = close + 1;
                continue;
            }

            if let Some((token, kind)) = BOUNDARIES
                .iter()
                .find(|(token, _)| rest.starts_with(token))
            {
                self.close_span(&mut nodes, &text[span_start..cursor])?;
                nodes.push(ConditionNode::operator(*kind));
                cursor += token.len();
                span_start = cursor;
                continue;
            }

            match bytes[cursor] {
                b'(' => {
                    let close = matching_paren(text, cursor)
                        .ok_or_else(|| self.malformed("unbalanced parentheses"))?;

                    if text[span_start..cursor].trim().is_empty() {
                        let children = self.compile_sequence(&text[cursor + 1..close])?;
                        nodes.push(ConditionNode::group(children));
                        span_start = close + 1;
                    }
                    // otherwise the parentheses belong to the pending predicate text
                    cursor = close + 1;
                }
                b')' => return Err(self.malformed("unexpected ')'")),
                _ => cursor += 1,
            }
        }

        let tail = &text[span_start..];
        if !tail.trim().is_empty() {
            self.close_span(&mut nodes, tail)?;
        }

        Ok(nodes)
    }

    // Turn the pending span into a predicate. A blank span right after a
    // group is expected (`(...) and ...`); anywhere else it is an error.
    fn close_span(
        &mut self,
        nodes: &mut Vec<ConditionNode>,
        span: &str,
    ) -> Result<(), QueryError> {
        let span = span.trim();
        if span.is_empty() {
            return match nodes.last() {
                Some(ConditionNode::Group { .. }) => Ok(()),
                _ => Err(self.malformed("missing operand")),
            };
        }

        let node = self.predicate(span)?;
        nodes.push(node);

        Ok(())
    }

    fn predicate(&mut self, span: &str) -> Result<ConditionNode, QueryError> {
        let (column, operator, value) = classify(span)?;

        let param_name = self.config.param_name(self.next_param);
        self.next_param += 1;

        let value = match operator {
            PredicateOp::Eq => value.into_owned(),
            PredicateOp::Contains => self.config.wrap_wildcard(&value),
        };
        self.params.insert(param_name.clone(), value)?;

        Ok(ConditionNode::predicate(column, operator, param_name))
    }

    fn malformed(&self, reason: &str) -> QueryError {
        QueryError::malformed_expression(self.source, reason)
    }
}

// Split a predicate span into (column, operator, literal).
fn classify(span: &str) -> Result<(&str, PredicateOp, Cow<'_, str>), QueryError> {
    if let Some(at) = find_outside_quotes(span, EQ_TOKEN) {
        let column = last_segment(span[..at].trim());
        let literal = span[at + EQ_TOKEN.len()..].trim();

        if column.is_empty() || literal.is_empty() {
            return Err(QueryError::malformed_predicate(span));
        }

        return Ok((column, PredicateOp::Eq, unquote(literal)));
    }

    if let Some(at) = find_outside_quotes(span, "contains") {
        let open = span[at..]
            .find('(')
            .map(|offset| at + offset)
            .ok_or_else(|| QueryError::malformed_predicate(span))?;
        let close =
            matching_paren(span, open).ok_or_else(|| QueryError::malformed_predicate(span))?;
        if !span[close + 1..].trim().is_empty() {
            return Err(QueryError::malformed_predicate(span));
        }

        let (path, literal) = split_top_level_comma(&span[open + 1..close])
            .ok_or_else(|| QueryError::malformed_predicate(span))?;
        let column = last_segment(path.trim());
        let value = unquote(literal.trim());

        if column.is_empty() {
            return Err(QueryError::malformed_predicate(span));
        }

        return Ok((column, PredicateOp::Contains, value));
    }

    Err(QueryError::malformed_predicate(span))
}
