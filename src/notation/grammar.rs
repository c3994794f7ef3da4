//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::block::{Attributes, BlockNode, Value};
use crate::notation::lexer::Token;

/// Parse block notation into a forest of block nodes
pub fn parse(input: &str) -> Result<Vec<BlockNode>, Vec<crate::ParseError>> {
    let len = input.len();

    // Lex up front so stray characters are reported instead of skipped
    let tokens = crate::notation::lexer::lex(input)?;
    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    forest_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn forest_parser<'a, I>() -> impl Parser<'a, I, Vec<BlockNode>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let name = select! {
        Token::Name(s) => s,
    };

    // Keys are bare names, or quoted when they would not lex as one
    let key = choice((
        name.clone(),
        select! {
            Token::String(s) => s,
        },
    ));

    let number = just(Token::Minus)
        .or_not()
        .then(select! { Token::Number(n) => n })
        .map(|(neg, n)| Value::Number(if neg.is_some() { -n } else { n }));

    let value = choice((
        select! {
            Token::String(s) => Value::String(s),
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::Null => Value::Null,
        },
        number,
    ));

    let attribute = key
        .then_ignore(just(Token::Colon))
        .then(value)
        .map_with(|entry, e| (entry, e.span()));

    let attributes = attribute
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
        .validate(|entries, _extra, emitter| {
            let mut attrs = Attributes::new();
            for ((key, value), span) in entries {
                if attrs.contains_key(&key) {
                    emitter.emit(Rich::custom(
                        span,
                        format!("Duplicate attribute '{}'", key),
                    ));
                    continue;
                }
                attrs.insert(key, value);
            }
            attrs
        });

    let node = recursive(|node| {
        name.clone()
            .then(attributes.or_not())
            .then(
                node.repeated()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::BraceOpen), just(Token::BraceClose))
                    .or_not(),
            )
            .map(|((type_id, attributes), children)| BlockNode {
                type_id,
                attributes: attributes.unwrap_or_default(),
                children: children.unwrap_or_default(),
            })
    });

    node.repeated().collect::<Vec<_>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;

    #[test]
    fn test_parse_single_leaf() {
        let nodes = parse("core/image").expect("Should parse");
        assert_eq!(nodes, vec![BlockNode::new("core/image")]);
    }

    #[test]
    fn test_parse_attributes() {
        let nodes = parse(r#"core/button [text: "Read More", width: -1.5, rounded: false, id: null,]"#)
            .expect("Should parse");
        assert_eq!(nodes.len(), 1);
        let button = &nodes[0];
        assert_eq!(button.attr("text"), Some(&Value::from("Read More")));
        assert_eq!(button.attr("width"), Some(&Value::Number(-1.5)));
        assert_eq!(button.attr("rounded"), Some(&Value::Bool(false)));
        assert_eq!(button.attr("id"), Some(&Value::Null));
    }

    #[test]
    fn test_parse_quoted_key() {
        let nodes = parse(r#"core/group ["data key": 1]"#).expect("Should parse");
        assert_eq!(nodes[0].attr("data key"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_parse_nested_children() {
        let nodes = parse(
            r#"
            ltic/card-inner-text-block [templateLock: "false"] {
                core/heading
                core/paragraph
            }
            core/button
        "#,
        )
        .expect("Should parse");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].children.len(), 2);
        assert_eq!(nodes[0].children[1].type_id, "core/paragraph");
        assert_eq!(nodes[0].attr("templateLock"), Some(&Value::from("false")));
    }

    #[test]
    fn test_parse_empty_children_block() {
        let nodes = parse("core/group {}").expect("Should parse");
        assert!(nodes[0].children.is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        let nodes = parse("  // nothing here\n").expect("Should parse");
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_duplicate_attribute_rejected() {
        let errors = parse(r#"core/image [url: "a", url: "b"]"#).unwrap_err();
        assert_eq!(errors.len(), 1);
        let ParseError::Syntax { message, .. } = &errors[0];
        assert!(message.contains("Duplicate attribute 'url'"));
    }

    #[test]
    fn test_stray_character_rejected() {
        let errors = parse("core/image # caption").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span(), &(11..12));
    }

    #[test]
    fn test_unclosed_children_rejected() {
        let result = parse("core/group { core/heading");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_value_rejected() {
        let result = parse("core/image [url: ]");
        assert!(result.is_err());
    }
}
