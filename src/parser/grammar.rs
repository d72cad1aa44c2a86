//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::layout::Measure;
use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse constraint text such as `top: 10, left: 50%, size: (20, 20)`
pub fn parse(input: &str) -> Result<ConstraintList, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    constraints_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn constraints_parser<'a, I>(
) -> impl Parser<'a, I, ConstraintList, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let number = select! {
        Token::Number(n) => n,
    };

    // `12`, `-4`, `50%`
    let measure = just(Token::Minus)
        .or_not()
        .then(number)
        .then(just(Token::Percent).or_not())
        .map(|((neg, n), percent)| {
            let value = if neg.is_some() { -n } else { n };
            if percent.is_some() {
                Measure::Percent(value)
            } else {
                Measure::Px(value)
            }
        });

    // `(a, b)`
    let pair = measure
        .clone()
        .then_ignore(just(Token::Comma))
        .then(measure.clone())
        .delimited_by(just(Token::ParenOpen), just(Token::ParenClose));

    // `{ x: a, y: b }`
    let point = just(Token::X)
        .ignore_then(just(Token::Colon))
        .ignore_then(measure.clone())
        .then_ignore(just(Token::Comma))
        .then(
            just(Token::Y)
                .ignore_then(just(Token::Colon))
                .ignore_then(measure.clone()),
        )
        .then_ignore(just(Token::Comma).or_not())
        .delimited_by(just(Token::BraceOpen), just(Token::BraceClose));

    let edge_key = choice((
        just(Token::Top).to(EdgeKey::Top),
        just(Token::Right).to(EdgeKey::Right),
        just(Token::Bottom).to(EdgeKey::Bottom),
        just(Token::Left).to(EdgeKey::Left),
        just(Token::Width).to(EdgeKey::Width),
        just(Token::Height).to(EdgeKey::Height),
    ));

    let edge = edge_key
        .then_ignore(just(Token::Colon))
        .then(measure.clone())
        .map(|(key, value)| Entry::Edge(key, value));

    let size = just(Token::Size)
        .ignore_then(just(Token::Colon))
        .ignore_then(pair.clone())
        .map(|(w, h)| Entry::Size(w, h));

    let center = just(Token::Center)
        .ignore_then(just(Token::Colon))
        .ignore_then(choice((pair, point)))
        .map(|(x, y)| Entry::Center(x, y));

    let entry = choice((edge, size, center))
        .map_with(|entry, e| Spanned::new(entry, span_range(&e.span())));

    entry
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|entries| ConstraintList { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Center, Constraints};

    #[test]
    fn test_parse_edges() {
        let list = parse("top: 10, left: 50%").expect("Should parse");
        assert_eq!(list.entries.len(), 2);
        assert_eq!(
            list.entries[0].node,
            Entry::Edge(EdgeKey::Top, Measure::Px(10.0))
        );
        assert_eq!(
            list.entries[1].node,
            Entry::Edge(EdgeKey::Left, Measure::Percent(50.0))
        );
    }

    #[test]
    fn test_parse_size_pair() {
        let list = parse("size: (20, 60%)").expect("Should parse");
        assert_eq!(
            list.entries[0].node,
            Entry::Size(Measure::Px(20.0), Measure::Percent(60.0))
        );
    }

    #[test]
    fn test_parse_center_forms() {
        let tuple = parse("center: (50%, 50%)").expect("Should parse");
        let object = parse("centre: { x: 50%, y: 50% }").expect("Should parse");
        assert_eq!(tuple.to_constraints(), object.to_constraints());
        assert_eq!(
            tuple.to_constraints().center,
            Some(Center::new(Measure::Percent(50.0), Measure::Percent(50.0)))
        );
    }

    #[test]
    fn test_parse_negative_and_trailing_comma() {
        let list = parse("right: -5, bottom: 0,").expect("Should parse");
        assert_eq!(
            list.to_constraints(),
            Constraints::new().right(-5).bottom(0)
        );
    }

    #[test]
    fn test_later_entries_override() {
        let list = parse("top: 1, top: 2").expect("Should parse");
        assert_eq!(list.to_constraints().top, Some(Measure::Px(2.0)));
    }

    #[test]
    fn test_empty_input() {
        let list = parse("").expect("Should parse");
        assert!(list.entries.is_empty());
    }

    #[test]
    fn test_entry_spans() {
        let list = parse("top: 10, width: 4").expect("Should parse");
        assert_eq!(list.entries[0].span, 0..7);
        assert_eq!(list.entries[1].span, 9..17);
    }

    #[test]
    fn test_unknown_key_is_error() {
        assert!(parse("middle: 10").is_err());
    }

    #[test]
    fn test_missing_value_is_error() {
        let errs = parse("top:").unwrap_err();
        assert!(!errs.is_empty());
    }

    #[test]
    fn test_unrecognised_characters_are_errors() {
        let errs = parse("top: .5").unwrap_err();
        assert_eq!(errs[0].span(), &(5..6));
        let errs = parse("left: 10$").unwrap_err();
        assert_eq!(errs[0].span(), &(8..9));
        assert!(errs[0].to_string().contains("Unexpected unrecognised character"));
        assert!(parse("top: .5, left: 10$").is_err());
    }
}
