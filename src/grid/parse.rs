//! Parse pest pairs for `"(x, y)"` coordinate strings

use pest::Parser;
use pest_derive::Parser;

use crate::errors::CoordParseError;
use crate::log;
use crate::types::{NumericError, Point, PtPx, Px};

#[derive(Parser)]
#[grammar = "grid/coords.pest"]
struct CoordParser;

/// Parse one coordinate tuple
pub fn parse_coord_tuple(input: &str) -> Result<PtPx, CoordParseError> {
    let syntax = || CoordParseError::Syntax { input: input.to_string() };

    let tuple = CoordParser::parse(Rule::coord_tuple, input)
        .map_err(|_| syntax())?
        .next()
        .ok_or_else(syntax)?;

    let numbers = tuple
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::number)
        .map(|pair| pair.as_str().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| syntax())?;

    let &[x, y] = numbers.as_slice() else {
        return Err(CoordParseError::TokenCount {
            input: input.to_string(),
            found: numbers.len(),
        });
    };

    let non_finite = |_: NumericError| CoordParseError::NonFinite { input: input.to_string() };
    let x = Px::try_new(x).map_err(non_finite)?;
    let y = Px::try_new(y).map_err(non_finite)?;
    Ok(Point::new(x, y))
}

/// Parse one named entry; a malformed value becomes the origin so the rest
/// of the table stays usable
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub(crate) fn parse_entry(name: &str, input: &str) -> PtPx {
    parse_coord_tuple(input).unwrap_or_else(|err| {
        log::warn!(point = name, error = %err, "malformed grid coordinate, using (0, 0)");
        PtPx::ORIGIN
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tuple_with_spacing() {
        assert_eq!(parse_coord_tuple("(475.0, 331.9)"), Ok(Point::px(475.0, 331.9)));
        assert_eq!(parse_coord_tuple("( 10 ,20 )"), Ok(Point::px(10.0, 20.0)));
        assert_eq!(parse_coord_tuple("(-1.5,+.5)"), Ok(Point::px(-1.5, 0.5)));
        assert_eq!(parse_coord_tuple("(1e2, 2E-1)"), Ok(Point::px(100.0, 0.2)));
    }

    #[test]
    fn wrong_component_count_is_token_count_error() {
        assert_eq!(
            parse_coord_tuple("(475.0)"),
            Err(CoordParseError::TokenCount { input: "(475.0)".into(), found: 1 })
        );
        assert_eq!(
            parse_coord_tuple("(1, 2, 3)"),
            Err(CoordParseError::TokenCount { input: "(1, 2, 3)".into(), found: 3 })
        );
        assert_eq!(
            parse_coord_tuple("()"),
            Err(CoordParseError::TokenCount { input: "()".into(), found: 0 })
        );
    }

    #[test]
    fn garbage_is_syntax_error() {
        for input in ["475.0, 331.9", "(abc, 1)", "(1, 2", "", "(1,, 2)"] {
            assert_eq!(
                parse_coord_tuple(input),
                Err(CoordParseError::Syntax { input: input.into() }),
                "{input:?}"
            );
        }
    }

    #[test]
    fn overflow_is_non_finite() {
        assert_eq!(
            parse_coord_tuple("(1e999, 2)"),
            Err(CoordParseError::NonFinite { input: "(1e999, 2)".into() })
        );
        assert_eq!(
            parse_coord_tuple("(0, -1e999)"),
            Err(CoordParseError::NonFinite { input: "(0, -1e999)".into() })
        );
    }

    #[test]
    fn malformed_entry_falls_back_to_origin() {
        assert_eq!(parse_entry("n_diamond_hand_point", "(1, 2, 3)"), PtPx::ORIGIN);
        assert_eq!(parse_entry("n_diamond_hand_point", "(3, 4)"), Point::px(3.0, 4.0));
    }
}
