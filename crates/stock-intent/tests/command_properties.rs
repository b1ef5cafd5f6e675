//! Behavioural coverage for the command interpreter's public contract.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use stock_intent::{ActionKind, Command, IntentParser, ParseOutcome};

use rstest::{fixture, rstest};

#[fixture]
fn parser() -> IntentParser {
    IntentParser::spanish().expect("spanish vocabulary compiles")
}

fn command(parser: &IntentParser, message: &str) -> Command {
    parser
        .parse_command(message)
        .expect("quantity resolves")
        .expect("keyword matches")
}

#[rstest]
#[case("agregar 5 pan", "agregar", "5", "pan")]
#[case("hola bot, agregar 12 huevos", "agregar", "12", "huevos")]
#[case("por favor quitar 3 latas de atún", "quitar", "3", "latas de atún")]
#[case("AGREGAR 7 Manzanas Verdes", "agregar", "7", "manzanas verdes")]
fn extracts_action_quantity_and_product(
    parser: IntentParser,
    #[case] message: &str,
    #[case] action: &str,
    #[case] quantity: &str,
    #[case] product: &str,
) {
    let ParseOutcome::Matched(intent) = parser.parse(message) else {
        panic!("expected {message:?} to match");
    };
    assert_eq!(intent.action, action);
    assert_eq!(intent.quantity_text.as_deref(), Some(quantity));
    assert_eq!(intent.product, product);
}

#[rstest]
#[case("hola, ¿cómo estás?")]
#[case("exportar stock")]
#[case("")]
#[case("cuánto pan me queda")]
fn messages_without_keywords_do_not_match(parser: IntentParser, #[case] message: &str) {
    assert_eq!(parser.parse(message), ParseOutcome::NoMatch);
    assert_eq!(parser.parse_command(message), Ok(None));
}

#[rstest]
fn missing_quantity_defaults_to_one(parser: IntentParser) {
    let resolved = command(&parser, "agregar leche");
    assert_eq!(resolved.action, ActionKind::Add);
    assert_eq!(resolved.quantity, 1);
    assert_eq!(resolved.product, "leche");
}

#[rstest]
#[case("añadime 5 pan")]
#[case("agregame 5 pan")]
#[case("añadir 5 pan")]
#[case("sumar 5 pan")]
fn add_synonyms_resolve_like_the_canonical_verb(parser: IntentParser, #[case] message: &str) {
    assert_eq!(command(&parser, message), command(&parser, "agregar 5 pan"));
}

#[rstest]
fn non_digit_text_after_keyword_becomes_product(parser: IntentParser) {
    let ParseOutcome::Matched(intent) = parser.parse("agregar abc leche") else {
        panic!("expected a match");
    };
    assert_eq!(intent.quantity_text, None);
    assert_eq!(intent.product, "abc leche");
    assert_eq!(intent.quantity(), Ok(1));
}
