use anyhow::Result;

use super::Role;
use super::Turn;
use super::TurnContent;
use super::TurnShape;
use crate::domain::models::InputType;
use crate::domain::models::StructuredReview;
use crate::domain::models::Variant;
use crate::domain::models::REFUSAL_MESSAGE;

fn review() -> StructuredReview {
    return StructuredReview {
        input_type: InputType::NonCode,
        code_snippet: None,
        evaluation: None,
        message: Some("Not code.".to_string()),
        suggestion: None,
    };
}

#[test]
fn it_executes_user() {
    let turn = Turn::user("Hi there!");
    assert_eq!(turn.role(), Role::User);
    assert_eq!(turn.role().to_string(), "You");
    assert_eq!(turn.content(), &TurnContent::Text("Hi there!".to_string()));
    assert_eq!(turn.shape(), TurnShape::Prompt);
}

#[test]
fn it_stores_tabs_and_expands_them_when_wrapping() {
    let turn = Turn::user("\t\tHi there!");
    assert_eq!(turn.content(), &TurnContent::Text("\t\tHi there!".to_string()));
    assert_eq!(turn.as_string_lines(40), vec!["    Hi there!".to_string()]);
    assert_eq!(turn.variant(), None);
}

#[test]
fn it_keeps_refusal_text_from_users_as_a_prompt() {
    let turn = Turn::user(REFUSAL_MESSAGE);
    assert_eq!(turn.shape(), TurnShape::Prompt);
}

#[test]
fn it_executes_assistant() {
    let turn = Turn::assistant(
        TurnContent::Text("\tA bright kitchen.".to_string()),
        Variant::InteriorDesign,
    );
    assert_eq!(turn.role(), Role::Assistant);
    assert_eq!(turn.role().to_string(), "Assistant");
    assert_eq!(turn.variant(), Some(Variant::InteriorDesign));
    assert_eq!(
        turn.content(),
        &TurnContent::Text("\tA bright kitchen.".to_string())
    );
    assert_eq!(turn.shape(), TurnShape::Plain);
}

#[test]
fn it_detects_refusals() {
    let turn = Turn::assistant(
        TurnContent::Text(REFUSAL_MESSAGE.to_string()),
        Variant::InteriorDesign,
    );
    assert_eq!(turn.shape(), TurnShape::Refusal);
}

#[test]
fn it_detects_reviews() {
    let turn = Turn::assistant(TurnContent::Review(review()), Variant::CodeReview);
    assert_eq!(turn.shape(), TurnShape::Review);
    assert_eq!(turn.content().as_text(), "Not code.");
}

#[test]
fn it_wraps_lines() {
    let turn = Turn::user("The quick brown fox jumps over the lazy dog");
    assert_eq!(
        turn.as_string_lines(15),
        vec![
            "The quick brown".to_string(),
            "fox jumps over".to_string(),
            "the lazy dog".to_string(),
        ]
    );
}

#[test]
fn it_keeps_blank_lines_and_indentation() {
    let turn = Turn::user("fn main() {\n\n    run();\n}");
    assert_eq!(
        turn.as_string_lines(40),
        vec![
            "fn main() {".to_string(),
            "".to_string(),
            "    run();".to_string(),
            "}".to_string(),
        ]
    );
}

#[test]
fn it_keeps_long_words_on_their_own_line() {
    let turn = Turn::user("a supercalifragilistic b");
    assert_eq!(
        turn.as_string_lines(5),
        vec![
            "a".to_string(),
            "supercalifragilistic".to_string(),
            "b".to_string(),
        ]
    );
}

#[test]
fn it_serializes_text_and_reviews() -> Result<()> {
    let user = Turn::user("Hi");
    insta::assert_snapshot!(serde_json::to_string(&user)?, @r###"{"role":"user","content":"Hi"}"###);

    let text = Turn::assistant(TurnContent::Text("Hello".to_string()), Variant::Passthrough);
    insta::assert_snapshot!(serde_json::to_string(&text)?, @r###"{"role":"assistant","variant":"passthrough","content":"Hello"}"###);

    let reviewed = Turn::assistant(TurnContent::Review(review()), Variant::CodeReview);
    let json = serde_json::to_string(&reviewed)?;
    insta::assert_snapshot!(json, @r###"{"role":"assistant","variant":"code-review","content":{"input_type":"non_code","message":"Not code."}}"###);

    let parsed: Turn = serde_json::from_str(&json)?;
    assert_eq!(parsed, reviewed);

    return Ok(());
}
