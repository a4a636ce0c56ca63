use std::str::FromStr;

use anyhow::Result;
use strum::VariantNames;
use test_utils::code_review_fixture;
use test_utils::non_code_review_fixture;

use super::Variant;
use super::REFUSAL_MESSAGE;
use crate::domain::models::CompletionError;
use crate::domain::models::Evaluation;
use crate::domain::models::InputType;
use crate::domain::models::StructuredReview;
use crate::domain::models::TurnContent;

fn text(content: TurnContent) -> String {
    match content {
        TurnContent::Text(text) => return text,
        TurnContent::Review(_) => panic!("Expected text content"),
    }
}

#[test]
fn it_parses_kebab_case_names() -> Result<()> {
    assert_eq!(Variant::from_str("interior-design")?, Variant::InteriorDesign);
    assert_eq!(Variant::from_str("code-review")?, Variant::CodeReview);
    assert_eq!(Variant::from_str("passthrough")?, Variant::Passthrough);
    assert!(Variant::from_str("poetry").is_err());

    assert_eq!(
        Variant::VARIANTS,
        &["interior-design", "code-review", "passthrough"]
    );
    assert_eq!(Variant::default(), Variant::InteriorDesign);

    return Ok(());
}

#[test]
fn it_embeds_user_text_in_the_interior_design_preamble() {
    let prompt = Variant::InteriorDesign.prompt("A cozy reading nook");
    assert!(prompt.starts_with("You are an AI assistant specializing in **interior design**."));
    assert!(prompt.contains("Sorry, I am an AI assistant for interior design."));
    assert!(prompt.ends_with("### **User Input:**\nA cozy reading nook"));
}

#[test]
fn it_embeds_user_text_in_the_code_review_preamble() {
    let prompt = Variant::CodeReview.prompt("fn main() {}");
    assert!(prompt.starts_with("You are a senior software engineer reviewing code."));
    assert!(prompt.contains(r#""input_type": "non_code""#));
    assert!(prompt.ends_with("### **User Input:**\nfn main() {}"));
}

#[test]
fn it_passes_user_text_through_unchanged() {
    assert_eq!(Variant::Passthrough.prompt("  hi there "), "  hi there ");
}

#[test]
fn it_returns_passthrough_completions_verbatim() -> Result<()> {
    let res = Variant::Passthrough.classify("  \"Hello\"  ")?;
    assert_eq!(text(res), "  \"Hello\"  ");

    return Ok(());
}

#[test]
fn it_trims_interior_design_completions() -> Result<()> {
    let res = Variant::InteriorDesign.classify("\n  A sunlit reading nook with a bay window.  \n")?;
    assert_eq!(text(res), "A sunlit reading nook with a bay window.");

    return Ok(());
}

#[test]
fn it_strips_one_layer_of_quotes() -> Result<()> {
    let res = Variant::InteriorDesign.classify("\"A sunlit reading nook.\"")?;
    assert_eq!(text(res), "A sunlit reading nook.");

    let res = Variant::InteriorDesign.classify("\"\"Nested quotes.\"\"")?;
    assert_eq!(text(res), "\"Nested quotes.\"");

    return Ok(());
}

#[test]
fn it_keeps_unbalanced_quotes() -> Result<()> {
    let res = Variant::InteriorDesign.classify("\"Only leading")?;
    assert_eq!(text(res), "\"Only leading");

    let res = Variant::InteriorDesign.classify("\"")?;
    assert_eq!(text(res), "\"");

    return Ok(());
}

#[test]
fn it_replaces_refusals_with_the_canned_message() -> Result<()> {
    let replies = vec![
        "Sorry, I am an AI assistant for interior design. We are not dealing with this.",
        "\"SORRY, I AM AN AI ASSISTANT FOR INTERIOR DESIGN. We are not dealing with this.\"",
        "Well... sorry, i am an ai assistant for interior design, so no.",
    ];

    for reply in replies {
        let res = Variant::InteriorDesign.classify(reply)?;
        assert_eq!(text(res), REFUSAL_MESSAGE);
    }

    return Ok(());
}

#[test]
fn it_parses_fenced_code_reviews() -> Result<()> {
    let res = Variant::CodeReview.classify(code_review_fixture())?;

    let expected = StructuredReview {
        input_type: InputType::Code,
        code_snippet: Some("fn add(a: i32, b: i32) -> i32 { return a - b; }".to_string()),
        evaluation: Some(Evaluation {
            errors: vec!["The function subtracts instead of adding.".to_string()],
            optimizations: vec!["Drop the explicit return for a tail expression.".to_string()],
            best_practices: vec!["Add a doc comment describing the function.".to_string()],
            corrected_code: "fn add(a: i32, b: i32) -> i32 {\n    a + b\n}".to_string(),
        }),
        message: None,
        suggestion: None,
    };
    assert_eq!(res, TurnContent::Review(expected));

    return Ok(());
}

#[test]
fn it_parses_fences_without_a_language() -> Result<()> {
    let res = Variant::CodeReview.classify(non_code_review_fixture())?;

    match res {
        TurnContent::Review(review) => {
            assert_eq!(review.input_type, InputType::NonCode);
            assert_eq!(review.message, Some("This does not look like code.".to_string()));
        }
        TurnContent::Text(_) => panic!("Expected a review"),
    }

    return Ok(());
}

#[test]
fn it_parses_unfenced_code_reviews() -> Result<()> {
    let res = Variant::CodeReview.classify(r#"{"input_type": "non_code"}"#)?;
    assert!(matches!(res, TurnContent::Review(_)));

    return Ok(());
}

#[test]
fn it_fails_on_malformed_code_reviews() {
    let res = Variant::CodeReview.classify("```json\nI could not review this.\n```");
    assert!(matches!(res, Err(CompletionError::MalformedResponse(_))));
}
