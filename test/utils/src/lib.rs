pub fn code_review_fixture() -> &'static str {
    return r#"
```json
{
  "input_type": "code",
  "code_snippet": "fn add(a: i32, b: i32) -> i32 { return a - b; }",
  "evaluation": {
    "errors": ["The function subtracts instead of adding."],
    "optimizations": ["Drop the explicit return for a tail expression."],
    "best_practices": ["Add a doc comment describing the function."],
    "corrected_code": "fn add(a: i32, b: i32) -> i32 {\n    a + b\n}"
  }
}
```
"#
    .trim();
}

pub fn non_code_review_fixture() -> &'static str {
    return r#"
```
{
  "input_type": "non_code",
  "message": "This does not look like code.",
  "suggestion": "Paste a function or a snippet you would like reviewed."
}
```
"#
    .trim();
}

pub fn completion_body(content: &str) -> String {
    let escaped = content
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");

    return format!(
        r#"{{"id":"chatcmpl-1","object":"chat.completion","choices":[{{"index":0,"message":{{"role":"assistant","content":"{escaped}"}},"finish_reason":"stop"}}]}}"#
    );
}
