//! Server-authored instructions and the prompt template sent to the model.

use crate::models::RewriteRequest;
use serde_json::Value;

/// Fixed system instruction; never derived from caller input.
pub const SYSTEM_INSTRUCTION: &str = "You are a professional writing assistant and style adaptation expert. \
Your sole function is to receive structured input parameters and transform text according to precise specifications. \
You must follow these rules without exception: \
1. Parameter-Based Execution: You will receive the user's original text and five distinct parameters. \
You must process the text strictly according to these parameters and nothing else. \
2. Parameter Hierarchy: Process parameters in this order of priority: \
$instructions (highest), $style, $audience, $length, $keywords (lowest). \
3. Keyword Handling: The $keywords parameter lists words/phrases that should appear in the output \
only if they naturally fit the context. Never force keywords if they disrupt flow, coherence, or style. \
If they cannot be integrated naturally, omit them without comment. \
4. Output Format: Return only the transformed text. No explanations, no markdown, no disclaimers, \
no commentary on changes made, and no labels.";

/// Marker opening and closing the block that holds the caller's text.
pub const REWRITE_DELIMITER: &str = "---";

/// Render the labelled parameter sections followed by the delimited input.
///
/// Absent parameters render as empty values.
pub fn compose_prompt(request: &RewriteRequest) -> String {
    let field = |value: &Option<Value>| value.as_ref().map(render_value).unwrap_or_default();

    format!(
        "Style: {style}\n\
         Target Audience: {audience}\n\
         Length: {length}\n\
         Keywords to include: {keywords}\n\
         Additional Instructions: {instructions}\n\
         \n\
         {delim}\n\
         TEXT TO REWRITE:\n\
         {input}\n\
         {delim}\n",
        style = field(&request.style),
        audience = field(&request.audience),
        length = field(&request.length),
        keywords = field(&request.keywords),
        instructions = field(&request.instructions),
        input = request.input_text.as_deref().unwrap_or_default(),
        delim = REWRITE_DELIMITER,
    )
}

/// Text form of a caller-supplied parameter.
///
/// Strings are used verbatim, scalars use their JSON text and arrays join
/// their rendered elements with `,`. `null` renders empty.
fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(render_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_lands_inside_delimited_block() {
        let prompt = compose_prompt(&RewriteRequest::new("Hello world"));

        let block = "---\nTEXT TO REWRITE:\nHello world\n---\n";
        assert!(prompt.ends_with(block), "prompt was: {prompt}");
    }

    #[test]
    fn absent_parameters_render_empty() {
        let prompt = compose_prompt(&RewriteRequest::new("Hello world"));

        assert!(prompt.starts_with("Style: \nTarget Audience: \nLength: \n"));
        assert!(prompt.contains("Keywords to include: \nAdditional Instructions: \n"));
        assert!(!prompt.contains("undefined"));
    }

    #[test]
    fn parameters_fill_their_sections() {
        let request = RewriteRequest {
            input_text: Some("We shipped it.".into()),
            style: Some(json!("playful")),
            audience: Some(json!("children")),
            length: Some(json!("short")),
            keywords: Some(json!("rocket, moon")),
            instructions: Some(json!("end with a question")),
        };
        let prompt = compose_prompt(&request);

        assert!(prompt.contains("Style: playful\n"));
        assert!(prompt.contains("Target Audience: children\n"));
        assert!(prompt.contains("Length: short\n"));
        assert!(prompt.contains("Keywords to include: rocket, moon\n"));
        assert!(prompt.contains("Additional Instructions: end with a question\n"));
        assert!(prompt.contains("TEXT TO REWRITE:\nWe shipped it.\n"));
    }

    #[test]
    fn non_string_parameters_render_as_text() {
        let request = RewriteRequest {
            length: Some(json!(150)),
            keywords: Some(json!(["a", "b", 3])),
            style: Some(json!(false)),
            audience: Some(json!(null)),
            ..RewriteRequest::new("Hello world")
        };
        let prompt = compose_prompt(&request);

        assert!(prompt.contains("Style: false\n"));
        assert!(prompt.contains("Target Audience: \n"));
        assert!(prompt.contains("Length: 150\n"));
        assert!(prompt.contains("Keywords to include: a,b,3\n"));
    }

    #[test]
    fn system_instruction_states_priority_order() {
        let order = [
            "$instructions (highest)",
            "$style",
            "$audience",
            "$length",
            "$keywords (lowest)",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| SYSTEM_INSTRUCTION.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(SYSTEM_INSTRUCTION.contains("Return only the transformed text."));
    }
}
