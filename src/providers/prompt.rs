/// System prompt for the last-resort extraction call.
///
/// The model must answer with exactly one JSON object so the reply survives
/// the balanced-brace scan, and must use the `error` field rather than prose
/// when the page turns out not to be a recipe.
pub const RECIPE_EXTRACTION_PROMPT: &str = r#"
You're an expert in finding recipes in messy web page text.
Sometimes the text is not a recipe, in that case specify that in the error field.
Given the text output only this JSON without any other characters:

{
  "name": "<RECIPE NAME HERE>",
  "description": "<ONE SENTENCE DESCRIPTION HERE>",
  "ingredients": [<LIST OF INGREDIENTS HERE>],
  "instructions": [<LIST OF INSTRUCTIONS IN COOKING ORDER HERE>],
  "servings": <NUMBER OF SERVINGS OR null>,
  "error": "<ERROR MESSAGE HERE IF NO RECIPE>"
}
"#;
