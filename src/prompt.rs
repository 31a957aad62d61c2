//! Prompt construction for persona-conditioned survey questions.

use crate::persona::describe_persona;

/// Build the prompt sent to the model for one question and one persona.
///
/// The closing reminder names the first and last option explicitly to pull
/// answers away from the middle of the scale.
pub fn build_prompt(question: &str, descriptions: &[String], response_options: &[String]) -> String {
    let first = response_options.first().map(String::as_str).unwrap_or_default();
    let last = response_options.last().map(String::as_str).unwrap_or_default();

    format!(
        "{persona}\n\
         \n\
         Question: {question}\n\
         \n\
         Please select ONE of the following responses that best matches your opinion:\n\
         {options}\n\
         \n\
         Respond with ONLY one of the above options, nothing else.\n\
         \n\
         Be sure to consider the full range of options including:\n\
         '{first}', '{last}', and all items in between.",
        persona = describe_persona(descriptions),
        question = question,
        options = response_options.join(", "),
        first = first,
        last = last,
    )
}
