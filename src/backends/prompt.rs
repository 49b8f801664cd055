//! Prompt templates for the generative backend

/// Prompt builder for remote completions
pub struct PromptBuilder;

impl PromptBuilder {
    /// System message for the completion request
    pub fn system_prompt() -> &'static str {
        "You answer questions based on provided context."
    }

    /// Build the question-answering prompt
    ///
    /// Directs the model to answer concisely from the context alone and to
    /// admit when the context is insufficient.
    pub fn build_qa_prompt(question: &str, context: &str) -> String {
        format!(
            r#"Answer the question based on the context below. Keep answers concise.
If the question can't be answered from the context, say "I don't know".

Context: {context}

Question: {question}
Answer:"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_question_and_context() {
        let prompt = PromptBuilder::build_qa_prompt("what color?", "the sky is blue");
        assert!(prompt.contains("Context: the sky is blue"));
        assert!(prompt.contains("Question: what color?"));
        assert!(prompt.contains("say \"I don't know\""));
    }
}
