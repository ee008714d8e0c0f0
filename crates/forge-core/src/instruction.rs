//! Instruction text sent to the text-generation service.

use crate::content::GenerationRequest;

/// Build the single natural-language instruction for a request.
///
/// Content type, tone and length labels and the raw prompt are embedded
/// verbatim. The closing line asks the model for the content only, with no
/// preamble or commentary, since the reply is shown to the user as-is.
pub fn compose_instruction(request: &GenerationRequest) -> String {
    format!(
        "You are an expert content creator and marketing professional.\n\
         Your task is to generate a high-quality piece of content based on the following specifications.\n\
         \n\
         **Content Type:** {content_type}\n\
         **Desired Tone:** {tone}\n\
         **Desired Length:** {length}\n\
         **Core Topic/Prompt:** \"{prompt}\"\n\
         \n\
         Please generate the content now. Provide only the requested content, \
         without any extra commentary, introduction, or sign-off.\n",
        content_type = request.content_type().label(),
        tone = request.tone().label(),
        length = request.length().label(),
        prompt = request.prompt(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentType, Length, Tone};

    #[test]
    fn embeds_every_field_verbatim() {
        let req = GenerationRequest::new(
            ContentType::BlogPost,
            "eco sneakers",
            Tone::Witty,
            Length::Short,
        )
        .unwrap();
        let text = compose_instruction(&req);

        assert!(text.contains("Blog Post"));
        assert!(text.contains("Witty"));
        assert!(text.contains("Short (approx. 50 words)"));
        assert!(text.contains("\"eco sneakers\""));
    }

    #[test]
    fn asks_for_content_only() {
        let req = GenerationRequest::new(
            ContentType::SocialMediaCaption,
            "launch day",
            Tone::Enthusiastic,
            Length::Long,
        )
        .unwrap();
        let text = compose_instruction(&req);

        assert!(text.contains("**Content Type:** Social Media Caption\n"));
        assert!(text.contains("**Desired Length:** Long (approx. 300 words)\n"));
        assert!(text.contains("without any extra commentary, introduction, or sign-off."));
    }

    #[test]
    fn multi_line_prompt_is_not_rewritten() {
        let prompt = "line one\nline two";
        let req = GenerationRequest::new(
            ContentType::MarketingCopy,
            prompt,
            Tone::Formal,
            Length::Medium,
        )
        .unwrap();
        assert!(compose_instruction(&req).contains(prompt));
    }
}
