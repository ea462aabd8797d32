//! Prompt composition for each generation operation.

use harzo_core::{AspectRatio, GenerationSettings};

/// System instruction for prompt enhancement.
pub const ENHANCE_INSTRUCTION: &str = "You are a professional AI prompt engineer. Enhance the following simple prompt into a highly descriptive, cinematic, and detailed prompt for image generation. Include lighting, camera details, and artistic style. Output ONLY the enhanced prompt string.";

pub fn enhance_prompt_text(prompt: &str) -> String {
    format!("{ENHANCE_INSTRUCTION}\n\nUser Prompt: {prompt}")
}

/// Final text-to-image prompt with lighting, camera and negative prompt
/// folded in.
pub fn generation_prompt(prompt: &str, settings: &GenerationSettings) -> String {
    if settings.aspect_ratio == AspectRatio::Custom {
        tracing::debug!(
            "[Gemini] Custom size {:?}x{:?} is not forwarded; requesting {}",
            settings.custom_width,
            settings.custom_height,
            settings.aspect_ratio.api_value()
        );
    }

    format!(
        "{prompt}. Style: {}. Camera: {}. Negative: {}",
        settings.lighting_or_default(),
        settings.camera_or_default(),
        settings.negative_prompt
    )
}

pub fn transform_instruction(instruction: &str, settings: &GenerationSettings) -> String {
    format!(
        "Modify this image based on the following instruction: {instruction}. Maintain consistency but apply the transformation with a strength of {}%. Lighting: {}.",
        settings.strength,
        settings.lighting_or_default()
    )
}

pub fn persona_instruction(persona: &str, settings: &GenerationSettings) -> String {
    let mut text = format!(
        "Persona Transformation: Take the person in this photo and reimagine them as: {persona}. \
         Keep the basic facial structure if possible. Apply high-end cinematic lighting. \
         Instruction details:"
    );

    // The face-enhancement flag is recorded with the settings but not sent.
    let negative = settings.negative_prompt.trim();
    if !negative.is_empty() {
        text.push_str(" Avoid: ");
        text.push_str(negative);
    }

    text
}
