//! Prompt construction for remote text/vision providers.
//!
//! [`build_request`] turns a user message (and optional image) into the
//! provider-neutral [`ProviderRequest`]. When an image is attached the
//! system prompt gains an image-analysis section and the user prompt is
//! rewritten to ask for identification, a health assessment, visible
//! problems, and care/treatment recommendations, followed by the user's
//! own question.

use serde::Serialize;

/// Sampling settings applied to every provider call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.7,
        }
    }
}

/// Provider-neutral request handed to a [`ChatProvider`](crate::provider::ChatProvider).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Data-URL encoded image, passed through untouched.
    pub image: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ProviderRequest {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

const SYSTEM_PROMPT: &str = "You are an expert plant care assistant for Vriksha, a premium curated plant store. You have extensive knowledge about:

PLANT CARE EXPERTISE:
- Watering schedules and techniques for different plant types
- Lighting requirements (bright indirect, low light, direct sun)
- Soil types, drainage, and repotting guidance
- Fertilizing schedules and organic options
- Humidity requirements for tropical plants
- Seasonal care adjustments (winter/summer)

PROBLEM DIAGNOSIS:
- Yellow leaves, brown spots, drooping, wilting
- Pest identification (spider mites, aphids, scale, fungus gnats)
- Root rot, overwatering, underwatering symptoms
- Light burn, nutrient deficiencies

PRODUCT RECOMMENDATIONS:
- Beginner plants: Pothos, Snake Plant, ZZ Plant, Rubber Plant
- Statement plants: Fiddle Leaf Fig, Monstera, Bird of Paradise
- Low-light options: Snake Plant, Pothos, Peace Lily
- Air-purifying plants and their benefits

SUPPORT CONTACT:
- Phone: +91 8542986911
- Email: auxinbiotek1986@gmail.com

TONE: Friendly, encouraging, and knowledgeable. Use plant emojis occasionally. Keep responses under 250 words but comprehensive. Always offer to help with follow-up questions.

STORE INFO: Vriksha offers same-day city delivery, nationwide shipping, 30-day plant guarantee, and free care guides with every purchase.";

const IMAGE_EXPERTISE: &str = "IMAGE ANALYSIS EXPERTISE:
- Identify plant species, varieties, and cultivars
- Diagnose plant health issues from visual symptoms
- Assess plant care needs based on appearance
- Recommend treatments for visible problems
- Evaluate plant growth stage and maturity";

/// The store persona prompt shared by every provider.
pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// Build the outbound request for `text` and an optional image.
pub fn build_request(
    text: &str,
    image: Option<&str>,
    settings: &GenerationSettings,
) -> ProviderRequest {
    let (system_prompt, user_prompt) = match image {
        Some(_) => (
            format!("{}\n\n{}", SYSTEM_PROMPT, IMAGE_EXPERTISE),
            format!(
                "Please analyze this plant image and provide detailed insights about:\n\
                 1. Plant identification (species/variety if possible)\n\
                 2. Overall health assessment\n\
                 3. Any visible problems or concerns\n\
                 4. Care recommendations\n\
                 5. Suggestions for improvement\n\n\
                 User's question: {}",
                text
            ),
        ),
        None => (SYSTEM_PROMPT.to_string(), text.to_string()),
    };

    ProviderRequest {
        system_prompt,
        user_prompt,
        image: image.map(str::to_string),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    }
}
