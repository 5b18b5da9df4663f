//! Rule-based plant-care responder.
//!
//! Used by the assistant when no remote provider produced a reply. The
//! user's text is lower-cased and matched against keyword sets in a fixed
//! priority order; the first matching [`Topic`] wins:
//!
//! | Priority | Topic | Keywords |
//! |----------|-------|----------|
//! | 1 | [`Topic::Contact`] | contact, support, help, phone, email, call |
//! | 2 | [`Topic::Greeting`] | hello, hi, hey, start, or fewer than 10 characters |
//! | 3 | [`Topic::Watering`] | water, drink, thirsty, how often |
//! | 4 | [`Topic::Lighting`] | light, sun, bright, dark, window |
//! | 5 | [`Topic::General`] | anything else |
//!
//! Matching is plain substring search, so `"hi"` also matches inside
//! `"this"`. Every template embeds the support contact details.
//!
//! ```rust
//! use vriksha_core::responder::{classify, Topic};
//!
//! assert_eq!(classify("Hi"), Topic::Greeting);
//! assert_eq!(classify("How much water does a monstera need?"), Topic::Watering);
//! ```

pub const SUPPORT_PHONE: &str = "+91 8542986911";
pub const SUPPORT_EMAIL: &str = "auxinbiotek1986@gmail.com";

/// Display label used for replies that did not come from a remote model.
pub const EXPERT_MODEL_LABEL: &str = "Vriksha Plant Expert";

/// Texts shorter than this many UTF-16 code units, surrounding whitespace
/// included, count as a greeting.
const SHORT_INPUT_UNITS: usize = 10;

/// Keyword category of a user message, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Contact,
    Greeting,
    Watering,
    Lighting,
    General,
}

const CONTACT_KEYWORDS: &[&str] = &["contact", "support", "help", "phone", "email", "call"];
const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey", "start"];
const WATERING_KEYWORDS: &[&str] = &["water", "drink", "thirsty", "how often"];
const LIGHTING_KEYWORDS: &[&str] = &["light", "sun", "bright", "dark", "window"];

fn mentions(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Classify a message into the first matching [`Topic`].
pub fn classify(text: &str) -> Topic {
    let lower = text.to_lowercase();

    if mentions(&lower, CONTACT_KEYWORDS) {
        Topic::Contact
    } else if mentions(&lower, GREETING_KEYWORDS)
        || text.encode_utf16().count() < SHORT_INPUT_UNITS
    {
        Topic::Greeting
    } else if mentions(&lower, WATERING_KEYWORDS) {
        Topic::Watering
    } else if mentions(&lower, LIGHTING_KEYWORDS) {
        Topic::Lighting
    } else {
        Topic::General
    }
}

/// Canned reply for a text-only message.
pub fn canned_reply(text: &str) -> &'static str {
    match classify(text) {
        Topic::Contact => CONTACT_REPLY,
        Topic::Greeting => GREETING_REPLY,
        Topic::Watering => WATERING_REPLY,
        Topic::Lighting => LIGHTING_REPLY,
        Topic::General => GENERAL_REPLY,
    }
}

/// Reply for a message with an attached image when no vision provider answered.
pub fn image_fallback_reply() -> &'static str {
    IMAGE_REPLY
}

/// Last-resort reply when the request could not be read at all.
pub const GENERIC_FALLBACK: &str = "I'm here to help with your plant questions! Try asking about plant care, watering, or our products.";

/// Opening message of every conversation.
pub const WELCOME_MESSAGE: &str = "Hi! I'm your Vriksha plant expert! 🌱 I can analyze plant photos and provide expert care advice. Upload a photo of your plant or ask me anything about plant care, watering, lighting, or our collection. How can I help you grow today?";

const CONTACT_REPLY: &str = "Need direct support? We're here to help! 📞

**CONTACT VRIKSHA SUPPORT:**
📞 **Phone:** +91 8542986911
📧 **Email:** auxinbiotek1986@gmail.com

**SUPPORT HOURS:**
• Monday-Saturday: 9 AM - 7 PM
• Sunday: 10 AM - 6 PM

**WE CAN HELP WITH:**
• Plant identification from photos
• Detailed care consultations
• Order tracking and delivery
• Plant health emergencies
• Custom plant recommendations
• Bulk orders for offices/events

**CHAT SUPPORT:**
I'm also here 24/7 for immediate plant care advice! Ask me about watering, lighting, problems, or product recommendations.

How can I assist you right now? 🌱";

const GREETING_REPLY: &str = "Hello! Welcome to Vriksha! 🌱 I'm your plant care expert, ready to help you create a thriving green space. Whether you're a complete beginner or experienced plant parent, I can assist with:

• Plant care tips & schedules
• Problem diagnosis & solutions
• Product recommendations
• Repotting & fertilizing guidance

**Need direct support?**
📞 Phone: +91 8542986911
📧 Email: auxinbiotek1986@gmail.com

What would you like to know about plants today?";

const WATERING_REPLY: &str = "Great watering question! 💧 Here's the golden rule:

**Check the soil first** - stick your finger 1-2 inches deep. If dry, it's time to water!

**General schedule:**
• Most houseplants: Every 7-10 days
• Succulents: Every 2-3 weeks
• Tropical plants: 2-3 times per week

**Pro tips:**
• Water deeply until it drains out the bottom
• Empty saucers after 30 minutes
• Overwatering kills more plants than underwatering!

What specific plant are you caring for? I can give you exact guidance! 🌿

**Need expert consultation?** Call us: +91 8542986911";

const LIGHTING_REPLY: &str = "Lighting is crucial for happy plants! ☀️

**Bright Indirect Light** (most houseplants):
• Near a window but not in direct sun rays
• East or north-facing windows are perfect

**Low Light Champions:**
• Snake Plant, Pothos, ZZ Plant, Peace Lily
• Can handle darker corners

**Bright Light Lovers:**
• Fiddle Leaf Fig, Rubber Plant, Monstera
• Need those bright spots!

**Warning signs:**
• Leggy growth = too little light
• Scorched leaves = too much direct sun

Where are you planning to place your plant? I can recommend the perfect match! 🪟

**Questions about a specific spot?** Email us: auxinbiotek1986@gmail.com";

const GENERAL_REPLY: &str = "I'm your Vriksha plant expert, ready to help with any plant questions! 🌿

**I CAN HELP WITH:**
• 💧 Watering schedules & techniques
• ☀️ Lighting requirements & placement
• 🌱 Plant recommendations for any space
• 🔍 Problem diagnosis & solutions
• 🪴 Repotting & fertilizing guidance
• 🐛 Pest identification & treatment

**NEED DIRECT SUPPORT?**
📞 **Phone:** +91 8542986911
📧 **Email:** auxinbiotek1986@gmail.com

**OUR COLLECTION:**
• Beginner-friendly: Pothos ($20), Snake Plant ($25)
• Statement pieces: Fiddle Leaf Fig ($85), Monstera ($45)

What specific plant topic interests you most today? 🌱";

const IMAGE_REPLY: &str = "I can see you've shared a plant image! 📸 Detailed visual analysis isn't available right now, but I can still help you with plant identification and care based on your description!

**To get the best help:**
• Describe what you see (leaf color, shape, size)
• Mention any problems (yellow leaves, brown spots, drooping)
• Tell me about your care routine (watering, lighting, location)

**Common plant issues I can help diagnose:**
• Overwatering vs underwatering symptoms
• Light-related problems
• Nutrient deficiencies
• Pest identification
• Disease symptoms

**For immediate image analysis, contact our support:**
📞 **Phone:** +91 8542986911
📧 **Email:** auxinbiotek1986@gmail.com

What specific concerns do you have about your plant? Describe what you're seeing and I'll provide expert guidance! 🌱";
