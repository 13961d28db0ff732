//! Preset agent graphs for the three bundled bots.

use std::sync::Arc;

use crate::agent::Agent;
use crate::provider::ModelProvider;
use crate::surface::ChatSurface;
use crate::tools::country::{all_country_tools, CountryApi};

const COUNTRY_INSTRUCTIONS: &str = "\
You are a helpful assistant that provides information about countries only.

When the user gives a country name, call:
- get_capital
- get_language
- get_population

If the user asks something unrelated (like greeting, joke), do not respond \
directly — the developer will handle that.";

const COUNTRY_GREETING: &str = "🌍 Hello! I'm your Country Info Bot.\n\
Type a country name to know its capital, language, and population.";

const MOOD_DETECTOR_INSTRUCTIONS: &str = "\
You are a mood detection assistant.

Your job is to detect the user's mood only when they describe how they feel \
(e.g. \"I'm feeling sad\", \"I'm stressed\").

If the user just says hello, tells their name, or says anything unrelated to \
emotions, respond only with: \"unknown\".

Valid moods: happy, sad, stressed, angry, excited, tired, anxious, etc.

Your final reply should be only one lowercase word, no extra explanation.";

const MOOD_HELPER_INSTRUCTIONS: &str = "\
If the user's mood is sad or stressed, suggest a relaxing or fun activity to \
improve their mood.
If the mood is anything else, say: 'You're doing great! No suggestions needed.'";

const MOOD_ROUTER_INSTRUCTIONS: &str = "\
You are a smart emotional assistant. Your job is to understand the user's \
mood and decide what to do:

- If the mood is sad or stressed, hand off to the Mood Helper agent.
- If the mood is happy or anything else, respond with just the mood.

Only hand off when the mood needs help.";

const MOOD_GREETING: &str = "Hello! How can I help you today about your mood?";

const STORE_INSTRUCTIONS: &str = "\
You are a smart store assistant. Based on the user's symptoms or needs, \
suggest a product (like a medicine) and explain clearly why it is helpful.";

const STORE_GREETING: &str = "Hello, How can I help you today?";

/// Country Info Assistant: the three REST Countries tools, no hand-offs.
pub fn country_info_agent(api: &CountryApi) -> Arc<Agent> {
    Arc::new(
        Agent::new("Country Info Assistant", COUNTRY_INSTRUCTIONS)
            .with_tools(all_country_tools(api)),
    )
}

/// Country-info surface: classifier enabled, templated input, `✅` replies.
pub fn country_info_surface<'p>(
    provider: &'p dyn ModelProvider,
    api: &CountryApi,
) -> ChatSurface<'p> {
    ChatSurface::new(country_info_agent(api), provider)
        .with_greeting(COUNTRY_GREETING)
        .with_classifier()
        .with_input_template("Tell me about {input}")
        .with_reply_prefix("✅ ")
}

/// Mood router with hand-offs to the detector and suggestion agents.
pub fn mood_router_agent() -> Arc<Agent> {
    let detector = Arc::new(Agent::new("Mood Detector", MOOD_DETECTOR_INSTRUCTIONS));
    let helper = Arc::new(Agent::new("Mood Helper", MOOD_HELPER_INSTRUCTIONS));
    Arc::new(
        Agent::new("Mood Router", MOOD_ROUTER_INSTRUCTIONS)
            .with_handoff(detector)
            .with_handoff(helper),
    )
}

/// Mood-tracker surface: streamed replies, no classifier.
pub fn mood_tracker_surface(provider: &dyn ModelProvider) -> ChatSurface<'_> {
    ChatSurface::new(mood_router_agent(), provider).with_greeting(MOOD_GREETING)
}

/// Smart store assistant: a single agent with no capability set.
pub fn smart_store_agent() -> Arc<Agent> {
    Arc::new(Agent::new("smart_store_agent", STORE_INSTRUCTIONS))
}

/// Smart-store surface: streamed replies, no classifier.
pub fn smart_store_surface(provider: &dyn ModelProvider) -> ChatSurface<'_> {
    ChatSurface::new(smart_store_agent(), provider).with_greeting(STORE_GREETING)
}
