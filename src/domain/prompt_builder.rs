//! Renders the chat prompts sent to the model for a generation request.
//!
//! Output is a pure function of the request and the static limits table, so
//! identical requests always produce identical prompts.

use std::collections::HashSet;

use crate::domain::completion::ChatPrompt;
use crate::domain::entities::{CampaignTarget, ClientContext, GenerationRequest, Objective, Tone};
use crate::domain::platform::{Platform, PlatformLimits};

const FRAMEWORKS: &str = "COPYWRITING FRAMEWORKS TO USE:

AIDA Framework:
- Grab attention with bold promise or shock
- Spark interest focusing on one pain point
- Build desire with 2-3 key benefits in \"you\" language
- Drive action with direct call to action

PAS Framework:
- State the problem (what holds audience back)
- Agitate it (highlight impact on day/budget)
- Present solution (show how offer fixes it fast)
";

const JSON_SHAPE: &str = "Return JSON format:
{
  \"headlines\": [\"headline1\", \"headline2\", ...],
  \"descriptions\": [\"desc1\", \"desc2\", ...],
  \"confidence\": 0.85,
  \"warnings\": [\"any warnings about compliance or improvements\"]
}";

/// Builds the system and user prompts for a request.
pub fn build_prompts(request: &GenerationRequest) -> ChatPrompt {
    let limits = request.platform().limits();

    let system = match request.target {
        CampaignTarget::Google => google_system_prompt(limits, request.tone),
        CampaignTarget::Facebook { objective } => {
            facebook_system_prompt(limits, request.tone, objective)
        }
    };

    ChatPrompt {
        system,
        user: user_prompt(request, limits),
    }
}

fn google_system_prompt(limits: &PlatformLimits, tone: Tone) -> String {
    format!(
        "You are an expert Google Ads copywriter specialized in creating high-converting ad copy using proven frameworks.

GOOGLE ADS COMPLIANCE RULES:
1. Headlines: Maximum {headline_len} characters each (including spaces)
2. Descriptions: Maximum {description_len} characters each (including spaces)
3. NO exclamation marks (!) allowed anywhere
4. NO ALL CAPS words
5. NO misleading claims or superlatives without proof
6. Character limits are STRICT - exceed them and ads get rejected

{FRAMEWORKS}
HOOK-BENEFIT-PROOF-CTA:
- Hook (1 short line)
- Core benefit (you-focused, one sentence)
- Proof (testimonial or statistic if available)
- CTA (single, urgent command)

WRITING RULES:
- Write every line readable at a glance
- Break copy into 3-4 lines max
- Use one idea per line
- Keep verbs strong, promises real
- Use \"you\" language for benefits
- End with clickable action reader can't ignore

TONE: {tone}
RESPOND IN VALID JSON FORMAT ONLY.",
        headline_len = limits.headline.max_length,
        description_len = limits.description.max_length,
    )
}

fn facebook_system_prompt(limits: &PlatformLimits, tone: Tone, objective: Objective) -> String {
    format!(
        "You are an expert Facebook Ads copywriter specialized in creating engaging, scroll-stopping ad copy using proven frameworks.

FACEBOOK ADS RULES:
1. Headlines: Maximum {headline_len} characters each
2. Descriptions: Maximum {description_len} characters each
3. More conversational than Google Ads
4. Can use emojis sparingly (max 1-2 per ad)
5. Focus on emotional connection
6. Use social proof when possible

{FRAMEWORKS}
HOOK-BENEFIT-PROOF-CTA:
- Hook (1 short line that stops scroll)
- Core benefit (you-focused, one sentence)
- Proof (testimonial, statistic, or social proof)
- CTA (single, urgent command)

WRITING RULES:
- Write every line readable at a glance
- Break copy into 3-4 lines max
- Use one idea per line
- Keep verbs strong, promises real
- Use \"you\" language for benefits
- Create emotional connection
- End with clickable action reader can't ignore

TONE: {tone}
OBJECTIVE: {objective}
RESPOND IN VALID JSON FORMAT ONLY.",
        headline_len = limits.headline.max_length,
        description_len = limits.description.max_length,
    )
}

fn user_prompt(request: &GenerationRequest, limits: &PlatformLimits) -> String {
    let platform = request.platform();
    let platform_name = match platform {
        Platform::Google => "Google",
        Platform::Facebook => "Facebook",
    };

    let mut prompt = format!(
        "Generate {platform_name} Ads copy for:\n\n\
         Business: {}\n\
         Description: {}\n\
         Target Audience: {}\n",
        request.business_name, request.business_description, request.target_audience,
    );

    if let Some(objective) = request.target.objective() {
        prompt.push_str(&format!("Campaign Objective: {objective}\n"));
    }

    prompt.push_str(&format!(
        "Key Features: {}\nCall to Action: {}\n",
        request.key_features.join(", "),
        request.call_to_action,
    ));

    if !request.keywords.is_empty() {
        prompt.push_str(&format!(
            "Keywords to include: {}\n",
            request.keywords.join(", ")
        ));
    }

    if let Some(industry) = &request.industry {
        prompt.push_str(&format!("Industry: {industry}\n"));
    }

    if let Some(context) = &request.client_context {
        prompt.push_str(&client_context_block(context));
    }

    prompt.push_str("\nOPTIMIZATION GUIDELINES:\n");
    prompt.push_str(optimization_guidelines(platform));

    prompt.push_str(&format!(
        "\nGenerate {} headlines (max {} chars each) and {} descriptions (max {} chars each).\n\n",
        limits.headline.max_count,
        limits.headline.max_length,
        limits.description.max_count,
        limits.description.max_length,
    ));
    prompt.push_str(JSON_SHAPE);

    prompt
}

fn optimization_guidelines(platform: Platform) -> &'static str {
    match platform {
        Platform::Google => {
            "- Use location-specific targeting when city is provided
- Highlight service categories and specific benefits
- Include industry-specific pain points and solutions
- Create urgency without using exclamation marks
- Focus on ROI and business outcomes
"
        }
        Platform::Facebook => {
            "- Use location-specific messaging if city is provided
- Highlight service-specific benefits
- Address common industry pain points
- Create emotional connection with target audience
- Use social proof language (\"trusted by\", \"helping businesses\")
"
        }
    }
}

/// Renders the client-specific section of the user prompt.
fn client_context_block(context: &ClientContext) -> String {
    let mut block = String::from("\nCLIENT-SPECIFIC CONTEXT:\n");

    if let Some(city) = &context.city {
        block.push_str(&format!("Location: {city} (use for local targeting)\n"));
    }

    if let Some(website) = &context.website {
        block.push_str(&format!("Website: {website}\n"));
    }

    if !context.services.is_empty() {
        block.push_str("Services Offered:\n");
        for (index, service) in context.services.iter().enumerate() {
            block.push_str(&format!(
                "{}. {} ({}): {}\n",
                index + 1,
                service.name,
                service.category,
                service.description
            ));
            if let Some(url) = &service.url {
                block.push_str(&format!("   Service URL: {url}\n"));
            }
        }

        let mut seen = HashSet::new();
        let categories: Vec<&str> = context
            .services
            .iter()
            .map(|s| s.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect();
        block.push_str(&format!("Service Categories: {}\n", categories.join(", ")));
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Service, ServiceCategory};

    fn google_request() -> GenerationRequest {
        GenerationRequest {
            business_name: "Acme".to_string(),
            business_description: "We sell widgets".to_string(),
            target_audience: "homeowners".to_string(),
            key_features: vec!["durable".to_string(), "affordable".to_string()],
            call_to_action: "Shop Now".to_string(),
            keywords: vec![],
            tone: Tone::Professional,
            target: CampaignTarget::Google,
            industry: None,
            client_context: None,
        }
    }

    fn service(name: &str, category: ServiceCategory, url: Option<&str>) -> Service {
        Service {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: format!("{name} done right"),
            category,
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_google_prompts_embed_limits() {
        let prompt = build_prompts(&google_request());

        assert!(prompt.system.contains("Headlines: Maximum 30 characters each"));
        assert!(prompt.system.contains("Descriptions: Maximum 90 characters each"));
        assert!(prompt.system.contains("TONE: professional"));
        assert!(!prompt.system.contains("OBJECTIVE:"));
        assert!(prompt.system.ends_with("RESPOND IN VALID JSON FORMAT ONLY."));

        assert!(prompt.user.starts_with("Generate Google Ads copy for:"));
        assert!(prompt.user.contains("Key Features: durable, affordable\n"));
        assert!(prompt.user.contains("Call to Action: Shop Now\n"));
        assert!(prompt.user.contains(
            "Generate 15 headlines (max 30 chars each) and 4 descriptions (max 90 chars each)."
        ));
        assert!(prompt.user.contains("\"headlines\": [\"headline1\""));
    }

    #[test]
    fn test_optional_lines_omitted() {
        let prompt = build_prompts(&google_request());

        assert!(!prompt.user.contains("Keywords to include"));
        assert!(!prompt.user.contains("Industry:"));
        assert!(!prompt.user.contains("CLIENT-SPECIFIC CONTEXT"));
    }

    #[test]
    fn test_keywords_and_industry_included() {
        let mut request = google_request();
        request.keywords = vec!["widgets".to_string(), "home".to_string()];
        request.industry = Some("retail".to_string());

        let prompt = build_prompts(&request);

        assert!(prompt.user.contains("Keywords to include: widgets, home\n"));
        assert!(prompt.user.contains("Industry: retail\n"));
    }

    #[test]
    fn test_facebook_prompts() {
        let mut request = google_request();
        request.target = CampaignTarget::Facebook {
            objective: Objective::Leads,
        };
        request.tone = Tone::Engaging;

        let prompt = build_prompts(&request);

        assert!(prompt.system.contains("Headlines: Maximum 255 characters each"));
        assert!(prompt.system.contains("Descriptions: Maximum 2200 characters each"));
        assert!(prompt.system.contains("TONE: engaging"));
        assert!(prompt.system.contains("OBJECTIVE: leads"));
        assert!(prompt.user.starts_with("Generate Facebook Ads copy for:"));
        assert!(prompt.user.contains("Campaign Objective: leads\n"));
        assert!(prompt.user.contains(
            "Generate 5 headlines (max 255 chars each) and 5 descriptions (max 2200 chars each)."
        ));
    }

    #[test]
    fn test_client_context_block() {
        let mut request = google_request();
        request.client_context = Some(ClientContext {
            city: Some("Denver".to_string()),
            website: Some("https://acme.example".to_string()),
            services: vec![
                service("Repairs", ServiceCategory::Service, None),
                service("Parts", ServiceCategory::Product, Some("https://acme.example/parts")),
                service("Installs", ServiceCategory::Service, None),
            ],
        });

        let prompt = build_prompts(&request);

        assert!(prompt.user.contains("CLIENT-SPECIFIC CONTEXT:\n"));
        assert!(prompt.user.contains("Location: Denver (use for local targeting)\n"));
        assert!(prompt.user.contains("Website: https://acme.example\n"));
        assert!(prompt.user.contains("1. Repairs (service): Repairs done right\n"));
        assert!(prompt.user.contains(
            "2. Parts (product): Parts done right\n   Service URL: https://acme.example/parts\n"
        ));
        assert!(prompt.user.contains("3. Installs (service): Installs done right\n"));
        assert!(prompt.user.contains("Service Categories: service, product\n"));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let request = google_request();
        assert_eq!(build_prompts(&request), build_prompts(&request));
    }
}
