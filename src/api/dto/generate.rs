//! DTOs for the ad generation endpoints.
//!
//! Both platforms share one request shape; platform-specific rules (the
//! Facebook objective, allowed tones) are applied when the DTO is turned
//! into a domain [`GenerationRequest`].

use serde::Deserialize;
use validator::Validate;

use crate::application::services::ClientSelection;
use crate::domain::entities::{
    CampaignTarget, ClientContext, GenerationRequest, Objective, Service, ServiceCategory, Tone,
};
use crate::domain::platform::Platform;
use crate::error::AppError;

/// Request body for `POST /api/generate/{platform}`.
///
/// Either carries the business profile directly, references a stored client
/// through `clientId` (optionally narrowed with `serviceId`), or both, in
/// which case explicit fields take precedence over the stored client.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAdsRequest {
    #[serde(default)]
    pub business_name: Option<String>,

    #[serde(default)]
    pub business_description: Option<String>,

    #[serde(default)]
    pub target_audience: Option<String>,

    #[serde(default)]
    #[validate(length(max = 5, message = "keyFeatures must contain at most 5 entries"))]
    pub key_features: Option<Vec<String>>,

    #[serde(default)]
    pub call_to_action: Option<String>,

    #[serde(default)]
    pub keywords: Option<Vec<String>>,

    #[serde(default)]
    pub tone: Option<String>,

    /// Required for Facebook, ignored for Google.
    #[serde(default)]
    pub objective: Option<String>,

    #[serde(default)]
    pub industry: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub client_data: Option<ClientDataDto>,

    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    pub service_id: Option<String>,
}

/// Inline client details supplied by the caller.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientDataDto {
    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    #[validate(url(message = "clientData.website must be a valid URL"))]
    pub website: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub services: Vec<ServiceDto>,
}

/// A service listed inline in `clientData`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    #[serde(default)]
    pub id: Option<String>,

    #[validate(length(min = 1, message = "clientData.services[].name must not be empty"))]
    pub name: String,

    #[validate(length(
        min = 1,
        message = "clientData.services[].description must not be empty"
    ))]
    pub description: String,

    pub category: ServiceCategory,

    #[serde(default)]
    #[validate(url(message = "clientData.services[].url must be a valid URL"))]
    pub url: Option<String>,
}

impl From<ServiceDto> for Service {
    fn from(dto: ServiceDto) -> Self {
        Service {
            id: dto.id.unwrap_or_default(),
            name: dto.name,
            description: dto.description,
            category: dto.category,
            url: dto.url,
        }
    }
}

impl From<ClientDataDto> for ClientContext {
    fn from(dto: ClientDataDto) -> Self {
        ClientContext {
            city: dto.city,
            website: dto.website,
            services: dto.services.into_iter().map(Service::from).collect(),
        }
    }
}

impl GenerateAdsRequest {
    /// Trims text fields and treats blank values as absent.
    pub fn normalize(&mut self) {
        for field in [
            &mut self.business_name,
            &mut self.business_description,
            &mut self.target_audience,
            &mut self.call_to_action,
            &mut self.tone,
            &mut self.objective,
            &mut self.industry,
            &mut self.client_id,
            &mut self.service_id,
        ] {
            normalize_text(field);
        }

        if let Some(features) = &mut self.key_features {
            trim_list(features);
        }
        if let Some(keywords) = &mut self.keywords {
            trim_list(keywords);
        }

        if let Some(client_data) = &mut self.client_data {
            normalize_text(&mut client_data.city);
            normalize_text(&mut client_data.website);
            for service in &mut client_data.services {
                normalize_text(&mut service.id);
                service.name = service.name.trim().to_string();
                service.description = service.description.trim().to_string();
                normalize_text(&mut service.url);
            }
        }
    }

    /// Returns the stored client (and service) this request refers to, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `serviceId` is given without `clientId`.
    pub fn client_reference(&self) -> Result<Option<(&str, Option<&str>)>, AppError> {
        match (&self.client_id, &self.service_id) {
            (Some(client_id), service_id) => {
                Ok(Some((client_id.as_str(), service_id.as_deref())))
            }
            (None, Some(_)) => Err(AppError::missing_field("clientId")),
            (None, None) => Ok(None),
        }
    }

    /// Converts the request into a domain request for `platform`.
    ///
    /// Fields missing from the body are first filled from `selection`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with a field-naming message if a
    /// required field is missing, `keyFeatures` is empty, the objective or
    /// tone is not accepted, or a structural check fails.
    pub fn into_generation_request(
        mut self,
        platform: Platform,
        selection: Option<ClientSelection>,
    ) -> Result<GenerationRequest, AppError> {
        if let Some(selection) = &selection {
            self.fill_from(selection);
        }

        self.check_required(platform)?;

        let target = match platform {
            Platform::Google => CampaignTarget::Google,
            Platform::Facebook => CampaignTarget::Facebook {
                objective: parse_objective(self.objective.as_deref())?,
            },
        };
        let tone = parse_tone(self.tone.as_deref(), platform)?;

        self.validate()?;

        let client_context = match self.client_data {
            Some(client_data) => Some(ClientContext::from(client_data)),
            None => selection.map(|s| s.context()),
        };

        Ok(GenerationRequest {
            business_name: self.business_name.unwrap_or_default(),
            business_description: self.business_description.unwrap_or_default(),
            target_audience: self.target_audience.unwrap_or_default(),
            key_features: self.key_features.unwrap_or_default(),
            call_to_action: self.call_to_action.unwrap_or_default(),
            keywords: self.keywords.unwrap_or_default(),
            tone,
            target,
            industry: self.industry,
            client_context,
        })
    }

    /// Stored values go through the same trimming as the body, so a blank
    /// stored field still counts as missing.
    fn fill_from(&mut self, selection: &ClientSelection) {
        if self.business_name.is_none() {
            self.business_name = Some(selection.client.business_name.clone());
            normalize_text(&mut self.business_name);
        }
        if self.business_description.is_none() {
            self.business_description = selection.business_description().map(str::to_string);
            normalize_text(&mut self.business_description);
        }
        if self.industry.is_none() {
            self.industry = selection.client.industry.clone();
            normalize_text(&mut self.industry);
        }
    }

    /// Checks required fields in the order callers see them reported.
    fn check_required(&self, platform: Platform) -> Result<(), AppError> {
        let mut required: Vec<(&str, bool)> = vec![
            ("businessName", self.business_name.is_some()),
            ("businessDescription", self.business_description.is_some()),
            ("targetAudience", self.target_audience.is_some()),
        ];
        if platform == Platform::Facebook {
            required.push(("objective", self.objective.is_some()));
        }
        required.push(("keyFeatures", self.key_features.is_some()));
        required.push(("callToAction", self.call_to_action.is_some()));

        if let Some((field, _)) = required.into_iter().find(|(_, present)| !present) {
            return Err(AppError::missing_field(field));
        }

        if self.key_features.as_ref().is_some_and(Vec::is_empty) {
            return Err(AppError::bad_request(
                "keyFeatures must be a non-empty array",
            ));
        }

        Ok(())
    }
}

fn parse_objective(value: Option<&str>) -> Result<Objective, AppError> {
    let value = value.ok_or_else(|| AppError::missing_field("objective"))?;
    value.parse().map_err(|_| {
        let allowed: Vec<&str> = Objective::ALL.iter().map(Objective::as_str).collect();
        AppError::bad_request(format!(
            "Invalid objective. Must be one of: {}",
            allowed.join(", ")
        ))
    })
}

fn parse_tone(value: Option<&str>, platform: Platform) -> Result<Tone, AppError> {
    let Some(value) = value else {
        return Ok(Tone::default());
    };

    let allowed = Tone::allowed_for(platform);
    match value.parse::<Tone>() {
        Ok(tone) if allowed.contains(&tone) => Ok(tone),
        _ => {
            let names: Vec<&str> = allowed.iter().map(Tone::as_str).collect();
            Err(AppError::bad_request(format!(
                "Invalid tone. Must be one of: {}",
                names.join(", ")
            )))
        }
    }
}

fn normalize_text(value: &mut Option<String>) {
    *value = value
        .take()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
}

fn trim_list(items: &mut Vec<String>) {
    *items = std::mem::take(items)
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Client;
    use chrono::Utc;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateAdsRequest {
        let mut request: GenerateAdsRequest = serde_json::from_value(value).unwrap();
        request.normalize();
        request
    }

    fn acme() -> serde_json::Value {
        json!({
            "businessName": "Acme",
            "businessDescription": "We sell widgets",
            "targetAudience": "homeowners",
            "keyFeatures": ["durable", "affordable"],
            "callToAction": "Shop Now"
        })
    }

    fn selection(service: bool) -> ClientSelection {
        let stored = Service {
            id: "svc-1".to_string(),
            name: "Repairs".to_string(),
            description: "Fast widget repairs".to_string(),
            category: ServiceCategory::Service,
            url: None,
        };
        ClientSelection {
            client: Client {
                id: "client-1".to_string(),
                user_id: "user-1".to_string(),
                business_name: "Stored Acme".to_string(),
                contact_email: None,
                city: Some("Denver".to_string()),
                industry: Some("retail".to_string()),
                website: None,
                description: Some("Stored description".to_string()),
                services: vec![stored.clone()],
                is_active: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            service: service.then_some(stored),
        }
    }

    #[test]
    fn test_google_request_without_objective_is_valid() {
        let request = parse(acme())
            .into_generation_request(Platform::Google, None)
            .unwrap();

        assert_eq!(request.target, CampaignTarget::Google);
        assert_eq!(request.tone, Tone::Professional);
        assert_eq!(request.key_features, vec!["durable", "affordable"]);
        assert!(request.client_context.is_none());
    }

    #[test]
    fn test_missing_call_to_action() {
        let mut body = acme();
        body.as_object_mut().unwrap().remove("callToAction");

        let err = parse(body)
            .into_generation_request(Platform::Google, None)
            .unwrap_err();

        assert_eq!(err.public_message(), "Missing required field: callToAction");
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let mut body = acme();
        body["targetAudience"] = json!("   ");

        let err = parse(body)
            .into_generation_request(Platform::Google, None)
            .unwrap_err();

        assert_eq!(err.public_message(), "Missing required field: targetAudience");
    }

    #[test]
    fn test_required_fields_reported_in_order() {
        let err = parse(json!({}))
            .into_generation_request(Platform::Facebook, None)
            .unwrap_err();
        assert_eq!(err.public_message(), "Missing required field: businessName");

        let mut body = acme();
        body.as_object_mut().unwrap().remove("callToAction");
        let err = parse(body)
            .into_generation_request(Platform::Facebook, None)
            .unwrap_err();
        assert_eq!(err.public_message(), "Missing required field: objective");
    }

    #[test]
    fn test_empty_key_features() {
        let mut body = acme();
        body["keyFeatures"] = json!([]);

        let err = parse(body)
            .into_generation_request(Platform::Google, None)
            .unwrap_err();

        assert_eq!(err.public_message(), "keyFeatures must be a non-empty array");
    }

    #[test]
    fn test_too_many_key_features() {
        let mut body = acme();
        body["keyFeatures"] = json!(["a", "b", "c", "d", "e", "f"]);

        let err = parse(body)
            .into_generation_request(Platform::Google, None)
            .unwrap_err();

        assert_eq!(
            err.public_message(),
            "keyFeatures must contain at most 5 entries"
        );
    }

    #[test]
    fn test_facebook_objective() {
        let mut body = acme();
        body["objective"] = json!("conversions");
        let request = parse(body)
            .into_generation_request(Platform::Facebook, None)
            .unwrap();
        assert_eq!(
            request.target,
            CampaignTarget::Facebook {
                objective: Objective::Conversions
            }
        );

        let mut body = acme();
        body["objective"] = json!("virality");
        let err = parse(body)
            .into_generation_request(Platform::Facebook, None)
            .unwrap_err();
        assert_eq!(
            err.public_message(),
            "Invalid objective. Must be one of: awareness, traffic, engagement, leads, sales, conversions"
        );
    }

    #[test]
    fn test_tone_per_platform() {
        let mut body = acme();
        body["tone"] = json!("engaging");
        let err = parse(body)
            .into_generation_request(Platform::Google, None)
            .unwrap_err();
        assert_eq!(
            err.public_message(),
            "Invalid tone. Must be one of: professional, casual, friendly, authoritative, playful"
        );

        let mut body = acme();
        body["tone"] = json!("engaging");
        body["objective"] = json!("leads");
        let request = parse(body)
            .into_generation_request(Platform::Facebook, None)
            .unwrap();
        assert_eq!(request.tone, Tone::Engaging);
    }

    #[test]
    fn test_invalid_website_rejected() {
        let mut body = acme();
        body["clientData"] = json!({"website": "not a url"});

        let err = parse(body)
            .into_generation_request(Platform::Google, None)
            .unwrap_err();

        assert_eq!(
            err.public_message(),
            "clientData.website must be a valid URL"
        );
    }

    #[test]
    fn test_inline_client_data() {
        let mut body = acme();
        body["clientData"] = json!({
            "city": "Austin",
            "website": "https://acme.example",
            "services": [
                {"name": "Parts", "description": "Spare parts", "category": "product"}
            ]
        });

        let request = parse(body)
            .into_generation_request(Platform::Google, None)
            .unwrap();

        let context = request.client_context.unwrap();
        assert_eq!(context.city.as_deref(), Some("Austin"));
        assert_eq!(context.services[0].category, ServiceCategory::Product);
    }

    #[test]
    fn test_blank_inline_service_name_rejected() {
        let mut body = acme();
        body["clientData"] = json!({
            "services": [
                {"name": "  ", "description": "Spare parts", "category": "product"}
            ]
        });

        let err = parse(body)
            .into_generation_request(Platform::Google, None)
            .unwrap_err();

        assert_eq!(
            err.public_message(),
            "clientData.services[].name must not be empty"
        );
    }

    #[test]
    fn test_blank_inline_service_description_rejected() {
        let mut body = acme();
        body["clientData"] = json!({
            "services": [
                {"name": "Parts", "description": "", "category": "product"}
            ]
        });

        let err = parse(body)
            .into_generation_request(Platform::Google, None)
            .unwrap_err();

        assert_eq!(
            err.public_message(),
            "clientData.services[].description must not be empty"
        );
    }

    #[test]
    fn test_service_without_client() {
        let request = parse(json!({"serviceId": "svc-1"}));
        let err = request.client_reference().unwrap_err();
        assert_eq!(err.public_message(), "Missing required field: clientId");
    }

    #[test]
    fn test_blank_ids_ignored() {
        let request = parse(json!({"clientId": "", "serviceId": " "}));
        assert!(request.client_reference().unwrap().is_none());
    }

    #[test]
    fn test_fill_from_stored_client() {
        let body = json!({
            "clientId": "client-1",
            "serviceId": "svc-1",
            "targetAudience": "homeowners",
            "keyFeatures": ["fast"],
            "callToAction": "Book Now"
        });

        let request = parse(body)
            .into_generation_request(Platform::Google, Some(selection(true)))
            .unwrap();

        assert_eq!(request.business_name, "Stored Acme");
        assert_eq!(request.business_description, "Fast widget repairs");
        assert_eq!(request.industry.as_deref(), Some("retail"));

        let context = request.client_context.unwrap();
        assert_eq!(context.city.as_deref(), Some("Denver"));
        assert_eq!(context.services.len(), 1);
    }

    #[test]
    fn test_explicit_fields_win_over_stored_client() {
        let mut body = acme();
        body["clientId"] = json!("client-1");

        let request = parse(body)
            .into_generation_request(Platform::Google, Some(selection(false)))
            .unwrap();

        assert_eq!(request.business_name, "Acme");
        assert_eq!(request.business_description, "We sell widgets");
    }

    #[test]
    fn test_blank_stored_name_counts_as_missing() {
        let mut selection = selection(false);
        selection.client.business_name = "   ".to_string();
        selection.client.description = Some(String::new());

        let body = json!({
            "clientId": "client-1",
            "targetAudience": "homeowners",
            "keyFeatures": ["fast"],
            "callToAction": "Book Now"
        });

        let err = parse(body)
            .into_generation_request(Platform::Google, Some(selection))
            .unwrap_err();

        assert_eq!(err.public_message(), "Missing required field: businessName");
    }

    #[test]
    fn test_blank_stored_description_counts_as_missing() {
        let mut selection = selection(false);
        selection.client.description = Some("  ".to_string());
        selection.client.industry = Some(" ".to_string());

        let body = json!({
            "clientId": "client-1",
            "targetAudience": "homeowners",
            "keyFeatures": ["fast"],
            "callToAction": "Book Now"
        });

        let err = parse(body)
            .into_generation_request(Platform::Google, Some(selection))
            .unwrap_err();

        assert_eq!(
            err.public_message(),
            "Missing required field: businessDescription"
        );
    }

    #[test]
    fn test_stored_values_are_trimmed() {
        let mut selection = selection(false);
        selection.client.business_name = "  Stored Acme ".to_string();
        selection.client.industry = Some("".to_string());

        let body = json!({
            "clientId": "client-1",
            "targetAudience": "homeowners",
            "keyFeatures": ["fast"],
            "callToAction": "Book Now"
        });

        let request = parse(body)
            .into_generation_request(Platform::Google, Some(selection))
            .unwrap();

        assert_eq!(request.business_name, "Stored Acme");
        assert_eq!(request.business_description, "Stored description");
        assert!(request.industry.is_none());
    }
}
