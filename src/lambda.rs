#[cfg(feature = "lambda")]
use base64::{engine::general_purpose::STANDARD, Engine as _};
#[cfg(feature = "lambda")]
use consultation_relay::domain::model::{HandlerResponse, InboundSubmission, SubmissionResponse};
#[cfg(feature = "lambda")]
use consultation_relay::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use consultation_relay::{ConfigProvider, ConsultationService, EnvConfig, Web3FormsRelay};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "lambda")]
use std::collections::HashMap;
#[cfg(feature = "lambda")]
use std::sync::Arc;

/// API Gateway proxy request, reduced to what the handler reads.
#[cfg(feature = "lambda")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    pub http_method: String,
    /// REST proxy events carry `null` here when the request had no headers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[cfg(feature = "lambda")]
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(feature = "lambda")]
impl GatewayResponse {
    fn json(status_code: u16, body: &SubmissionResponse) -> Result<Self, Error> {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Ok(Self {
            status_code,
            headers,
            body: serde_json::to_string(body)?,
        })
    }
}

#[cfg(feature = "lambda")]
fn header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[cfg(feature = "lambda")]
async fn function_handler<C: ConfigProvider>(
    service: &ConsultationService<Web3FormsRelay, C>,
    event: LambdaEvent<GatewayRequest>,
) -> Result<GatewayResponse, Error> {
    let request = event.payload;

    if !request.http_method.eq_ignore_ascii_case("POST") {
        return GatewayResponse::json(405, &SubmissionResponse::rejected("Method not allowed"));
    }

    let raw = request.body.unwrap_or_default();
    let body = if request.is_base64_encoded {
        match STANDARD.decode(raw.as_bytes()) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Undecodable base64 body: {}", e);
                return GatewayResponse::json(400, &SubmissionResponse::rejected("Invalid request."));
            }
        }
    } else {
        raw.into_bytes()
    };

    let HandlerResponse { status, body } = service
        .handle(InboundSubmission {
            user_agent: header(&request.headers, "user-agent"),
            forwarded_for: header(&request.headers, "x-forwarded-for"),
            body: &body,
        })
        .await;

    GatewayResponse::json(status, &body)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = EnvConfig::from_env()?;
    config.validate()?;

    let relay = Web3FormsRelay::new(config.relay_endpoint(), config.relay_timeout())?;
    let service = Arc::new(ConsultationService::new(relay, config));

    tracing::info!("Consultation Lambda ready");
    run(service_fn(move |event| {
        let service = Arc::clone(&service);
        async move { function_handler(&*service, event).await }
    }))
    .await
}

#[cfg(all(test, feature = "lambda"))]
mod tests {
    use super::*;

    #[test]
    fn test_null_headers_read_as_empty() {
        let request: GatewayRequest = serde_json::from_str(
            r#"{"httpMethod": "POST", "headers": null, "body": null, "isBase64Encoded": false}"#,
        )
        .unwrap();
        assert!(request.headers.is_empty());
        assert!(header(&request.headers, "user-agent").is_none());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let request: GatewayRequest = serde_json::from_str(
            r#"{"httpMethod": "POST", "headers": {"User-Agent": "Mozilla/5.0 (X11)"}}"#,
        )
        .unwrap();
        assert_eq!(header(&request.headers, "user-agent"), Some("Mozilla/5.0 (X11)"));
    }
}
