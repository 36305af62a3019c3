//! Snapshot and endpoint tests for the inference client

#[cfg(test)]
mod snapshot_tests {
    use crate::InferenceConfig;
    use insta::assert_yaml_snapshot;
    use std::time::Duration;

    #[test]
    fn test_config_snapshot() {
        let config = InferenceConfig::new("hf_test_token_redacted").with_timeout(Duration::from_secs(12));

        assert_yaml_snapshot!(config, @r###"
        api_token: hf_test_token_redacted
        model_repo: google/flan-t5-base
        api_url: "https://api-inference.huggingface.co/models"
        timeout:
          secs: 12
          nanos: 0
        "###);
    }
}

#[cfg(test)]
mod endpoint_tests {
    use std::time::Duration;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use crate::{Error, GenerationConfig, GenerationService, HuggingFaceClient, InferenceConfig};

    const MODEL_PATH: &str = "/models/google/flan-t5-base";

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/models")
    }

    fn client(api_url: String, timeout: Duration) -> HuggingFaceClient {
        let config = InferenceConfig::new("hf_secret")
            .with_api_url(api_url)
            .with_timeout(timeout);
        HuggingFaceClient::new(config).unwrap()
    }

    async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        Json(json!([{
            "generated_text": format!(
                "{} max={}",
                auth,
                body["parameters"]["max_new_tokens"]
            )
        }]))
    }

    #[tokio::test]
    async fn test_generate_sends_token_and_parameters() {
        let url = spawn(Router::new().route(MODEL_PATH, post(echo))).await;
        let client = client(url, Duration::from_secs(5));

        let result = client.generate("Make this human: hi").await.unwrap();
        assert_eq!(result.text, "Bearer hf_secret max=256");
        assert_eq!(result.model_id, "google/flan-t5-base");
        assert_eq!(client.model_id(), "google/flan-t5-base");

        let sized = client.defaults().clone().sized_for(4);
        let result = client.generate_with_config("hi", &sized).await.unwrap();
        assert_eq!(result.text, "Bearer hf_secret max=24");
    }

    #[tokio::test]
    async fn test_empty_output_is_an_error() {
        let router = Router::new().route(
            MODEL_PATH,
            post(|| async { Json(json!([{ "generated_text": "   " }])) }),
        );
        let client = client(spawn(router).await, Duration::from_secs(5));

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }

    #[tokio::test]
    async fn test_loading_model_is_unavailable() {
        let router = Router::new().route(
            MODEL_PATH,
            post(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "error": "Model is currently loading" })),
                )
            }),
        );
        let client = client(spawn(router).await, Duration::from_secs(5));

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, Error::GenerationUnavailable(_)));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let router = Router::new().route(
            MODEL_PATH,
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!([{ "generated_text": "late" }]))
            }),
        );
        let client = client(spawn(router).await, Duration::from_millis(100));

        let config = GenerationConfig {
            timeout: Duration::from_millis(100),
            ..client.defaults().clone()
        };
        let err = client.generate_with_config("prompt", &config).await.unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
    }
}
