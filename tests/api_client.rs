use automail::api::Classifier;

mod error {
    pub use automail::error::*;
}

mod endpoints {
    pub use automail::api::endpoints::*;
}

mod models {
    pub use automail::api::models::*;
}

mod client_under_test {
    #![allow(dead_code)]

    include!("../src/api/client.rs");

    #[test]
    fn detail_with_surrounding_whitespace_is_trimmed() {
        let error = map_api_error(StatusCode::BAD_REQUEST, r#"{"detail":"  Texto vazio  "}"#);
        assert_eq!(error.to_string(), "Texto vazio");
    }

    #[test]
    fn blank_detail_falls_back_to_status() {
        let error = map_api_error(StatusCode::BAD_GATEWAY, r#"{"detail":"   "}"#);
        assert_eq!(error.to_string(), "HTTP error 502");
    }

    #[test]
    fn text_input_is_reported_as_text() {
        let input = SubmissionInput::Text("hello".to_string());
        assert_eq!(input_kind(&input), "text");
    }
}

mod http {
    use std::time::Duration;

    use automail::api::{Classifier, ClassifierClient, SubmissionInput, UploadedFile};
    use automail::error::AppError;
    use mockito::Matcher;

    fn client(url: &str) -> ClassifierClient {
        ClassifierClient::new(url, Duration::from_secs(5)).expect("client should build")
    }

    #[tokio::test]
    async fn posts_text_as_multipart_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/analyze")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data".to_string()),
            )
            .match_body(Matcher::Regex(
                r#"name="text"[\s\S]*Status do chamado 12345\?"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"category":"Produtivo","suggested_response":"Estamos verificando o chamado."}"#,
            )
            .create_async()
            .await;

        let response = client(&server.url())
            .classify(&SubmissionInput::Text("Status do chamado 12345?".to_string()))
            .await
            .expect("classify should succeed");

        mock.assert_async().await;
        assert_eq!(response.category, "Produtivo");
        assert_eq!(response.suggested_response, "Estamos verificando o chamado.");
    }

    #[tokio::test]
    async fn posts_file_under_file_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/analyze")
            .match_body(Matcher::Regex(
                r#"name="file"; filename="pedido.txt""#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"category":"Improdutivo","suggested_response":"Obrigado!"}"#)
            .create_async()
            .await;

        let file = UploadedFile::new(
            "pedido.txt",
            Some("text/plain".to_string()),
            b"Feliz natal".to_vec(),
        );
        let response = client(&server.url())
            .classify(&SubmissionInput::File(file))
            .await
            .expect("classify should succeed");

        mock.assert_async().await;
        assert_eq!(response.category, "Improdutivo");
    }

    #[tokio::test]
    async fn missing_suggested_response_defaults_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/analyze")
            .with_status(200)
            .with_body(r#"{"category":"Improdutivo"}"#)
            .create_async()
            .await;

        let response = client(&server.url())
            .classify(&SubmissionInput::Text("oi".to_string()))
            .await
            .expect("classify should succeed");

        assert_eq!(response.suggested_response, "");
    }

    #[tokio::test]
    async fn surfaces_detail_from_error_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/analyze")
            .with_status(400)
            .with_body(r#"{"detail":"Arquivo não suportado"}"#)
            .create_async()
            .await;

        let error = client(&server.url())
            .classify(&SubmissionInput::Text("oi".to_string()))
            .await
            .expect_err("classify should fail");

        assert!(matches!(error, AppError::Transport(_)));
        assert_eq!(error.to_string(), "Arquivo não suportado");
    }

    #[tokio::test]
    async fn falls_back_to_status_for_non_json_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/analyze")
            .with_status(503)
            .with_body("<html>unavailable</html>")
            .create_async()
            .await;

        let error = client(&server.url())
            .classify(&SubmissionInput::Text("oi".to_string()))
            .await
            .expect_err("classify should fail");

        assert_eq!(error.to_string(), "HTTP error 503");
    }

    #[tokio::test]
    async fn malformed_success_body_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/analyze")
            .with_status(200)
            .with_body(r#"{"suggested_response":"no category"}"#)
            .create_async()
            .await;

        let error = client(&server.url())
            .classify(&SubmissionInput::Text("oi".to_string()))
            .await
            .expect_err("classify should fail");

        assert!(matches!(error, AppError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn base_url_path_prefixes_endpoints() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/automail/api/analyze")
            .with_status(200)
            .with_body(r#"{"category":"Produtivo","suggested_response":"ok"}"#)
            .create_async()
            .await;

        let base = format!("{}/automail", server.url());
        client(&base)
            .classify(&SubmissionInput::Text("oi".to_string()))
            .await
            .expect("classify should succeed");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn reads_health_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(r#"{"status":"ok"}"#)
            .create_async()
            .await;

        let status = client(&server.url())
            .health()
            .await
            .expect("health should succeed");
        assert_eq!(status.status, "ok");
    }
}
