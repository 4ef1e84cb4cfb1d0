//! Presigned URL rejection tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use stowry_http::StowryHttpConfig;

    use crate::{start_server, start_server_with, test_object_path};

    async fn error_code(resp: reqwest::Response) -> String {
        let body: serde_json::Value = resp.json().await.expect("json error body");
        body["code"].as_str().unwrap_or_default().to_owned()
    }

    #[tokio::test]
    async fn test_should_reject_request_without_signature() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("unsigned");

        let resp = server
            .http
            .get(server.unsigned_url(&path))
            .send()
            .await
            .expect("get request");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(resp).await, "MissingParams");
    }

    #[tokio::test]
    async fn test_should_reject_tampered_signature() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("tampered");

        let url = server.client.presign_get(&path, 900);
        let last = url.chars().last().expect("non-empty url");
        let flipped = if last == '0' { '1' } else { '0' };
        let tampered = format!("{}{flipped}", &url[..url.len() - 1]);

        let resp = server.http.get(tampered).send().await.expect("get request");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(resp).await, "InvalidSignature");
    }

    #[tokio::test]
    async fn test_should_reject_url_used_for_other_method() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("method");

        let resp = server
            .http
            .put(server.client.presign_get(&path, 900))
            .body("data")
            .send()
            .await
            .expect("put request");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_should_reject_url_used_for_other_path() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("path");

        let url = server
            .client
            .presign_get(&path, 900)
            .replacen("/files/", "/other/", 1);
        let resp = server.http.get(url).send().await.expect("get request");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(resp).await, "InvalidSignature");
    }

    #[tokio::test]
    async fn test_should_reject_unknown_credential() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("stranger");

        let resp = server
            .http
            .get(server.stranger().presign_get(&path, 900))
            .send()
            .await
            .expect("get request");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(resp).await, "InvalidCredential");
    }

    #[tokio::test]
    async fn test_should_reject_expired_url() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("expired");

        let url = format!(
            "{}?X-Stowry-Credential={}&X-Stowry-Date=1000&X-Stowry-Expires=900&X-Stowry-Signature={}",
            server.unsigned_url(&path),
            crate::TEST_ACCESS_KEY,
            stowry_auth::sign(crate::TEST_SECRET_KEY.as_bytes(), "GET", &path, 1_000, 900),
        );
        let resp = server.http.get(url).send().await.expect("get request");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(resp).await, "Expired");
    }

    #[tokio::test]
    async fn test_should_reject_everything_without_credentials() {
        let server = start_server_with(StowryHttpConfig::default())
            .await
            .expect("server starts");
        let path = test_object_path("locked");

        let resp = server
            .http
            .get(server.client.presign_get(&path, 900))
            .send()
            .await
            .expect("get request");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_should_serve_unsigned_requests_when_validation_skipped() {
        let server = start_server_with(StowryHttpConfig {
            skip_signature_validation: true,
            ..StowryHttpConfig::default()
        })
        .await
        .expect("server starts");
        let path = test_object_path("open");

        let resp = server
            .http
            .put(server.unsigned_url(&path))
            .body("open")
            .send()
            .await
            .expect("put request");
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
