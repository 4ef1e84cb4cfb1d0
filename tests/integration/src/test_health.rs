//! Health endpoint tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::start_server;

    #[tokio::test]
    async fn test_should_report_health_without_signature() {
        let server = start_server().await.expect("server starts");

        for path in ["/health", "/_health"] {
            let resp = server
                .http
                .get(server.unsigned_url(path))
                .send()
                .await
                .expect("health request");
            assert_eq!(resp.status(), StatusCode::OK);

            let body: serde_json::Value = resp.json().await.expect("json body");
            assert_eq!(body["status"], "running");
        }
    }
}
