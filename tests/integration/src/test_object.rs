//! Object round-trip integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::{start_server, test_object_path};

    #[tokio::test]
    async fn test_should_put_get_and_delete_object() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("roundtrip");

        let resp = server
            .http
            .put(server.client.presign_put(&path, 900))
            .body("hello, stowry!")
            .send()
            .await
            .expect("put request");
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = server
            .http
            .get(server.client.presign_get(&path, 900))
            .send()
            .await
            .expect("get request");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text().await.expect("body"), "hello, stowry!");

        let resp = server
            .http
            .delete(server.client.presign_delete(&path, 900))
            .send()
            .await
            .expect("delete request");
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = server
            .http
            .get(server.client.presign_get(&path, 900))
            .send()
            .await
            .expect("get request");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_should_overwrite_object() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("overwrite");

        for body in ["first", "second"] {
            let resp = server
                .http
                .put(server.client.presign_put(&path, 900))
                .body(body)
                .send()
                .await
                .expect("put request");
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let resp = server
            .http
            .get(server.client.presign_get(&path, 900))
            .send()
            .await
            .expect("get request");
        assert_eq!(resp.text().await.expect("body"), "second");
    }

    #[tokio::test]
    async fn test_should_accept_path_without_leading_slash() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("relative");

        let resp = server
            .http
            .put(server.client.presign_put(path.trim_start_matches('/'), 900))
            .body("data")
            .send()
            .await
            .expect("put request");
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = server
            .http
            .get(server.client.presign_get(&path, 900))
            .send()
            .await
            .expect("get request");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_should_round_trip_paths_that_need_encoding() {
        let server = start_server().await.expect("server starts");

        for path in ["/files/my report.txt", "/files/résumé.pdf"] {
            let resp = server
                .http
                .put(server.client.presign_put(path, 900))
                .body("contents")
                .send()
                .await
                .expect("put request");
            assert_eq!(resp.status(), StatusCode::OK, "PUT {path}");

            let resp = server
                .http
                .get(server.client.presign_get(path, 900))
                .send()
                .await
                .expect("get request");
            assert_eq!(resp.status(), StatusCode::OK, "GET {path}");
            assert_eq!(resp.text().await.expect("body"), "contents");
        }
    }

    #[tokio::test]
    async fn test_should_reject_unsupported_method() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("post");

        let resp = server
            .http
            .post(server.client.presign("POST", &path, 900))
            .body("data")
            .send()
            .await
            .expect("post request");
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_should_tag_responses_with_request_id() {
        let server = start_server().await.expect("server starts");
        let path = test_object_path("headers");

        let resp = server
            .http
            .get(server.client.presign_get(&path, 900))
            .send()
            .await
            .expect("get request");

        assert!(resp.headers().contains_key("x-stowry-request-id"));
        assert_eq!(
            resp.headers().get("server").and_then(|v| v.to_str().ok()),
            Some("Stowry"),
        );
    }
}
