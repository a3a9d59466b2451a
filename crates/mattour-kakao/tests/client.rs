//! Integration tests for `KakaoClient` using wiremock HTTP mocks.

use mattour_core::Coordinate;
use mattour_kakao::{KakaoClient, KakaoError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> KakaoClient {
    KakaoClient::with_base_url("kakao-test-key", 5, "mattour-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn keyword_search_sends_auth_header_and_parses_documents() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(header("Authorization", "KakaoAK kakao-test-key"))
        .and(query_param("query", "제주시 자매국수"))
        .and(query_param("x", "126.5312"))
        .and(query_param("y", "33.4991"))
        .and(query_param("radius", "300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "documents": [{
                "id": "26338954",
                "place_name": "자매국수 본점",
                "address_name": "제주특별자치도 제주시 일도이동 1034-8",
                "road_address_name": "제주특별자치도 제주시 항골남길 46",
                "phone": "064-746-2222",
                "place_url": "http://place.map.kakao.com/26338954",
                "x": "126.531300",
                "y": "33.499200"
            }],
            "meta": { "total_count": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let docs = client
        .keyword_search("제주시 자매국수", Coordinate::new(33.4991, 126.5312), 300)
        .await
        .expect("should parse documents");

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "26338954");
    assert_eq!(docs[0].place_name, "자매국수 본점");
    assert_eq!(docs[0].coordinate(), Some(Coordinate::new(33.4992, 126.5313)));
}

#[tokio::test]
async fn empty_documents_is_empty_vec() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "documents": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let docs = client
        .keyword_search("없는 가게", Coordinate::new(33.5, 126.5), 300)
        .await
        .unwrap();
    assert!(docs.is_empty());
}

#[tokio::test]
async fn unauthorized_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(&json!({
            "errorType": "AccessDeniedError",
            "message": "wrong appKey"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .keyword_search("q", Coordinate::new(33.5, 126.5), 300)
        .await
        .unwrap_err();
    assert!(matches!(err, KakaoError::Http(_)), "got: {err:?}");
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .keyword_search("q", Coordinate::new(33.5, 126.5), 300)
        .await
        .unwrap_err();
    assert!(matches!(err, KakaoError::Deserialize { .. }), "got: {err:?}");
}
