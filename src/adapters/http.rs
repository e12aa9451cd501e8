use crate::domain::model::CurveRecord;
use crate::domain::ports::CurveSource;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://airdye.io/api/transprint/EqSelectCurveDesno";
pub const DEFAULT_DESIGN_QUERY_PARAM: &str = "DESNO";

/// 呼叫曲線服務：`GET <endpoint>?<param>=<花號>`，回應為曲線物件陣列
#[derive(Debug, Clone)]
pub struct HttpCurveSource {
    client: Client,
    endpoint: String,
    query_param: String,
}

impl HttpCurveSource {
    pub fn new(
        endpoint: impl Into<String>,
        query_param: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            query_param: query_param.into(),
        })
    }
}

#[async_trait]
impl CurveSource for HttpCurveSource {
    async fn fetch_curves(&self, design_number: &str) -> Result<Vec<CurveRecord>> {
        tracing::debug!(
            "Making API request to: {}?{}={}",
            self.endpoint,
            self.query_param,
            design_number
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(self.query_param.as_str(), design_number)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        let curves: Vec<CurveRecord> = serde_json::from_str(&body)?;
        Ok(curves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn source(server: &MockServer) -> HttpCurveSource {
        HttpCurveSource::new(
            server.url("/api/transprint/EqSelectCurveDesno"),
            DEFAULT_DESIGN_QUERY_PARAM,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_curves_queries_by_design_number() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/transprint/EqSelectCurveDesno")
                .query_param("DESNO", "1001");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"desno": "1001", "Layer": 1, "cylno": "1", "curve": "C", "fileName": null},
                    {"desno": "1001", "Layer": 2, "cylno": "2", "curve": "PMS186", "fileName": "pms186.txt"}
                ]));
        });

        let curves = source(&server).fetch_curves("1001").await.unwrap();

        api_mock.assert();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].curve_code.as_deref(), Some("C"));
        assert_eq!(curves[0].file_name, None);
        assert_eq!(curves[1].file_name.as_deref(), Some("pms186.txt"));
    }

    #[tokio::test]
    async fn test_empty_array_is_zero_curves() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).query_param("DESNO", "2002");
            then.status(200).json_body(serde_json::json!([]));
        });

        let curves = source(&server).fetch_curves("2002").await.unwrap();
        assert!(curves.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_not_zero_curves() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(500);
        });

        let err = source(&server).fetch_curves("3003").await.unwrap_err();
        assert!(matches!(err, EtlError::HttpStatusError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_serialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200).body("<html>maintenance</html>");
        });

        let err = source(&server).fetch_curves("4004").await.unwrap_err();
        assert!(matches!(err, EtlError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(serde_json::json!([]));
        });

        let source = HttpCurveSource::new(
            server.url("/curves"),
            DEFAULT_DESIGN_QUERY_PARAM,
            Duration::from_millis(50),
        )
        .unwrap();

        let err = source.fetch_curves("5005").await.unwrap_err();
        match err {
            EtlError::ApiError(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
