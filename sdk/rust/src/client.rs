use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Response envelope returned by every proxy endpoint.
///
/// Failures also arrive as an envelope (with HTTP 500), so callers should
/// branch on `success` rather than the transport status.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub element_count: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Fetch the near-Earth object feed for a date window.
    pub async fn neo(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Envelope, Box<dyn std::error::Error>> {
        let mut params = Vec::new();
        if let Some(v) = start_date {
            params.push(("start_date", v));
        }
        if let Some(v) = end_date {
            params.push(("end_date", v));
        }
        self.fetch("/nasa-neo", &params).await
    }

    /// Fetch orbital data for one small body.
    pub async fn orbital(
        &self,
        query: Option<&str>,
    ) -> Result<Envelope, Box<dyn std::error::Error>> {
        let mut params = Vec::new();
        if let Some(v) = query {
            params.push(("query", v));
        }
        self.fetch("/nasa-orbital", &params).await
    }

    /// Fetch significant earthquakes for a window and magnitude floor.
    pub async fn earthquakes(
        &self,
        start_date: Option<&str>,
        min_magnitude: Option<&str>,
    ) -> Result<Envelope, Box<dyn std::error::Error>> {
        let mut params = Vec::new();
        if let Some(v) = start_date {
            params.push(("start_date", v));
        }
        if let Some(v) = min_magnitude {
            params.push(("min_magnitude", v));
        }
        self.fetch("/earthquake-data", &params).await
    }

    async fn fetch(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Envelope, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .send()
            .await?;

        let text = resp.text().await?;
        match serde_json::from_str::<Envelope>(&text) {
            Ok(envelope) => Ok(envelope),
            Err(e) => Err(e.into()),
        }
    }
}
