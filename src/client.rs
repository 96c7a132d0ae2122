//! This module provides a client to connect to the activities signup server

use std::error::Error;

use async_trait::async_trait;
use reqwest::{Method, Response};
use serde::Deserialize;
use url::Url;

use crate::activity::ActivityCollection;
use crate::error::SourceError;
use crate::traits::{ActivitySource, MutationReply};


/// The body the server sends along with a refusal
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RejectionBody {
    detail: Option<String>,
}


/// An activity source that fetches its data from the signup server
#[derive(Clone, Debug)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, Box<dyn Error>> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(format!("{} cannot be used as a base URL", base_url).into());
        }

        Ok(Self{
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the server set in [`config::BASE_URL`](crate::config::BASE_URL)
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        let url = match crate::config::BASE_URL.lock() {
            Ok(url) => url.clone(),
            Err(err) => return Err(format!("Configuration is unavailable: {}", err).into()),
        };
        Self::new(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL of an endpoint, relative to the base URL.
    ///
    /// Every segment and query value is percent-encoded
    pub(crate) fn endpoint(&self, segments: &[&str], email: Option<&str>) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut()
                .map_err(|_| SourceError::transport(format!("{} cannot be used as a base URL", self.base_url)))?;
            path.pop_if_empty().extend(segments);
        }
        if let Some(email) = email {
            url.query_pairs_mut().append_pair("email", email);
        }
        Ok(url)
    }

    async fn mutate(&self, method: Method, activity: &str, action: &str, email: &str) -> Result<MutationReply, SourceError> {
        let url = self.endpoint(&["activities", activity, action], Some(email))?;
        log::debug!("{} {}", method, url);

        let response = self.http
            .request(method, url)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(rejection(response).await);
        }

        let reply: MutationReply = response.json().await?;
        Ok(reply)
    }
}

/// Turn a non-2xx answer into a [`SourceError::Rejected`], keeping the server's detail if it sent one
async fn rejection(response: Response) -> SourceError {
    let status = response.status().as_u16();
    let detail = match response.text().await {
        Err(err) => {
            log::warn!("Unable to read the body of a rejected request: {}", err);
            None
        },
        Ok(text) => match serde_json::from_str::<RejectionBody>(&text) {
            Ok(body) => body.detail,
            Err(_) => {
                log::debug!("Rejection body is not JSON: {:?}", text);
                None
            },
        },
    };
    SourceError::Rejected { status, detail }
}

#[async_trait]
impl ActivitySource for Client {
    async fn get_activities(&self) -> Result<ActivityCollection, SourceError> {
        let url = self.endpoint(&["activities"], None)?;
        log::debug!("GET {}", url);

        let response = self.http
            .get(url)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        let activities: ActivityCollection = serde_json::from_str(&text)?;
        log::info!("Fetched {} activities", activities.len());
        Ok(activities)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<MutationReply, SourceError> {
        self.mutate(Method::POST, activity, "signup", email).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationReply, SourceError> {
        self.mutate(Method::DELETE, activity, "unregister", email).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_percent_encoded() {
        let client = Client::new("http://localhost:8000/").unwrap();
        let url = client.endpoint(&["activities", "Chess Club", "signup"], Some("a+b@x.com")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/activities/Chess%20Club/signup?email=a%2Bb%40x.com");

        let url = client.endpoint(&["activities", "Art/Design", "unregister"], Some("a@x.com")).unwrap();
        assert_eq!(url.path(), "/activities/Art%2FDesign/unregister");
    }

    #[test]
    fn endpoints_are_relative_to_the_base_path() {
        let client = Client::new("https://school.example.com/extra/").unwrap();
        let url = client.endpoint(&["activities"], None).unwrap();
        assert_eq!(url.as_str(), "https://school.example.com/extra/activities");

        let client = Client::new("https://school.example.com").unwrap();
        let url = client.endpoint(&["activities"], None).unwrap();
        assert_eq!(url.as_str(), "https://school.example.com/activities");
    }

    #[test]
    fn invalid_base_urls() {
        assert!(Client::new("not a url").is_err());
        assert!(Client::new("mailto:office@mergington.edu").is_err());
    }
}
