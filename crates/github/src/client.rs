//! GitHub GraphQL API client
//!
//! Fetches the viewer's contribution calendar, pull request searches and
//! involved issues. All requests go through the single `/graphql` endpoint.

use chrono::{DateTime, NaiveDate, Utc};
use common::models::{
    ContributionCalendar, ContributionDay, ContributionWeek, Issue, IssueState, PrState,
    PullRequest, RepoRef, ReviewDecision,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

const GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Safety cap on cursor pagination
const MAX_PAGES: u32 = 10;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },
    #[error("Bad credentials")]
    Unauthorized,
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("GraphQL error: {0}")]
    GraphQl(String),
    #[error("Missing data in response: {0}")]
    MissingData(String),
}

impl From<ClientError> for common::Error {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::RateLimited { retry_after } => common::Error::RateLimited { retry_after },
            ClientError::Unauthorized => common::Error::Unauthorized,
            other => common::Error::GitHub(other.to_string()),
        }
    }
}

/// GitHub GraphQL API client
pub struct GitHubClient {
    client: reqwest::Client,
    token: String,
}

const CONTRIBUTION_CALENDAR_QUERY: &str = r#"
query ContributionCalendar($from: DateTime!, $to: DateTime!) {
  viewer {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            color
          }
        }
      }
    }
  }
}
"#;

const PR_SEARCH_QUERY: &str = r#"
query SearchPullRequests($query: String!, $first: Int!, $after: String) {
  search(query: $query, type: ISSUE, first: $first, after: $after) {
    nodes {
      ... on PullRequest {
        number
        title
        state
        reviewDecision
        createdAt
        updatedAt
        repository {
          nameWithOwner
          url
        }
        comments {
          totalCount
        }
        reviews {
          totalCount
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

const ISSUE_SEARCH_QUERY: &str = r#"
query SearchIssues($query: String!, $first: Int!, $after: String) {
  search(query: $query, type: ISSUE, first: $first, after: $after) {
    nodes {
      ... on Issue {
        number
        title
        state
        updatedAt
        repository {
          nameWithOwner
          url
        }
        comments {
          totalCount
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CalendarData {
    viewer: CalendarViewer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarViewer {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: CalendarNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarNode {
    total_contributions: u32,
    weeks: Vec<WeekNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeekNode {
    contribution_days: Vec<DayNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayNode {
    date: NaiveDate,
    contribution_count: u32,
    color: String,
}

#[derive(Debug, Deserialize)]
struct PrSearchData {
    search: PrConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrConnection {
    nodes: Vec<PrNode>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
struct IssueSearchData {
    search: IssueConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueConnection {
    nodes: Vec<IssueNode>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrNode {
    number: i32,
    title: String,
    state: PrState,
    review_decision: Option<ReviewDecision>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    repository: RepoNode,
    comments: CountNode,
    reviews: CountNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    number: i32,
    title: String,
    state: IssueState,
    updated_at: DateTime<Utc>,
    repository: RepoNode,
    comments: CountNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoNode {
    name_with_owner: String,
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountNode {
    total_count: u32,
}

impl From<PrNode> for PullRequest {
    fn from(node: PrNode) -> Self {
        PullRequest {
            number: node.number,
            title: node.title,
            state: node.state,
            review_decision: node.review_decision,
            repo: RepoRef {
                name_with_owner: node.repository.name_with_owner,
                url: node.repository.url,
            },
            created_at: node.created_at,
            updated_at: node.updated_at,
            comments_count: node.comments.total_count,
            reviews_count: node.reviews.total_count,
        }
    }
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        Issue {
            number: node.number,
            title: node.title,
            state: node.state,
            repo: RepoRef {
                name_with_owner: node.repository.name_with_owner,
                url: node.repository.url,
            },
            updated_at: node.updated_at,
            comments_count: node.comments.total_count,
        }
    }
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Self {
        let client = reqwest::Client::new();
        Self {
            client,
            token: token.into(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("octoboard/0.1"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Ok(val) = HeaderValue::from_str(&format!("Bearer {}", self.token)) {
            headers.insert(AUTHORIZATION, val);
        }
        headers
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ClientError> {
        debug!("POST {}", GRAPHQL_URL);
        let resp = self
            .client
            .post(GRAPHQL_URL)
            .headers(self.headers())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if status == reqwest::StatusCode::FORBIDDEN
            || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ClientError::RateLimited { retry_after });
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GraphQlResponse<T> = resp.json().await?;
        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
                return Err(ClientError::GraphQl(messages.join("; ")));
            }
        }
        body.data
            .ok_or_else(|| ClientError::MissingData("response carried no data".to_string()))
    }

    /// Fetch the viewer's contribution calendar for a date range
    pub async fn contribution_calendar(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ContributionCalendar, ClientError> {
        let data: CalendarData = self
            .graphql(
                CONTRIBUTION_CALENDAR_QUERY,
                json!({ "from": from.to_rfc3339(), "to": to.to_rfc3339() }),
            )
            .await?;

        let calendar = data.viewer.contributions_collection.contribution_calendar;
        Ok(ContributionCalendar {
            total_contributions: calendar.total_contributions,
            weeks: calendar
                .weeks
                .into_iter()
                .map(|w| ContributionWeek {
                    days: w
                        .contribution_days
                        .into_iter()
                        .map(|d| ContributionDay {
                            date: d.date,
                            contribution_count: d.contribution_count,
                            color: d.color,
                        })
                        .collect(),
                })
                .collect(),
        })
    }

    /// PRs created by the viewer, newest-updated first
    pub async fn created_pull_requests(&self, limit: u32) -> Result<Vec<PullRequest>, ClientError> {
        self.search_pull_requests("is:pr author:@me archived:false sort:updated-desc", limit)
            .await
    }

    /// PRs the viewer has reviewed (excluding their own)
    pub async fn reviewed_pull_requests(
        &self,
        limit: u32,
    ) -> Result<Vec<PullRequest>, ClientError> {
        self.search_pull_requests(
            "is:pr reviewed-by:@me -author:@me archived:false sort:updated-desc",
            limit,
        )
        .await
    }

    /// PRs the viewer has commented on (excluding their own)
    pub async fn commented_pull_requests(
        &self,
        limit: u32,
    ) -> Result<Vec<PullRequest>, ClientError> {
        self.search_pull_requests(
            "is:pr commenter:@me -author:@me archived:false sort:updated-desc",
            limit,
        )
        .await
    }

    /// Issues the viewer is involved in, newest-updated first
    pub async fn involved_issues(&self, limit: u32) -> Result<Vec<Issue>, ClientError> {
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;
        let per_page = limit.clamp(1, 100);
        let mut page = 1u32;

        loop {
            info!("Fetching issue search page {}", page);
            let data: IssueSearchData = self
                .graphql(
                    ISSUE_SEARCH_QUERY,
                    json!({
                        "query": "is:issue involves:@me archived:false sort:updated-desc",
                        "first": per_page,
                        "after": cursor,
                    }),
                )
                .await?;

            let connection = data.search;
            all.extend(connection.nodes.into_iter().map(Issue::from));

            if all.len() >= limit as usize || !connection.page_info.has_next_page {
                break;
            }
            cursor = connection.page_info.end_cursor;
            page += 1;
            if page > MAX_PAGES {
                warn!("Hit issue pagination limit of {} pages", MAX_PAGES);
                break;
            }
        }

        all.truncate(limit as usize);
        info!("Fetched {} issues", all.len());
        Ok(all)
    }

    /// Run a PR search, following cursors until `limit` items or the last page
    async fn search_pull_requests(
        &self,
        search: &str,
        limit: u32,
    ) -> Result<Vec<PullRequest>, ClientError> {
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;
        let per_page = limit.clamp(1, 100);
        let mut page = 1u32;

        loop {
            info!("Fetching PR search page {} ({})", page, search);
            let data: PrSearchData = self
                .graphql(
                    PR_SEARCH_QUERY,
                    json!({ "query": search, "first": per_page, "after": cursor }),
                )
                .await?;

            let connection = data.search;
            all.extend(connection.nodes.into_iter().map(PullRequest::from));

            if all.len() >= limit as usize || !connection.page_info.has_next_page {
                break;
            }
            cursor = connection.page_info.end_cursor;
            page += 1;
            if page > MAX_PAGES {
                warn!("Hit PR pagination limit of {} pages", MAX_PAGES);
                break;
            }
        }

        all.truncate(limit as usize);
        info!("Fetched {} PRs for search '{}'", all.len(), search);
        Ok(all)
    }
}
