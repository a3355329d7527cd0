//! Upstream fetch: one batched GraphQL query against the LeetCode problem
//! list, normalized into [`Problem`] records.

use super::error::CatalogueError;
use super::model::{Difficulty, Problem};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::info;

/// Fixed query; one page large enough to cover the whole catalogue.
const PROBLEMSET_QUERY: &str = r"
query problemsetQuestionListV2($filters: QuestionFilterInput, $limit: Int, $skip: Int) {
  problemsetQuestionListV2(
    filters: $filters
    limit: $limit
    skip: $skip
  ) {
    questions {
      id
      titleSlug
      title
      questionFrontendId
      paidOnly
      difficulty
      topicTags {
        name
        slug
      }
      acRate
    }
    totalLength
  }
}
";

const PAGE_LIMIT: u32 = 10_000;

#[derive(Deserialize)]
struct GraphQlEnvelope {
    data: ResponseData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    problemset_question_list_v2: QuestionList,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionList {
    questions: Vec<RawQuestion>,
    #[allow(dead_code)]
    total_length: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(deserialize_with = "string_or_number")]
    question_frontend_id: String,
    title: String,
    title_slug: String,
    paid_only: bool,
    difficulty: String,
    topic_tags: Vec<RawTag>,
    ac_rate: f64,
}

#[derive(Deserialize)]
struct RawTag {
    name: String,
    #[allow(dead_code)]
    slug: String,
}

/// Upstream ids arrive as JSON strings or numbers depending on the field;
/// accept both and keep them as strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

/// Parses a raw response body into normalized problems.
fn parse_body(body: &str) -> Result<Vec<Problem>, CatalogueError> {
    let envelope: GraphQlEnvelope = serde_json::from_str(body)
        .map_err(|e| CatalogueError::UpstreamSchemaMismatch(e.to_string()))?;
    normalize(envelope.data.problemset_question_list_v2.questions)
}

/// Drops paid-only questions and maps the rest onto the internal record
/// shape. Any question violating the record invariants is a schema mismatch,
/// not a silent skip.
fn normalize(questions: Vec<RawQuestion>) -> Result<Vec<Problem>, CatalogueError> {
    let mut problems = Vec::with_capacity(questions.len());
    for q in questions {
        if q.paid_only {
            continue;
        }

        let difficulty = Difficulty::parse(&q.difficulty).ok_or_else(|| {
            CatalogueError::UpstreamSchemaMismatch(format!(
                "unknown difficulty '{}' for question {}",
                q.difficulty, q.id
            ))
        })?;

        if q.id.is_empty() || q.title.is_empty() || q.title_slug.is_empty() {
            return Err(CatalogueError::UpstreamSchemaMismatch(format!(
                "question '{}' is missing a required field",
                q.id
            )));
        }

        problems.push(Problem {
            id: q.id,
            frontend_id: q.question_frontend_id,
            title: q.title,
            slug: q.title_slug,
            difficulty,
            // Percentage scale, rounded to two decimals
            acceptance_rate: (q.ac_rate * 100.0).round() / 100.0,
            tags: q.topic_tags.into_iter().map(|t| t.name).collect(),
        });
    }
    Ok(problems)
}

/// Fetches the full problem catalogue from the LeetCode GraphQL API.
pub struct CatalogueFetcher {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl CatalogueFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Issues the batched query and returns the normalized, paid-filtered
    /// problem list. Transport failures and timeouts are
    /// [`CatalogueError::UpstreamUnavailable`]; malformed bodies are
    /// [`CatalogueError::UpstreamSchemaMismatch`]. No retries here; the
    /// refresh job owns that policy.
    pub async fn fetch(&self) -> Result<Vec<Problem>, CatalogueError> {
        info!(endpoint = %self.endpoint, "fetching problem catalogue");

        let payload = serde_json::json!({
            "query": PROBLEMSET_QUERY,
            "variables": {
                "skip": 0,
                "limit": PAGE_LIMIT,
                "filters": { "filterCombineType": "ALL" },
            },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CatalogueError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogueError::UpstreamUnavailable(format!(
                "status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogueError::UpstreamUnavailable(e.to_string()))?;

        let problems = parse_body(&body)?;
        info!(problems = problems.len(), "catalogue fetch complete");
        Ok(problems)
    }
}
