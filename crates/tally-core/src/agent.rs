//! Finance agent orchestrator
//!
//! Wires router -> handler -> retriever and contains every failure: a
//! handler error degrades to a generic summary from the default query
//! pipeline, and if even that fails the caller still gets a well-formed
//! response. No error crosses the `analyze` boundary.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::intents::{self, usd, AgentContext};
use crate::models::{AgentResponse, Intent, IntentReply};
use crate::retriever::Retriever;
use crate::router::IntentRouter;

pub struct FinanceAgent {
    ctx: AgentContext,
    router: IntentRouter,
}

impl FinanceAgent {
    /// Build the agent from an explicitly constructed retriever
    pub fn new(retriever: Retriever) -> Self {
        Self {
            ctx: AgentContext::new(retriever),
            router: IntentRouter::new(),
        }
    }

    pub fn retriever(&self) -> &Retriever {
        &self.ctx.retriever
    }

    /// Answer a question; always returns a well-formed response
    pub async fn analyze(&self, question: &str) -> AgentResponse {
        let intent = self.router.detect(question);
        info!(intent = %intent, "Routed question");

        match intents::dispatch(intent, question, &self.ctx).await {
            Ok(reply) => normalize(reply),
            Err(e) => {
                warn!(intent = %intent, error = %e, "Handler failed, degrading to generic summary");
                self.generic_fallback(intent, question).await
            }
        }
    }

    /// Last-resort recovery: a generic summary from the default query
    async fn generic_fallback(&self, intent: Intent, question: &str) -> AgentResponse {
        match self.ctx.retriever.query(question).await {
            Ok(agg) => {
                let answer = format!(
                    "I hit an internal error while handling '{}', but here's a basic summary: you spent approximately {} across {} transactions.",
                    intent,
                    usd(agg.total_spend),
                    agg.matches
                );
                let data = agg.to_query_data(question);
                AgentResponse {
                    intent: intent.as_str().to_string(),
                    answer,
                    details: build_details_from_data(&data),
                    chart: None,
                    data,
                }
            }
            Err(e) => {
                error!(error = %e, "Generic summary fallback also failed");
                AgentResponse {
                    intent: intent.as_str().to_string(),
                    answer: "Something went wrong while answering this request.".to_string(),
                    details: Value::Object(Default::default()),
                    chart: None,
                    data: Value::Object(Default::default()),
                }
            }
        }
    }
}

/// Normalize a handler reply into the four-field response shape
fn normalize(reply: IntentReply) -> AgentResponse {
    let details = if is_empty_details(&reply.details) {
        build_details_from_data(&reply.data)
    } else {
        reply.details
    };

    AgentResponse {
        intent: reply.intent.as_str().to_string(),
        answer: reply.answer,
        details,
        chart: reply.chart,
        data: reply.data,
    }
}

fn is_empty_details(details: &Value) -> bool {
    match details {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Normalize a data payload into the details block the UI needs
fn build_details_from_data(data: &Value) -> Value {
    let Some(map) = data.as_object() else {
        return Value::Object(Default::default());
    };

    let mut details = serde_json::Map::new();
    for key in [
        "total_restaurant_spend",
        "total_visits",
        "top_restaurants",
        "top_cuisines",
        "top_categories",
    ] {
        if let Some(v) = map.get(key) {
            details.insert(key.to_string(), v.clone());
        }
    }
    Value::Object(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetrieverConfig;
    use crate::embed::{Embedder, EmbeddingClient, MockEmbedder, OllamaEmbedder};
    use crate::index::VectorIndex;
    use crate::models::TransactionRecord;
    use crate::store::TransactionStore;

    fn cafe_record() -> TransactionRecord {
        serde_json::from_value(serde_json::json!({
            "merchantName": "Cafe X",
            "description": "CAFE X",
            "category": "Food & Drink",
            "amount": -12.50,
            "transactionDate": "2025-06-01",
        }))
        .unwrap()
    }

    async fn agent_with(records: Vec<TransactionRecord>) -> FinanceAgent {
        let embedder = MockEmbedder::new();
        let mut index = VectorIndex::new(MockEmbedder::DIMENSION);
        for r in &records {
            let text = r.description.clone().unwrap_or_default();
            index.add(embedder.embed(&text).await.unwrap()).unwrap();
        }
        let retriever = Retriever::new(
            TransactionStore::from_records(records),
            index,
            EmbeddingClient::Mock(embedder),
            RetrieverConfig::default(),
        );
        FinanceAgent::new(retriever)
    }

    #[tokio::test]
    async fn test_restaurant_question_end_to_end() {
        let agent = agent_with(vec![cafe_record()]).await;
        let response = agent
            .analyze("How much did I spend at restaurants in June?")
            .await;

        assert_eq!(response.intent, "restaurant_spend");
        assert_eq!(response.answer, "You spent $12.50 at restaurants across 1 visits.");
        assert_eq!(response.data["total_restaurant_spend"], 12.50);
        assert_eq!(response.data["total_visits"], 1);
        assert_eq!(response.details["top_restaurants"][0]["merchant"], "Cafe X");
        assert_eq!(
            response.details["top_restaurants"][0]["total_spend"],
            12.50
        );
    }

    #[tokio::test]
    async fn test_unrecognized_question_falls_back() {
        let agent = agent_with(vec![cafe_record()]).await;
        let response = agent.analyze("why is the sky blue?").await;
        assert_eq!(response.intent, "fallback");
        assert!(!response.answer.is_empty());
    }

    #[tokio::test]
    async fn test_errors_never_cross_the_analyze_boundary() {
        // An unroutable embedding backend makes every query-path handler
        // fail, and the generic fallback too; analyze must still answer
        let retriever = Retriever::new(
            TransactionStore::from_records(vec![cafe_record()]),
            VectorIndex::new(4),
            EmbeddingClient::Ollama(OllamaEmbedder::new("http://127.0.0.1:1", "none")),
            RetrieverConfig::default(),
        );
        let agent = FinanceAgent::new(retriever);

        let response = agent.analyze("total spend in June").await;
        assert_eq!(response.intent, "overall_spend");
        assert!(!response.answer.is_empty());
    }

    #[tokio::test]
    async fn test_restaurant_path_works_without_embedder() {
        // The full-table restaurant scan never embeds, so it still answers
        // even when the embedding backend is down
        let retriever = Retriever::new(
            TransactionStore::from_records(vec![cafe_record()]),
            VectorIndex::new(4),
            EmbeddingClient::Ollama(OllamaEmbedder::new("http://127.0.0.1:1", "none")),
            RetrieverConfig::default(),
        );
        let agent = FinanceAgent::new(retriever);

        let response = agent.analyze("what did I eat at restaurants in June?").await;
        assert_eq!(response.intent, "restaurant_spend");
        assert_eq!(response.data["total_visits"], 1);
    }

    #[test]
    fn test_build_details_from_data_picks_ui_fields() {
        let data = serde_json::json!({
            "total_restaurant_spend": 10.0,
            "total_visits": 2,
            "top_restaurants": [{"merchant": "A", "total_spend": 10.0}],
            "unrelated": true,
        });
        let details = build_details_from_data(&data);
        assert_eq!(details["total_visits"], 2);
        assert!(details.get("unrelated").is_none());
    }

    #[test]
    fn test_normalize_fills_empty_details() {
        let reply = IntentReply {
            intent: Intent::Fallback,
            answer: "ok".to_string(),
            details: Value::Null,
            chart: None,
            data: serde_json::json!({"total_visits": 3}),
        };
        let response = normalize(reply);
        assert_eq!(response.details["total_visits"], 3);
    }
}
