//! End-to-end answer orchestration.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::db::{PineconeIndex, VectorStore};
use crate::llm::{ChatClient, ChatProvider};
use crate::memory::Conversation;
use crate::rag::embeddings::{EmbeddingClient, RemoteEmbedder};
use crate::rag::prompts;
use crate::rag::reranker::{RemoteReranker, RerankClient, rank_passages};
use crate::types::{AppError, PipelineAnswer, QueryKind, RetrievedPassage, Result};
use crate::utils::config::{Config, PipelineConfig};

/// The RAG answer pipeline.
///
/// Owns one client per external service; all stages run sequentially with
/// one request in flight at a time.
pub struct RagPipeline {
    chat: Box<dyn ChatClient>,
    embedder: Box<dyn EmbeddingClient>,
    store: Box<dyn VectorStore>,
    reranker: Box<dyn RerankClient>,
    config: PipelineConfig,
}

impl RagPipeline {
    /// Assemble a pipeline from pre-built clients.
    pub fn new(
        chat: Box<dyn ChatClient>,
        embedder: Box<dyn EmbeddingClient>,
        store: Box<dyn VectorStore>,
        reranker: Box<dyn RerankClient>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            chat,
            embedder,
            store,
            reranker,
            config,
        }
    }

    /// Build the pipeline with the default hosted clients from
    /// configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.pipeline.request_timeout_secs);

        let chat = ChatProvider::from(&config.llm).create_client();
        let embedder = Box::new(RemoteEmbedder::new(
            config.embedding.api_base.clone(),
            config.embedding.api_key.clone(),
            config.embedding.model.clone(),
        ));
        let store = Box::new(PineconeIndex::new(
            config.vector.index_host.clone(),
            config.vector.api_key.clone(),
            timeout,
        )?);
        let reranker = Box::new(RemoteReranker::new(
            config.rerank.api_base.clone(),
            config.rerank.api_key.clone(),
            config.rerank.model.clone(),
            timeout,
        )?);

        Ok(Self::new(
            chat,
            embedder,
            store,
            reranker,
            config.pipeline.clone(),
        ))
    }

    /// Ask the LLM whether the query is medical in nature.
    pub async fn classify(&self, query: &str) -> Result<QueryKind> {
        let verdict = self.chat.generate(&prompts::relevance_check(query)).await?;
        let kind = parse_verdict(&verdict);
        debug!(%query, raw = %verdict.trim(), ?kind, "relevance verdict");
        Ok(kind)
    }

    /// Embed the query and fetch nearest-neighbor passages.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedPassage>> {
        let embedding = self.embedder.embed(query).await?;
        let matches = self
            .store
            .query(&embedding, self.config.retrieval_top_k)
            .await?;

        debug!(count = matches.len(), "retrieved passages");
        Ok(matches
            .into_iter()
            .map(|m| RetrievedPassage {
                text: m.text,
                score: m.score,
            })
            .collect())
    }

    /// Answer a query given the running conversation.
    ///
    /// Medical queries take the grounded branch; out-of-domain queries (and
    /// medical queries whose retrieval comes back empty) take the fallback
    /// branch. The transcript is rendered once and shared by both branches.
    pub async fn answer(&self, conversation: &Conversation, query: &str) -> Result<PipelineAnswer> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput("empty query".to_string()));
        }

        let history = conversation.transcript();
        let kind = self.classify(query).await?;

        if kind == QueryKind::Medical {
            let passages = self.retrieve(query).await?;
            if passages.is_empty() {
                warn!(%query, "medical query with empty retrieval, falling back");
                return self.answer_fallback(query, &history).await;
            }

            let documents: Vec<String> = passages.iter().map(|p| p.text.clone()).collect();
            let scores = self.reranker.score(query, &documents).await?;
            let kept = rank_passages(&passages, &scores, self.config.rerank_keep);
            if kept.is_empty() {
                warn!(%query, "reranker kept nothing, falling back");
                return self.answer_fallback(query, &history).await;
            }

            let context = kept
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(" \n");
            let summarized = self
                .chat
                .generate(&prompts::context_summary(&context))
                .await?;
            debug!(passages = kept.len(), "summarized retrieval context");

            let reply = self
                .chat
                .generate(&prompts::grounded_answer(query, &summarized, &history))
                .await?;

            info!(%query, passages = kept.len(), "grounded answer generated");
            Ok(PipelineAnswer {
                text: reply,
                kind: QueryKind::Medical,
                passages_used: kept.len(),
            })
        } else {
            self.answer_fallback(query, &history).await
        }
    }

    /// Answer over text extracted from an uploaded medical report.
    pub async fn answer_report(
        &self,
        conversation: &Conversation,
        report_text: &str,
    ) -> Result<PipelineAnswer> {
        let report_text = report_text.trim();
        if report_text.is_empty() {
            return Err(AppError::Report(
                "no text extracted from the report".to_string(),
            ));
        }

        let history = conversation.transcript();
        let reply = self
            .chat
            .generate(&prompts::report_answer(report_text, &history))
            .await?;

        info!(chars = report_text.len(), "report answer generated");
        Ok(PipelineAnswer {
            text: reply,
            kind: QueryKind::Medical,
            passages_used: 0,
        })
    }

    async fn answer_fallback(&self, query: &str, history: &str) -> Result<PipelineAnswer> {
        let reply = self
            .chat
            .generate(&prompts::fallback_answer(query, history))
            .await?;

        info!(%query, "fallback answer generated");
        Ok(PipelineAnswer {
            text: reply,
            kind: QueryKind::OutOfDomain,
            passages_used: 0,
        })
    }
}

/// Parse the classifier's free-text verdict.
///
/// Accepts a leading "yes"/"no" in any case, ignoring surrounding
/// punctuation. Anything unparseable is treated as out-of-domain so the
/// pipeline degrades to the cheaper branch.
pub fn parse_verdict(raw: &str) -> QueryKind {
    let normalized = raw
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
        .to_ascii_lowercase();

    if normalized.starts_with("yes") {
        QueryKind::Medical
    } else if normalized.starts_with("no") {
        QueryKind::OutOfDomain
    } else {
        warn!(verdict = %raw.trim(), "unparseable relevance verdict, treating as out-of-domain");
        QueryKind::OutOfDomain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ScoredMatch;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ============= Test Doubles =============

    /// Chat client that pops canned replies and records prompts.
    struct ScriptedChat {
        replies: Mutex<Vec<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedChat {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().rev().map(|s| s.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedChat {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| AppError::Llm("script exhausted".to_string()))
        }

        async fn generate_with_system(&self, _system: &str, prompt: &str) -> Result<String> {
            self.generate(prompt).await
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    #[async_trait]
    impl ChatClient for std::sync::Arc<ScriptedChat> {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.as_ref().generate(prompt).await
        }

        async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
            self.as_ref().generate_with_system(system, prompt).await
        }

        fn model_name(&self) -> &str {
            self.as_ref().model_name()
        }
    }

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingClient for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.1, 0.2, 0.3])
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    struct FixedStore {
        matches: Vec<ScoredMatch>,
    }

    #[async_trait]
    impl VectorStore for FixedStore {
        async fn query(&self, _embedding: &[f32], _top_k: usize) -> Result<Vec<ScoredMatch>> {
            Ok(self.matches.clone())
        }
    }

    struct FixedReranker {
        scores: Vec<f32>,
    }

    #[async_trait]
    impl RerankClient for FixedReranker {
        async fn score(&self, _query: &str, documents: &[String]) -> Result<Vec<f32>> {
            Ok(self.scores.iter().copied().take(documents.len()).collect())
        }
    }

    fn pipeline(
        replies: &[&str],
        matches: Vec<ScoredMatch>,
        scores: Vec<f32>,
    ) -> RagPipeline {
        RagPipeline::new(
            Box::new(ScriptedChat::new(replies)),
            Box::new(FixedEmbedder),
            Box::new(FixedStore { matches }),
            Box::new(FixedReranker { scores }),
            PipelineConfig::default(),
        )
    }

    fn matches(texts: &[&str]) -> Vec<ScoredMatch> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| ScoredMatch {
                id: format!("vec-{}", i),
                score: 0.9 - i as f32 * 0.1,
                text: t.to_string(),
            })
            .collect()
    }

    // ============= Verdict Parsing =============

    #[test]
    fn test_parse_verdict_yes_variants() {
        assert_eq!(parse_verdict("Yes"), QueryKind::Medical);
        assert_eq!(parse_verdict("yes."), QueryKind::Medical);
        assert_eq!(parse_verdict("  YES, it is medical"), QueryKind::Medical);
        assert_eq!(parse_verdict("\"Yes\""), QueryKind::Medical);
    }

    #[test]
    fn test_parse_verdict_no_variants() {
        assert_eq!(parse_verdict("No"), QueryKind::OutOfDomain);
        assert_eq!(parse_verdict("no, it is not"), QueryKind::OutOfDomain);
    }

    #[test]
    fn test_parse_verdict_garbage_is_out_of_domain() {
        assert_eq!(parse_verdict("I cannot decide"), QueryKind::OutOfDomain);
        assert_eq!(parse_verdict(""), QueryKind::OutOfDomain);
    }

    // ============= Pipeline Branches =============

    #[tokio::test]
    async fn test_grounded_branch_uses_top_passages() {
        // Replies: verdict, context summary, final answer.
        let chat_replies = ["Yes", "Summarized disease context", "Drink fluids and rest."];
        let pipe = pipeline(
            &chat_replies,
            matches(&["passage a", "passage b", "passage c", "passage d"]),
            vec![0.2, 0.9, 0.4, 0.8],
        );

        let convo = Conversation::new(0);
        let answer = pipe.answer(&convo, "I have a sore throat").await.unwrap();

        assert_eq!(answer.kind, QueryKind::Medical);
        assert_eq!(answer.passages_used, 3);
        assert_eq!(answer.text, "Drink fluids and rest.");
    }

    #[tokio::test]
    async fn test_grounded_branch_summarizes_reranked_context() {
        let chat = std::sync::Arc::new(ScriptedChat::new(&["Yes", "summary", "answer"]));
        let pipe = RagPipeline::new(
            Box::new(chat.clone()),
            Box::new(FixedEmbedder),
            Box::new(FixedStore {
                matches: matches(&["low", "high"]),
            }),
            Box::new(FixedReranker {
                scores: vec![0.1, 0.95],
            }),
            PipelineConfig::default(),
        );

        let convo = Conversation::new(0);
        pipe.answer(&convo, "fever?").await.unwrap();

        // Prompts: verdict, context summary, grounded answer. The
        // top-scored passage must lead the joined summary context.
        let prompts = chat.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[1].contains("Context: high \nlow"));
        assert!(prompts[2].contains("Possible Disease Context: summary"));
        assert!(prompts[2].contains("Question: fever?"));
    }

    #[tokio::test]
    async fn test_out_of_domain_takes_fallback_branch() {
        let chat_replies = ["No", "Sorry, I am a medical AI chatbot"];
        let pipe = pipeline(&chat_replies, matches(&["unused"]), vec![0.5]);

        let mut convo = Conversation::new(0);
        convo.push_user("hello there");
        let answer = pipe.answer(&convo, "what's the weather?").await.unwrap();

        assert_eq!(answer.kind, QueryKind::OutOfDomain);
        assert_eq!(answer.passages_used, 0);
    }

    #[tokio::test]
    async fn test_empty_retrieval_falls_back() {
        let chat_replies = ["Yes", "fallback reply"];
        let pipe = pipeline(&chat_replies, Vec::new(), Vec::new());

        let convo = Conversation::new(0);
        let answer = pipe.answer(&convo, "rare disease?").await.unwrap();

        assert_eq!(answer.kind, QueryKind::OutOfDomain);
        assert_eq!(answer.text, "fallback reply");
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid_input() {
        let pipe = pipeline(&[], Vec::new(), Vec::new());
        let convo = Conversation::new(0);
        let err = pipe.answer(&convo, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_report_answer_rejects_empty_text() {
        let pipe = pipeline(&[], Vec::new(), Vec::new());
        let convo = Conversation::new(0);
        let err = pipe.answer_report(&convo, "  \n ").await.unwrap_err();
        assert!(matches!(err, AppError::Report(_)));
    }

    #[tokio::test]
    async fn test_report_answer_generates_reply() {
        let pipe = pipeline(&["Blood counts look normal."], Vec::new(), Vec::new());
        let mut convo = Conversation::new(0);
        convo.push_user("here is my report");
        let answer = pipe
            .answer_report(&convo, "Hemoglobin: 14.2 g/dL")
            .await
            .unwrap();
        assert_eq!(answer.text, "Blood counts look normal.");
        assert_eq!(answer.passages_used, 0);
    }
}
