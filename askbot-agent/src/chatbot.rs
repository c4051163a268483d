//! General knowledge chatbot

use std::sync::Arc;

use askbot_core::config::GeneratorConfig;
use askbot_core::session::{ConversationRecord, Session};
use askbot_providers::{GenerationOptions, ProviderError, ProviderResult, TextGenerator};
use tracing::{debug, info, warn};

use crate::extract::{build_prompt, extract_answer};

/// Prefix of the in-band answer produced when generation fails
pub const GENERATION_FAILURE_PREFIX: &str = "I couldn't generate a response. Error:";

/// Answers questions with a pre-trained text generator and keeps the
/// question/answer history of the current conversation.
///
/// Each question is generated independently; the history is never fed
/// back into the prompt.
pub struct Chatbot {
    generator: Arc<dyn TextGenerator>,
    options: GenerationOptions,
    session: Session,
}

impl Chatbot {
    /// Create a chatbot around an already loaded generator
    pub fn new(generator: Arc<dyn TextGenerator>, options: GenerationOptions) -> Self {
        Self {
            generator,
            options,
            session: Session::new(),
        }
    }

    /// Start a new conversation, dropping the previous history
    pub fn start_conversation(&mut self) {
        info!(
            "Starting new conversation ({} previous records dropped)",
            self.session.len()
        );
        self.session.clear();
    }

    /// Answer a question and record it in the history.
    ///
    /// Generation failures never escape: they become an answer of the form
    /// `I couldn't generate a response. Error: <message>`, which is recorded
    /// like any other answer. This is the path the CLI uses.
    pub async fn answer_question(&mut self, question: &str) -> String {
        match self.try_answer(question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Generation failed for question {:?}: {}", question, e);
                let answer = format!("{} {}", GENERATION_FAILURE_PREFIX, e);
                self.record(question, &answer);
                answer
            }
        }
    }

    /// Answer a question, surfacing generation failures to the caller.
    ///
    /// Library callers that want to handle errors themselves use this
    /// instead of [`Chatbot::answer_question`]. Only successful answers are
    /// recorded.
    pub async fn try_answer(&mut self, question: &str) -> ProviderResult<String> {
        let answer = self.generate_answer(question).await?;
        self.record(question, &answer);
        Ok(answer)
    }

    fn record(&mut self, question: &str, answer: &str) {
        let asked_at = self.session.record(question, answer).asked_at();
        debug!(
            "Recorded answer #{} at {}",
            self.session.len(),
            asked_at.to_rfc3339()
        );
    }

    /// Recorded question/answer pairs, oldest first
    pub fn history(&self) -> &[ConversationRecord] {
        self.session.records()
    }

    pub fn model_name(&self) -> String {
        self.generator.model_name()
    }

    async fn generate_answer(&self, question: &str) -> ProviderResult<String> {
        let prompt = build_prompt(question);
        debug!("Generating with prompt {:?}", prompt);

        let sequences = self.generator.generate(&prompt, &self.options).await?;
        let first = sequences.into_iter().next().ok_or_else(|| {
            ProviderError::InvalidResponse("generator returned no sequences".to_string())
        })?;

        Ok(extract_answer(&first.text))
    }
}

/// Map generator settings from the configuration onto per-call options.
///
/// Only the first sequence is ever read, so exactly one is requested.
pub fn generation_options(config: &GeneratorConfig) -> GenerationOptions {
    GenerationOptions {
        num_sequences: 1,
        sample: config.do_sample,
        temperature: config.temperature,
        max_length: config.max_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askbot_providers::GeneratedSequence;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes the prompt followed by a canned continuation
    struct ScriptedGenerator {
        continuation: String,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(continuation: &str) -> Self {
            Self {
                continuation: continuation.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            prompt: &str,
            _options: &GenerationOptions,
        ) -> ProviderResult<Vec<GeneratedSequence>> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(vec![
                GeneratedSequence::new(format!("{}{}", prompt, self.continuation)),
                GeneratedSequence::new("ignored second sequence"),
            ])
        }

        fn model_name(&self) -> String {
            "scripted".to_string()
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _options: &GenerationOptions,
        ) -> ProviderResult<Vec<GeneratedSequence>> {
            Err(ProviderError::ApiError("HTTP 503: model is loading".to_string()))
        }

        fn model_name(&self) -> String {
            "failing".to_string()
        }
    }

    struct EmptyGenerator;

    #[async_trait]
    impl TextGenerator for EmptyGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _options: &GenerationOptions,
        ) -> ProviderResult<Vec<GeneratedSequence>> {
            Ok(Vec::new())
        }

        fn model_name(&self) -> String {
            "empty".to_string()
        }
    }

    #[tokio::test]
    async fn test_answer_uses_prompt_template_and_extracts() {
        let generator = Arc::new(ScriptedGenerator::new(" Agra, India.\nQ: Next?\nA: Delhi"));
        let mut bot = Chatbot::new(generator.clone(), GenerationOptions::default());

        let answer = bot.answer_question("Where is Taj Mahal?").await;

        assert_eq!(answer, "Delhi");
        assert_eq!(
            generator.prompts.lock().unwrap().as_slice(),
            ["Q: Where is Taj Mahal?\nA:".to_string()]
        );
    }

    #[tokio::test]
    async fn test_history_tracks_every_question_in_order() {
        let mut bot = Chatbot::new(
            Arc::new(ScriptedGenerator::new(" ok")),
            GenerationOptions::default(),
        );

        let questions = ["one", "two", "three"];
        for q in questions {
            bot.answer_question(q).await;
        }

        assert_eq!(bot.history().len(), questions.len());
        for (record, q) in bot.history().iter().zip(questions) {
            assert_eq!(record.question(), q);
            assert_eq!(record.answer(), "ok");
        }
    }

    #[tokio::test]
    async fn test_failure_becomes_answer_and_is_recorded() {
        let mut bot = Chatbot::new(Arc::new(FailingGenerator), GenerationOptions::default());

        let answer = bot.answer_question("test").await;

        assert!(answer.starts_with("I couldn't generate a response. Error:"));
        assert!(answer.contains("model is loading"));
        assert_eq!(bot.history().len(), 1);
        assert_eq!(bot.history()[0].question(), "test");
        assert_eq!(bot.history()[0].answer(), answer);
    }

    #[tokio::test]
    async fn test_empty_generation_is_a_failure() {
        let mut bot = Chatbot::new(Arc::new(EmptyGenerator), GenerationOptions::default());

        let answer = bot.answer_question("anything").await;

        assert!(answer.starts_with(GENERATION_FAILURE_PREFIX));
        assert_eq!(bot.history().len(), 1);
    }

    #[tokio::test]
    async fn test_fail_soft_and_strict_paths_agree_on_success() {
        let mut bot = Chatbot::new(
            Arc::new(ScriptedGenerator::new(" Agra")),
            GenerationOptions::default(),
        );

        let strict = bot.try_answer("Where is Taj Mahal?").await.unwrap();
        let soft = bot.answer_question("Where is Taj Mahal?").await;

        assert_eq!(strict, soft);
        assert_eq!(bot.history().len(), 2);
        assert!(bot.history()[0].asked_at() <= bot.history()[1].asked_at());
    }

    #[tokio::test]
    async fn test_try_answer_does_not_record_failures() {
        let mut bot = Chatbot::new(Arc::new(FailingGenerator), GenerationOptions::default());

        assert!(bot.try_answer("test").await.is_err());
        assert!(bot.history().is_empty());
    }

    #[tokio::test]
    async fn test_start_conversation_clears_history() {
        let mut bot = Chatbot::new(
            Arc::new(ScriptedGenerator::new(" yes")),
            GenerationOptions::default(),
        );
        bot.try_answer("first").await.unwrap();
        bot.start_conversation();

        assert!(bot.history().is_empty());
        assert_eq!(bot.model_name(), "scripted");
    }

    #[test]
    fn test_generation_options_from_config() {
        let mut config = GeneratorConfig::default();
        config.max_length = 64;
        config.do_sample = false;

        let options = generation_options(&config);
        assert_eq!(options.max_length, 64);
        assert!(!options.sample);
        assert_eq!(options.num_sequences, 1);
    }

    #[test]
    fn test_generation_options_request_single_sequence() {
        let mut config = GeneratorConfig::default();
        config.temperature = 1.5;
        config.max_length = 500;
        config.request_timeout_secs = 5;

        let options = generation_options(&config);
        assert_eq!(options.num_sequences, 1);
        assert!((options.temperature - 1.5).abs() < f32::EPSILON);
        assert_eq!(options.max_length, 500);
    }

    #[test]
    fn test_num_sequences_is_not_a_config_key() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"model":"gpt2","num_sequences":4}"#).unwrap();
        assert_eq!(generation_options(&config).num_sequences, 1);
    }
}
