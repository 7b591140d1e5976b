use std::sync::{Arc, Mutex};

use lexiscan::application::ports::{GenerativeClient, GenerativeError};
use lexiscan::application::services::{ChatError, ChatService, HistoryLimits};
use lexiscan::domain::{ChatPart, ChatRole, ChatTurn};

struct CapturingChatClient {
    calls: Mutex<Vec<(Vec<ChatTurn>, String)>>,
}

impl CapturingChatClient {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl GenerativeClient for CapturingChatClient {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerativeError> {
        Ok("unused".to_string())
    }

    async fn chat(&self, history: &[ChatTurn], message: &str) -> Result<String, GenerativeError> {
        self.calls
            .lock()
            .unwrap()
            .push((history.to_vec(), message.to_string()));
        Ok("model reply".to_string())
    }
}

#[tokio::test]
async fn given_empty_history_when_continuing_then_empty_history_error() {
    let service = ChatService::new(CapturingChatClient::new(), HistoryLimits::default());

    let result = service.continue_chat(&[], "English").await;

    assert!(matches!(result, Err(ChatError::EmptyHistory)));
}

#[tokio::test]
async fn given_history_when_continuing_then_last_turn_becomes_wrapped_question() {
    let client = CapturingChatClient::new();
    let service = ChatService::new(Arc::clone(&client), HistoryLimits::default());

    let history = vec![
        ChatTurn::user("Analyze my lease."),
        ChatTurn::model("### Summary ..."),
        ChatTurn::user("Is clause 4 enforceable?"),
    ];

    let reply = service.continue_chat(&history, "Hindi").await.unwrap();
    assert_eq!(reply, "model reply");

    let calls = client.calls.lock().unwrap();
    let (replayed, message) = &calls[0];
    assert_eq!(replayed.len(), 2);
    assert_eq!(replayed[1].role, ChatRole::Model);
    assert!(message.contains("answer this question in Hindi"));
    assert!(message.contains("Is clause 4 enforceable?"));
    assert!(!message.contains("Analyze my lease."));
}

#[tokio::test]
async fn given_single_turn_when_continuing_then_replay_is_empty() {
    let client = CapturingChatClient::new();
    let service = ChatService::new(Arc::clone(&client), HistoryLimits::default());

    let history = vec![ChatTurn::user("What is Article 21?")];
    service.continue_chat(&history, "English").await.unwrap();

    let calls = client.calls.lock().unwrap();
    assert!(calls[0].0.is_empty());
}

#[tokio::test]
async fn given_too_many_turns_when_continuing_then_history_too_large() {
    let service = ChatService::new(
        CapturingChatClient::new(),
        HistoryLimits {
            max_turns: 2,
            max_chars: 10_000,
        },
    );

    let history = vec![
        ChatTurn::user("one"),
        ChatTurn::model("two"),
        ChatTurn::user("three"),
    ];
    let result = service.continue_chat(&history, "English").await;

    assert!(matches!(result, Err(ChatError::HistoryTooLarge { .. })));
}

#[tokio::test]
async fn given_oversized_text_when_continuing_then_history_too_large() {
    let service = ChatService::new(
        CapturingChatClient::new(),
        HistoryLimits {
            max_turns: 64,
            max_chars: 16,
        },
    );

    let history = vec![
        ChatTurn::user("a".repeat(20)),
        ChatTurn::user("short question"),
    ];
    let result = service.continue_chat(&history, "English").await;

    assert!(matches!(result, Err(ChatError::HistoryTooLarge { .. })));
}

#[tokio::test]
async fn given_blank_last_turn_when_continuing_then_empty_question_error() {
    let service = ChatService::new(CapturingChatClient::new(), HistoryLimits::default());

    let history = vec![ChatTurn {
        role: ChatRole::User,
        parts: vec![ChatPart {
            text: "   ".to_string(),
        }],
    }];
    let result = service.continue_chat(&history, "English").await;

    assert!(matches!(result, Err(ChatError::EmptyQuestion)));
}

#[tokio::test]
async fn given_partless_last_turn_when_continuing_then_empty_question_error() {
    let service = ChatService::new(CapturingChatClient::new(), HistoryLimits::default());

    let history = vec![ChatTurn {
        role: ChatRole::User,
        parts: vec![],
    }];
    let result = service.continue_chat(&history, "English").await;

    assert!(matches!(result, Err(ChatError::EmptyQuestion)));
}
