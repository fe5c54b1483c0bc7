use ecommerce_chat::{
    Error,
    assistant::{SalesAssistant, UNAVAILABLE_MESSAGE},
    catalog::LibsqlProductRepository,
    chat::{ChatRequest, ChatService, HISTORY_LIMIT},
    db::Database,
    history::{ChatMessage, ChatRepository, LibsqlChatRepository, Role},
};
use chrono::{Duration, SubsecRound, Utc};
use pretty_assertions::assert_eq;
use std::sync::Arc;

mod common;
use common::{
    mocks::{InMemoryChatRepository, InMemoryProductRepository, MockLlmClient},
    test_utils::*,
};

struct Harness {
    _db: Database,
    products: Arc<LibsqlProductRepository>,
    history: Arc<LibsqlChatRepository>,
    llm: MockLlmClient,
    service: ChatService,
}

async fn harness(llm: MockLlmClient) -> Harness {
    let db = Database::in_memory().await.unwrap();
    let products = Arc::new(LibsqlProductRepository::new(db.connection()));
    let history = Arc::new(LibsqlChatRepository::new(db.connection()));
    let assistant = Arc::new(SalesAssistant::with_client(
        Box::new(llm.clone()),
        &create_test_llm_config(),
    ));
    let service = ChatService::new(products.clone(), history.clone(), assistant);

    Harness {
        _db: db,
        products,
        history,
        llm,
        service,
    }
}

fn request(session_id: &str, message: &str) -> ChatRequest {
    ChatRequest {
        session_id: session_id.to_string(),
        message: message.to_string(),
    }
}

#[test_log::test(tokio::test)]
async fn test_process_message_end_to_end() {
    let h = harness(MockLlmClient::new().with_responses(vec!["  ¡Hola! ¿Qué buscas hoy?  "])).await;
    insert_all(h.products.as_ref(), sample_catalog()).await;

    let response = h.service.process_message(request("s1", "hola")).await.unwrap();

    assert_eq!(response.session_id, "s1");
    assert_eq!(response.user_message, "hola");
    assert_eq!(response.assistant_message, "¡Hola! ¿Qué buscas hoy?");

    let stored = h.history.get_recent("s1", 10).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].role(), Role::User);
    assert_eq!(stored[0].message(), "hola");
    assert_eq!(stored[1].role(), Role::Assistant);
    assert_eq!(stored[1].message(), "¡Hola! ¿Qué buscas hoy?");
    assert_eq!(stored[0].timestamp(), stored[1].timestamp());
    assert_eq!(stored[0].timestamp(), response.timestamp);
    assert!(stored[0].id().is_some());
}

#[tokio::test]
async fn test_prompt_contains_catalog_and_history() {
    let h = harness(MockLlmClient::new().with_responses(vec!["primera", "segunda"])).await;
    insert_all(h.products.as_ref(), sample_catalog()).await;

    h.service
        .process_message(request("s1", "Busco zapatillas para correr"))
        .await
        .unwrap();
    h.service
        .process_message(request("s1", "Talla 42"))
        .await
        .unwrap();

    let requests = h.llm.get_requests();
    assert_eq!(requests.len(), 2);

    let first = &requests[0].prompt;
    assert!(first.contains("Nike Air Zoom Pegasus"));
    assert!(first.contains("Puma Suede Classic"));
    assert!(first.contains("Usuario: Busco zapatillas para correr"));

    let second = &requests[1].prompt;
    assert!(second.contains("Usuario: Busco zapatillas para correr\nAsistente: primera"));
    assert!(second.contains("Usuario: Talla 42"));
}

#[tokio::test]
async fn test_context_is_limited_to_six_messages() {
    let h = harness(MockLlmClient::new().with_responses(vec!["ok"])).await;
    let start = Utc::now().trunc_subsecs(6) - Duration::minutes(10);
    for i in 0..10 {
        let msg = ChatMessage::user("s1", format!("old {i}"), start + Duration::seconds(i)).unwrap();
        h.history.save(msg).await.unwrap();
    }

    h.service.process_message(request("s1", "nuevo")).await.unwrap();

    let prompt = &h.llm.get_requests()[0].prompt;
    for i in 0..4 {
        assert!(!prompt.contains(&format!("Usuario: old {i}")));
    }
    for i in 4..10 {
        assert!(prompt.contains(&format!("Usuario: old {i}")));
    }
}

#[tokio::test]
async fn test_provider_failure_falls_back() {
    let h = harness(MockLlmClient::new().with_error("service unavailable")).await;
    insert_all(h.products.as_ref(), sample_catalog()).await;

    let response = h.service.process_message(request("s1", "hola")).await.unwrap();

    assert!(response.assistant_message.contains("Nike Air Zoom Pegasus"));
    assert!(response.assistant_message.contains("Adidas Ultraboost 21"));
    assert!(response.assistant_message.contains("Puma Suede Classic"));
    assert_eq!(h.history.get_recent("s1", 10).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_catalog_without_provider() {
    let service = ChatService::new(
        Arc::new(InMemoryProductRepository::new()),
        Arc::new(InMemoryChatRepository::new()),
        Arc::new(SalesAssistant::offline()),
    );

    let response = service.process_message(request("s1", "hola")).await.unwrap();
    assert_eq!(response.assistant_message, UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn test_empty_fields_are_rejected_before_any_call() {
    let h = harness(MockLlmClient::new().with_responses(vec!["ok"])).await;

    let err = h.service.process_message(request("", "hola")).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = h.service.process_message(request("s1", "   ")).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    assert!(h.llm.get_requests().is_empty());
    assert!(h.history.get_recent("s1", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_second_save_failure_keeps_user_message() {
    let history = Arc::new(InMemoryChatRepository::failing_after(1));
    let service = ChatService::new(
        Arc::new(InMemoryProductRepository::new()),
        history.clone(),
        Arc::new(SalesAssistant::offline()),
    );

    let result = service.process_message(request("s1", "hola")).await;
    assert!(result.is_err());

    let stored = history.all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].role(), Role::User);
}

#[tokio::test]
async fn test_get_history_unknown_session() {
    let h = harness(MockLlmClient::new()).await;

    let history = h.service.get_history("unknown").await.unwrap();
    assert_eq!(history.session_id, "unknown");
    assert!(history.messages.is_empty());
}

#[tokio::test]
async fn test_get_history_is_bounded_and_chronological() {
    let h = harness(MockLlmClient::new()).await;
    let start = Utc::now().trunc_subsecs(6) - Duration::hours(1);
    for i in 0..120 {
        let msg = ChatMessage::user("s1", format!("m{i}"), start + Duration::seconds(i)).unwrap();
        h.history.save(msg).await.unwrap();
    }
    h.history
        .save(ChatMessage::user("other", "elsewhere", start).unwrap())
        .await
        .unwrap();

    let history = h.service.get_history("s1").await.unwrap();

    assert_eq!(history.messages.len(), HISTORY_LIMIT);
    assert_eq!(history.messages[0].message, "m20");
    assert_eq!(history.messages[99].message, "m119");
    assert!(
        history
            .messages
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp)
    );
    assert!(history.messages.iter().all(|m| m.session_id == "s1"));
    assert_eq!(history.messages[0].role, "user");
}

#[tokio::test]
async fn test_history_records_both_turns() {
    let h = harness(MockLlmClient::new().with_responses(vec!["respuesta"])).await;
    h.service.process_message(request("s2", "pregunta")).await.unwrap();

    let history = h.service.get_history("s2").await.unwrap();
    let roles: Vec<&str> = history.messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["user", "assistant"]);
    assert!(history.messages.iter().all(|m| m.id.is_some()));
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let h = harness(MockLlmClient::new().with_responses(vec!["a", "b"])).await;
    let s1 = generate_test_session_id();
    let s2 = generate_test_session_id();

    h.service.process_message(request(&s1, "uno")).await.unwrap();
    h.service.process_message(request(&s2, "dos")).await.unwrap();

    let second_prompt = &h.llm.get_requests()[1].prompt;
    assert!(!second_prompt.contains("Usuario: uno"));
    assert_eq!(h.service.get_history(&s1).await.unwrap().messages.len(), 2);
}
