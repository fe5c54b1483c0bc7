use async_trait::async_trait;
use ecommerce_chat::{
    Error, Result,
    catalog::{Product, ProductRepository},
    history::{ChatMessage, ChatRepository},
    llm::{CompletionRequest, CompletionResponse, LlmClient},
};
use std::sync::{Arc, Mutex};

/// Mock LLM client for testing
#[derive(Debug, Clone)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<String>>>,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_responses(self, responses: Vec<&str>) -> Self {
        *self.responses.lock().unwrap() = responses.into_iter().map(String::from).collect();
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        Ok(CompletionResponse {
            id: "mock-completion".to_string(),
            model: "mock-model".to_string(),
            content: responses.remove(0),
            usage: None,
        })
    }
}

/// In-memory catalog store
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn get_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.lock().unwrap().clone())
    }

    async fn get_by_id(&self, product_id: i64) -> Result<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == Some(product_id))
            .cloned())
    }

    async fn insert(&self, product: Product) -> Result<Product> {
        let mut products = self.products.lock().unwrap();
        let product = product.with_id(products.len() as i64 + 1);
        products.push(product.clone());
        Ok(product)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.products.lock().unwrap().len() as u64)
    }
}

/// In-memory conversation store. `fail_saves_after` makes every save past
/// that many successful ones fail.
#[derive(Default)]
pub struct InMemoryChatRepository {
    messages: Mutex<Vec<ChatMessage>>,
    fail_saves_after: Option<usize>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(saves: usize) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail_saves_after: Some(saves),
        }
    }

    pub fn all(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn get_recent(&self, session_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        let messages: Vec<ChatMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.session_id() == session_id)
            .cloned()
            .collect();
        let start = messages.len().saturating_sub(limit);
        Ok(messages[start..].to_vec())
    }

    async fn save(&self, message: ChatMessage) -> Result<ChatMessage> {
        let mut messages = self.messages.lock().unwrap();
        if let Some(limit) = self.fail_saves_after {
            if messages.len() >= limit {
                return Err(Error::internal("disk full"));
            }
        }
        let message = message.with_id(messages.len() as i64 + 1);
        messages.push(message.clone());
        Ok(message)
    }
}
