// In-memory conversation history
// Per-process only; cleared on restart by design

use tokio::sync::RwLock;

use crate::models::ChatExchange;

/// Conversation history store
#[derive(Default)]
pub struct HistoryService {
    exchanges: RwLock<Vec<ChatExchange>>,
}

impl HistoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed exchange
    pub async fn add(&self, exchange: ChatExchange) {
        let mut exchanges = self.exchanges.write().await;
        exchanges.push(exchange);
    }

    /// Most recent exchanges first
    pub async fn list(&self, limit: usize) -> Vec<ChatExchange> {
        let exchanges = self.exchanges.read().await;
        exchanges.iter().rev().take(limit).cloned().collect()
    }

    /// Drop all exchanges, returning how many were removed
    pub async fn clear(&self) -> usize {
        let mut exchanges = self.exchanges.write().await;
        let deleted = exchanges.len();
        exchanges.clear();
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(prompt: &str) -> ChatExchange {
        ChatExchange::new(
            prompt.to_string(),
            "response".to_string(),
            "llama3.2".to_string(),
            10,
        )
    }

    #[tokio::test]
    async fn test_list_returns_newest_first() {
        let history = HistoryService::new();
        history.add(exchange("first")).await;
        history.add(exchange("second")).await;
        history.add(exchange("third")).await;

        let listed = history.list(10).await;
        let prompts: Vec<&str> = listed.iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let history = HistoryService::new();
        history.add(exchange("first")).await;
        history.add(exchange("second")).await;

        let listed = history.list(1).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].prompt, "second");
    }

    #[tokio::test]
    async fn test_clear_reports_count_and_empties() {
        let history = HistoryService::new();
        history.add(exchange("first")).await;
        history.add(exchange("second")).await;

        assert_eq!(history.clear().await, 2);
        assert!(history.list(10).await.is_empty());
        assert_eq!(history.clear().await, 0);
    }
}
