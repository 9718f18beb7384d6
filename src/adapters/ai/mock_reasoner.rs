//! Mock negotiation reasoner for testing.
//!
//! Replies are consumed in order. Once the queue is empty every call gets a
//! plain `ANSWER` decision. Each request is recorded for later inspection.
//!
//! ```ignore
//! let reasoner = MockReasoner::new()
//!     .with_decision(MockReasoner::counter(7000, 9000, "How about 9000?"))
//!     .with_error(ReasonerError::Timeout { timeout_secs: 20 });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::Price;
use crate::domain::negotiation::{AiDecision, BuyerIntent, NegotiationDecision};
use crate::ports::{NegotiationReasoner, NegotiationRequest, ReasonerError};

/// A scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Decision(NegotiationDecision),
    Error(ReasonerError),
}

#[derive(Debug, Clone, Default)]
pub struct MockReasoner {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<NegotiationRequest>>>,
    delay: Duration,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockReasoner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decision(self, decision: NegotiationDecision) -> Self {
        locked(&self.replies).push_back(MockReply::Decision(decision));
        self
    }

    pub fn with_error(self, error: ReasonerError) -> Self {
        locked(&self.replies).push_back(MockReply::Error(error));
        self
    }

    /// Simulated latency applied to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every request received so far.
    pub fn calls(&self) -> Vec<NegotiationRequest> {
        locked(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        locked(&self.calls).len()
    }

    /// A counter-offer decision.
    pub fn counter(detected: i64, counter: i64, text: &str) -> NegotiationDecision {
        Self::decision(BuyerIntent::Negotiation, AiDecision::Counter, detected, counter, text)
    }

    /// An acceptance of the buyer's price.
    pub fn accept(price: i64, text: &str) -> NegotiationDecision {
        Self::decision(BuyerIntent::Agreement, AiDecision::Accept, price, 0, text)
    }

    /// A price-free answer to a question.
    pub fn answer(text: &str) -> NegotiationDecision {
        Self::decision(BuyerIntent::Question, AiDecision::Answer, 0, 0, text)
    }

    fn decision(
        intent: BuyerIntent,
        decision: AiDecision,
        detected: i64,
        counter: i64,
        text: &str,
    ) -> NegotiationDecision {
        NegotiationDecision {
            intent,
            decision,
            detected_price: Price::new(detected).unwrap_or_default(),
            counter_price: Price::new(counter).unwrap_or_default(),
            reasoning: format!("mock {} decision", decision),
            response_text: text.to_string(),
        }
    }
}

#[async_trait]
impl NegotiationReasoner for MockReasoner {
    async fn generate(
        &self,
        request: NegotiationRequest,
    ) -> Result<NegotiationDecision, ReasonerError> {
        locked(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let reply = locked(&self.replies).pop_front();
        match reply {
            Some(MockReply::Decision(decision)) => Ok(decision),
            Some(MockReply::Error(error)) => Err(error),
            None => Ok(Self::answer("Thanks for your message!")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NegotiationRequest {
        NegotiationRequest {
            current_price: Price::new(10000).unwrap(),
            initial_price: Price::new(10000).unwrap(),
            floor_price: Price::new(7500).unwrap(),
            view_count: 0,
            days_listed: 0,
            item_description: String::new(),
            history: vec![],
            buyer_message: "hi".to_string(),
            retry_instruction: None,
            previous_draft_content: None,
            previous_draft_reasoning: None,
        }
    }

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let reasoner = MockReasoner::new()
            .with_decision(MockReasoner::counter(7000, 9000, "9000?"))
            .with_error(ReasonerError::AuthenticationFailed);

        let first = reasoner.generate(request()).await.unwrap();
        assert_eq!(first.counter_price.amount(), 9000);

        let second = reasoner.generate(request()).await.unwrap_err();
        assert_eq!(second, ReasonerError::AuthenticationFailed);

        let third = reasoner.generate(request()).await.unwrap();
        assert_eq!(third.decision, AiDecision::Answer);
        assert_eq!(reasoner.call_count(), 3);
    }

    #[tokio::test]
    async fn clones_share_call_history() {
        let reasoner = MockReasoner::new();
        let handle = reasoner.clone();
        reasoner.generate(request()).await.unwrap();
        assert_eq!(handle.calls()[0].buyer_message, "hi");
    }
}
