//! Shared fakes for state-machine tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::oneshot;

use crate::error::ApiError;
use crate::net::api::DonationApi;
use crate::net::types::{Donation, ListScope, NewDonation};

type ListResult = Result<Vec<Donation>, ApiError>;

enum ListReply {
    Ready(ListResult),
    Gated(oneshot::Receiver<ListResult>),
}

/// In-memory `DonationApi` with scripted replies and call recording.
#[derive(Default)]
pub struct MockApi {
    /// Returned by list calls once scripted replies run out.
    pub items: Mutex<Vec<Donation>>,
    list_replies: Mutex<VecDeque<ListReply>>,
    add_replies: Mutex<VecDeque<Result<Option<Donation>, ApiError>>>,
    pub added: Mutex<Vec<(NewDonation, Option<String>)>>,
    pub list_requests: Mutex<Vec<(ListScope, Option<String>)>>,
    list_calls: AtomicUsize,
}

impl MockApi {
    pub fn with_items(items: Vec<Donation>) -> Self {
        let api = Self::default();
        *api.items.lock().unwrap() = items;
        api
    }

    pub fn push_list(&self, reply: ListResult) {
        self.list_replies.lock().unwrap().push_back(ListReply::Ready(reply));
    }

    /// Queue a list reply that resolves only when the returned sender fires.
    pub fn push_gated_list(&self) -> oneshot::Sender<ListResult> {
        let (tx, rx) = oneshot::channel();
        self.list_replies.lock().unwrap().push_back(ListReply::Gated(rx));
        tx
    }

    pub fn push_add(&self, reply: Result<Option<Donation>, ApiError>) {
        self.add_replies.lock().unwrap().push_back(reply);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn add_calls(&self) -> usize {
        self.added.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl DonationApi for MockApi {
    async fn add_donation(&self, payload: &NewDonation, token: Option<&str>) -> Result<Option<Donation>, ApiError> {
        self.added
            .lock()
            .unwrap()
            .push((payload.clone(), token.map(str::to_owned)));
        let reply = self.add_replies.lock().unwrap().pop_front();
        reply.unwrap_or(Ok(None))
    }

    async fn list_donations(&self, scope: ListScope, token: Option<&str>) -> Result<Vec<Donation>, ApiError> {
        self.list_requests
            .lock()
            .unwrap()
            .push((scope, token.map(str::to_owned)));
        let reply = self.list_replies.lock().unwrap().pop_front();
        let fallback = self.items.lock().unwrap().clone();
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match reply {
            Some(ListReply::Ready(result)) => result,
            Some(ListReply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("gate dropped".into()))),
            None => Ok(fallback),
        }
    }
}

/// Build a donation record with the given id, type and quantity.
pub fn donation(id: &str, food_type: &str, quantity: Option<f64>) -> Donation {
    Donation {
        id: id.to_owned(),
        food_type: food_type.to_owned(),
        quantity,
        storage: None,
        description: None,
        created_at: Some(format!("t-{id}")),
        safe_till: None,
    }
}

/// Poll `cond` until it holds, failing the test after one second.
pub async fn wait_for(mut cond: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    while !cond() {
        assert!(tokio::time::Instant::now() < deadline, "condition not reached in time");
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}
