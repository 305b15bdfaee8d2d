/*!
Mock z/VM SDK pour développement sans SDK server

Permet de tester l'inspecteur sans serveur SDK réel.
Enregistre tous les appels et rejoue des réponses scriptées.
*/

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use zvm_inspector::error::{RemoteError, RequestResults};
use zvm_inspector::sdk::SdkClient;
use zvm_inspector::{CpuRecord, GuestApi, MemRecord};

/// SDK operations used by the inspector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdkOperation {
    InspectCpus,
    InspectMem,
    GetPowerState,
}

impl SdkOperation {
    pub fn func_name(&self) -> &'static str {
        match self {
            SdkOperation::InspectCpus => "guest_inspect_cpus",
            SdkOperation::InspectMem => "guest_inspect_mem",
            SdkOperation::GetPowerState => "guest_get_power_state",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub operation: SdkOperation,
    pub guest: String,
}

/// Scripted reply for one mocked SDK call
#[derive(Debug, Clone)]
pub enum MockReply<T> {
    Data(T),
    NotExist,
    Failed(RequestResults),
    Timeout,
    Transport(String),
}

impl<T> MockReply<T> {
    fn into_result(self, guest: &str) -> Result<T, RemoteError> {
        match self {
            MockReply::Data(data) => Ok(data),
            MockReply::NotExist => Err(RemoteError::NotExist {
                guest: guest.to_string(),
            }),
            MockReply::Failed(results) => Err(RemoteError::RequestFailed(results)),
            MockReply::Timeout => Err(RemoteError::Timeout),
            MockReply::Transport(msg) => Err(RemoteError::Transport(msg)),
        }
    }
}

type Replies<T> = Arc<Mutex<VecDeque<MockReply<T>>>>;

/// Mock GuestApi qui simule le SDK z/VM.
///
/// Replies are consumed in order per operation. An unscripted call fails
/// like an SDK request with a non-zero overallRC.
#[derive(Clone, Default)]
pub struct MockGuestApi {
    cpu_replies: Replies<HashMap<String, CpuRecord>>,
    mem_replies: Replies<HashMap<String, MemRecord>>,
    power_replies: Replies<String>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockGuestApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_inspect_cpus(&self, reply: MockReply<HashMap<String, CpuRecord>>) -> &Self {
        self.cpu_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_inspect_mem(&self, reply: MockReply<HashMap<String, MemRecord>>) -> &Self {
        self.mem_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_power_state(&self, reply: MockReply<String>) -> &Self {
        self.power_replies.lock().unwrap().push_back(reply);
        self
    }

    /// Tous les appels reçus (pour assertions de tests)
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: SdkOperation) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.operation == operation)
            .count()
    }

    /// Reset appels et réponses scriptées
    pub fn clear(&self) {
        self.cpu_replies.lock().unwrap().clear();
        self.mem_replies.lock().unwrap().clear();
        self.power_replies.lock().unwrap().clear();
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, operation: SdkOperation, guest: &str) {
        log::info!("[MOCK] {}({})", operation.func_name(), guest);
        self.calls.lock().unwrap().push(MockCall {
            operation,
            guest: guest.to_string(),
        });
    }

    fn next<T>(replies: &Replies<T>, guest: &str) -> Result<T, RemoteError> {
        let reply = replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Failed(RequestResults::default()));
        reply.into_result(guest)
    }
}

#[async_trait]
impl GuestApi for MockGuestApi {
    async fn query_cpu(&self, name: &str) -> Result<HashMap<String, CpuRecord>, RemoteError> {
        self.record(SdkOperation::InspectCpus, name);
        Self::next(&self.cpu_replies, name)
    }

    async fn query_mem(&self, name: &str) -> Result<HashMap<String, MemRecord>, RemoteError> {
        self.record(SdkOperation::InspectMem, name);
        Self::next(&self.mem_replies, name)
    }

    async fn query_power_state(&self, name: &str) -> Result<String, RemoteError> {
        self.record(SdkOperation::GetPowerState, name);
        Self::next(&self.power_replies, name)
    }
}

/// Mock SdkClient: rejoue des RequestResults par nom de fonction
#[derive(Clone, Default)]
pub struct MockSdkClient {
    responses: Arc<Mutex<HashMap<String, VecDeque<RequestResults>>>>,
    requests: Arc<Mutex<Vec<(String, Vec<Value>)>>>,
}

impl MockSdkClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, func_name: &str, results: RequestResults) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(func_name.to_string())
            .or_default()
            .push_back(results);
        self
    }

    /// Requêtes envoyées (nom de fonction + arguments)
    pub fn requests(&self) -> Vec<(String, Vec<Value>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, func_name: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == func_name)
            .count()
    }
}

#[async_trait]
impl SdkClient for MockSdkClient {
    async fn send_request(&self, func_name: &str, args: &[Value]) -> Result<RequestResults, RemoteError> {
        log::info!("[MOCK] send_request {} {:?}", func_name, args);
        self.requests
            .lock()
            .unwrap()
            .push((func_name.to_string(), args.to_vec()));

        let results = self
            .responses
            .lock()
            .unwrap()
            .get_mut(func_name)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_default();
        Ok(results)
    }
}
