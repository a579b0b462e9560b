use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::ports::{
    notification::{NotificationPort, SendNotificationError},
    store::{Collection, RecordStore, StoreError, decode_records},
};

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, serde_json::Value>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn put_raw(&self, collection: Collection, value: serde_json::Value) {
        self.collections.lock().unwrap().insert(collection, value);
    }
}

impl RecordStore for MemoryStore {
    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let collections = self.collections.lock().unwrap();
        let values: Vec<serde_json::Value> = collections
            .get(&collection)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default();
        decode_records(collection, values)
    }

    fn save<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<(), StoreError> {
        let value = serde_json::to_value(records)
            .map_err(|source| StoreError::Serialization { collection, source })?;
        self.collections.lock().unwrap().insert(collection, value);
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SentNotification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct MockNotificationPort {
    sent: Mutex<Vec<SentNotification>>,
    unavailable: bool,
}

impl MockNotificationPort {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            unavailable: true,
        })
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationPort for MockNotificationPort {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), SendNotificationError> {
        if self.unavailable {
            return Err(SendNotificationError::Unavailable("mock offline".to_string()));
        }
        self.sent.lock().unwrap().push(SentNotification {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
