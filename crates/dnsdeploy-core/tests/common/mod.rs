//! Test doubles and common utilities for reconciliation tests
//!
//! This module provides a call-counting `DnsApi` double so tests can assert
//! not only what the reconciler decided but how many provider calls each
//! decision produced.

use dnsdeploy_core::error::{Error, Result};
use dnsdeploy_core::traits::{DnsApi, ExistingRecord, NewRecord};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A mock DnsApi that serves a fixed record list and tracks calls
pub struct MockDnsApi {
    /// Records returned by list_records()
    records: Vec<ExistingRecord>,
    /// Call counter for list_records()
    list_call_count: Arc<AtomicUsize>,
    /// Call counter for create_record()
    create_call_count: Arc<AtomicUsize>,
    /// Call counter for delete_record()
    delete_call_count: Arc<AtomicUsize>,
    /// Recorded create requests
    created: Arc<std::sync::Mutex<Vec<NewRecord>>>,
    /// Recorded deleted record ids
    deleted: Arc<std::sync::Mutex<Vec<String>>>,
    /// When set, list_records() fails with this HTTP status
    fail_list_with_status: Option<u16>,
}

impl MockDnsApi {
    pub fn new(records: Vec<ExistingRecord>) -> Self {
        Self {
            records,
            list_call_count: Arc::new(AtomicUsize::new(0)),
            create_call_count: Arc::new(AtomicUsize::new(0)),
            delete_call_count: Arc::new(AtomicUsize::new(0)),
            created: Arc::new(std::sync::Mutex::new(Vec::new())),
            deleted: Arc::new(std::sync::Mutex::new(Vec::new())),
            fail_list_with_status: None,
        }
    }

    /// Make list_records() fail with the given HTTP status
    pub fn failing_list(status: u16) -> Self {
        let mut api = Self::new(Vec::new());
        api.fail_list_with_status = Some(status);
        api
    }

    /// Total number of provider calls of any kind
    pub fn total_call_count(&self) -> usize {
        self.list_call_count() + self.create_call_count() + self.delete_call_count()
    }

    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    pub fn create_call_count(&self) -> usize {
        self.create_call_count.load(Ordering::SeqCst)
    }

    pub fn delete_call_count(&self) -> usize {
        self.delete_call_count.load(Ordering::SeqCst)
    }

    /// Create requests seen so far
    pub fn created(&self) -> Vec<NewRecord> {
        self.created.lock().unwrap().clone()
    }

    /// Record ids deleted so far
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsApi for MockDnsApi {
    async fn list_records(&self, _zone_id: &str) -> Result<Vec<ExistingRecord>> {
        self.list_call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_list_with_status {
            return Err(Error::Transport(status));
        }
        Ok(self.records.clone())
    }

    async fn create_record(&self, _zone_id: &str, record: &NewRecord) -> Result<()> {
        self.create_call_count.fetch_add(1, Ordering::SeqCst);
        self.created.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn delete_record(&self, _zone_id: &str, record_id: &str) -> Result<()> {
        self.delete_call_count.fetch_add(1, Ordering::SeqCst);
        self.deleted.lock().unwrap().push(record_id.to_string());
        Ok(())
    }
}

/// One existing record for the fixed list
pub fn existing(id: &str, name: &str) -> ExistingRecord {
    ExistingRecord {
        id: id.to_string(),
        name: name.to_string(),
        record_type: "A".to_string(),
    }
}
