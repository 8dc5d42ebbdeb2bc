//! Shared test doubles for worker integration tests.
//!
//! Each double records its calls so tests can assert not just outcomes but
//! which collaborators were touched on each path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use ocrflow_core::models::{FileHandle, FileLookup, UserAccount};
use ocrflow_host::{FileStore, HostError, HostResult, UserProvider, UserSession};
use ocrflow_ocr::{ConversionOutcome, OcrConverter};

/// Session double counting every call.
#[derive(Default)]
pub struct RecordingSession {
    active: Mutex<Option<UserAccount>>,
    set_calls: AtomicUsize,
    clear_calls: AtomicUsize,
    init_root_calls: AtomicUsize,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_count(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn clear_count(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    pub fn init_root_count(&self) -> usize {
        self.init_root_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserSession for RecordingSession {
    async fn set_active_user(&self, user: UserAccount) -> HostResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        *self.active.lock().unwrap() = Some(user);
        Ok(())
    }

    async fn clear_active_user(&self) -> HostResult<()> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        *self.active.lock().unwrap() = None;
        Ok(())
    }

    async fn active_user(&self) -> Option<UserAccount> {
        self.active.lock().unwrap().clone()
    }

    async fn init_user_root(&self, _user_id: &str) -> HostResult<()> {
        self.init_root_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// User provider with a fixed set of accounts, or a scripted lookup failure.
pub struct ScriptedUsers {
    users: HashMap<String, UserAccount>,
    fail_lookup: bool,
    lookup_calls: AtomicUsize,
}

impl ScriptedUsers {
    pub fn with_users(ids: &[&str]) -> Self {
        Self {
            users: ids
                .iter()
                .map(|id| (id.to_string(), UserAccount::new(*id)))
                .collect(),
            fail_lookup: false,
            lookup_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            users: HashMap::new(),
            fail_lookup: true,
            lookup_calls: AtomicUsize::new(0),
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserProvider for ScriptedUsers {
    async fn lookup_user(&self, user_id: &str) -> HostResult<Option<UserAccount>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup {
            return Err(HostError::UserLookup("scripted lookup failure".to_string()));
        }
        Ok(self.users.get(user_id).cloned())
    }
}

/// File store double with scripted nodes and recorded writes.
#[derive(Default)]
pub struct ScriptedFileStore {
    files: Mutex<HashMap<String, (String, Vec<u8>)>>,
    directories: Mutex<Vec<String>>,
    writes: Mutex<Vec<(String, String, Vec<u8>)>>,
    resolve_calls: AtomicUsize,
    pub fail_read: bool,
    pub fail_write: bool,
}

impl ScriptedFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_file(&self, path: &str, mime_type: &str, content: &[u8]) {
        self.files.lock().unwrap().insert(
            path.to_string(),
            (mime_type.to_string(), content.to_vec()),
        );
    }

    pub fn insert_directory(&self, path: &str) {
        self.directories.lock().unwrap().push(path.to_string());
    }

    pub fn resolve_count(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn recorded_writes(&self) -> Vec<(String, String, Vec<u8>)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStore for ScriptedFileStore {
    async fn resolve(&self, path: &str) -> HostResult<FileLookup> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.directories.lock().unwrap().iter().any(|d| d == path) {
            return Ok(FileLookup::NotAFile);
        }
        match self.files.lock().unwrap().get(path) {
            Some((mime_type, _)) => Ok(FileLookup::Found(FileHandle::new(path, mime_type.clone()))),
            None => Ok(FileLookup::NotFound),
        }
    }

    async fn read(&self, file: &FileHandle) -> HostResult<Vec<u8>> {
        if self.fail_read {
            return Err(HostError::Store("scripted read failure".to_string()));
        }
        self.files
            .lock()
            .unwrap()
            .get(&file.path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| HostError::Store(format!("no content for {}", file.path)))
    }

    async fn write_file(&self, directory: &str, filename: &str, data: Vec<u8>) -> HostResult<()> {
        if self.fail_write {
            return Err(HostError::Store("scripted write failure".to_string()));
        }
        self.writes
            .lock()
            .unwrap()
            .push((directory.to_string(), filename.to_string(), data));
        Ok(())
    }
}

enum OcrScript {
    Converted(Vec<u8>),
    NotPossible(String),
    ProcessorNotFound,
    Fail(String),
}

/// OCR converter double returning one scripted outcome.
pub struct ScriptedOcr {
    script: OcrScript,
    convert_calls: AtomicUsize,
}

impl ScriptedOcr {
    pub fn converted(artifact: &[u8]) -> Self {
        Self {
            script: OcrScript::Converted(artifact.to_vec()),
            convert_calls: AtomicUsize::new(0),
        }
    }

    pub fn not_possible(reason: &str) -> Self {
        Self {
            script: OcrScript::NotPossible(reason.to_string()),
            convert_calls: AtomicUsize::new(0),
        }
    }

    pub fn processor_not_found() -> Self {
        Self {
            script: OcrScript::ProcessorNotFound,
            convert_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            script: OcrScript::Fail(message.to_string()),
            convert_calls: AtomicUsize::new(0),
        }
    }

    pub fn convert_count(&self) -> usize {
        self.convert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrConverter for ScriptedOcr {
    async fn convert(&self, mime_type: &str, _data: &[u8]) -> anyhow::Result<ConversionOutcome> {
        self.convert_calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            OcrScript::Converted(artifact) => Ok(ConversionOutcome::Converted(artifact.clone())),
            OcrScript::NotPossible(reason) => Ok(ConversionOutcome::NotPossible {
                reason: reason.clone(),
            }),
            OcrScript::ProcessorNotFound => Ok(ConversionOutcome::ProcessorNotFound {
                mime_type: mime_type.to_string(),
            }),
            OcrScript::Fail(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}
