use crate::model::RunRecord;

pub mod attempt;
pub mod clear;
pub mod delete;
pub mod export;
pub mod list;
pub mod open;
pub mod upsert;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_rows: Vec<RunRecord>,
    pub listed_rows: Vec<RunRecord>,
    pub projects: Vec<String>,
    pub exported: Option<Vec<u8>>,
    pub next_attempt: Option<u32>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_rows(mut self, rows: Vec<RunRecord>) -> Self {
        self.affected_rows = rows;
        self
    }

    pub fn with_listed_rows(mut self, rows: Vec<RunRecord>) -> Self {
        self.listed_rows = rows;
        self
    }

    pub fn with_projects(mut self, projects: Vec<String>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_exported(mut self, bytes: Vec<u8>) -> Self {
        self.exported = Some(bytes);
        self
    }

    pub fn with_next_attempt(mut self, attempt: u32) -> Self {
        self.next_attempt = Some(attempt);
        self
    }
}
