// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Transient user-facing notifications.

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;

/// How long the UI keeps a notice on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    severity: Severity,
    message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity.as_str(), self.message)
    }
}

/// Sending half of the notice channel. Cheap to clone; a dropped receiver silently discards.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn notify(&self, notice: Notice) {
        match notice.severity() {
            Severity::Error => tracing::warn!(message = notice.message(), "notice"),
            _ => tracing::debug!(message = notice.message(), "notice"),
        }
        let _ = self.tx.send(notice);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(Notice::new(Severity::Info, message));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notice::new(Severity::Success, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Notice::new(Severity::Error, message));
    }
}
