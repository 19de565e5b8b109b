//! Scripted in-memory compliance service shared by the command tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use omni_core::{
    AuditQuery, AuditResult, ComplianceService, Confidence, Intent, Policy, PolicyId,
    ServiceError, VerdictStatus,
};

#[derive(Default)]
struct Script {
    policies: VecDeque<Result<Vec<Policy>, ServiceError>>,
    audits: VecDeque<Result<AuditResult, ServiceError>>,
    sent: Vec<AuditQuery>,
}

/// Replays scripted outcomes in order. Clones share the same script.
#[derive(Clone, Default)]
pub(crate) struct ScriptedService {
    script: Rc<RefCell<Script>>,
}

impl ScriptedService {
    pub(crate) fn with_policies(self, outcome: Result<Vec<Policy>, ServiceError>) -> Self {
        self.script.borrow_mut().policies.push_back(outcome);
        self
    }

    pub(crate) fn with_audit(self, outcome: Result<AuditResult, ServiceError>) -> Self {
        self.script.borrow_mut().audits.push_back(outcome);
        self
    }

    pub(crate) fn sent(&self) -> Vec<AuditQuery> {
        self.script.borrow().sent.clone()
    }
}

impl ComplianceService for ScriptedService {
    async fn list_policies(&self) -> Result<Vec<Policy>, ServiceError> {
        self.script
            .borrow_mut()
            .policies
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn run_audit(&self, query: &AuditQuery) -> Result<AuditResult, ServiceError> {
        let mut script = self.script.borrow_mut();
        script.sent.push(query.clone());
        script.audits.pop_front().expect("unscripted audit call")
    }
}

pub(crate) fn hr_catalog() -> Vec<Policy> {
    vec![Policy::new(PolicyId::new("p1").unwrap(), "HR Policy")]
}

pub(crate) fn pass_verdict() -> AuditResult {
    AuditResult {
        status: VerdictStatus::Pass,
        confidence: Confidence::High,
        reasoning: "Section 4 mandates yearly review.".into(),
        citations: vec!["HR-4.2".into()],
        intent: Intent::ComplianceAudit,
    }
}

pub(crate) fn status_error(code: u16, status_text: &str) -> ServiceError {
    ServiceError::Status {
        code,
        status_text: status_text.into(),
    }
}
