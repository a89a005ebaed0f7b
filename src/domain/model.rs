use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    name: String,
    phone: String,
    excluded: BTreeSet<String>,
}

impl Participant {
    pub fn new<I, S>(name: impl Into<String>, phone: impl Into<String>, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            phone: phone.into(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    pub fn excludes(&self, label: &str) -> bool {
        self.excluded.contains(label)
    }
}

/// 可被分配的目標: 另一位參與者 (配對模式) 或類別標籤 (類別模式)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Target {
    Receiver(Participant),
    Category(String),
}

impl Target {
    pub fn label(&self) -> &str {
        match self {
            Target::Receiver(participant) => participant.name(),
            Target::Category(label) => label,
        }
    }

    /// 排除名單與自我配對檢查
    pub fn is_legal_for(&self, giver: &Participant) -> bool {
        if giver.excludes(self.label()) {
            return false;
        }
        match self {
            Target::Receiver(receiver) => receiver.name() != giver.name(),
            Target::Category(_) => true,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct TargetPool;

impl TargetPool {
    pub fn receivers(participants: &[Participant]) -> Vec<Target> {
        participants.iter().cloned().map(Target::Receiver).collect()
    }

    pub fn categories<S: AsRef<str>>(labels: &[S]) -> Vec<Target> {
        labels
            .iter()
            .map(|label| Target::Category(label.as_ref().to_string()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Pairs,
    Categories,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub giver: Participant,
    pub target: Target,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ---> {}", self.giver.name(), self.target.label())
    }
}
