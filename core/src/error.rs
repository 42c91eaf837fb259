use std::path::PathBuf;

use pvpchecks_types::MessageKind;
use thiserror::Error;

use crate::rules::RuleList;

/// Rejected rule mutation. The rule set is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("{value} is already in the {list} list")]
    AlreadyPresent { list: RuleList, value: String },

    #[error("{value} is not in the {list} list")]
    NotPresent { list: RuleList, value: String },

    #[error("\"{query}\" matches more than one entry: {}", .candidates.join(", "))]
    LookupAmbiguous {
        query: String,
        candidates: Vec<String>,
    },

    #[error("no {list} matches \"{query}\"")]
    LookupNotFound { list: RuleList, query: String },

    #[error("{value} is not a valid {list} identifier")]
    InvalidIdentifier { list: RuleList, value: String },
}

/// Errors that can occur while loading or saving the rules file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },

    #[error("message templates missing or blank: {0:?}")]
    MissingTemplates(Vec<MessageKind>),

    #[error("no rules file location is available")]
    NoRulesPath,
}
