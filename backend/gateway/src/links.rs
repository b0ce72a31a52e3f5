//! Hypermedia `_links` attached to every response.

use std::collections::BTreeMap;

use serde::Serialize;

pub type Links = BTreeMap<&'static str, Link>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<&'static str>,
}

impl Link {
    pub fn get(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: None,
        }
    }

    pub fn post(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: Some("POST"),
        }
    }
}

pub fn links<const N: usize>(entries: [(&'static str, Link); N]) -> Links {
    entries.into_iter().collect()
}

pub const STATES: &str = "/api/states";
pub const CHAT: &str = "/api/chat";
pub const HISTORY: &str = "/api/history";
pub const CREATE_SESSION: &str = "/api/session/create";
pub const DOCS: &str = "/api/docs";
pub const DOCS_UI: &str = "/api/docs/ui";
pub const HEALTH: &str = "/api/health";

pub fn session_href(id: &str) -> String {
    format!("/api/session/{id}")
}

pub fn history_href(id: &str) -> String {
    format!("{HISTORY}/{id}")
}

pub fn states() -> Link {
    Link::get(STATES)
}

pub fn chat() -> Link {
    Link::post(CHAT)
}

pub fn create_session() -> Link {
    Link::post(CREATE_SESSION)
}
